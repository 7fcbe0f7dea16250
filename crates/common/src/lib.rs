//! Shared types for the client registry: the canonical client record with its
//! normalization contract, wire-level helper types and logging setup.

pub mod client;
pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::ok();
        assert_eq!(h.status, "ok");
    }
}
