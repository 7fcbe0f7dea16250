//! Service layer providing the client registry operations on top of models.
//! - Separates business rules (validation, missing-target policy) from data access.
//! - Reuses entity definitions in the `models` crate.
//! - Every client leaving this crate is normalized through `common::client`.

pub mod errors;
pub mod clients;
#[cfg(test)]
pub mod test_support;
