use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required field is missing or has the wrong type. Raised before the
    /// store is touched.
    #[error("validation error: {0}")]
    Validation(String),
    /// The targeted id matched nothing. Only raised where the caller asked for
    /// strict missing-target handling; otherwise this is a no-op outcome.
    #[error("not found: {0}")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Any failure while reading means the store could not answer.
    pub fn from_read_err(e: DbErr) -> Self {
        Self::StoreUnavailable(e.to_string())
    }

    /// Writes distinguish "could not reach the store" from "the store said no".
    pub fn from_write_err(e: DbErr) -> Self {
        match e {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::StoreUnavailable(e.to_string()),
            other => Self::ConstraintViolation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnAcquireErr, RuntimeErr};

    #[test]
    fn write_errors_are_classified() {
        let e = ServiceError::from_write_err(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout));
        assert!(matches!(e, ServiceError::StoreUnavailable(_)));

        let e = ServiceError::from_write_err(DbErr::Exec(RuntimeErr::Internal("UNIQUE constraint failed".into())));
        assert!(matches!(e, ServiceError::ConstraintViolation(_)));
    }

    #[test]
    fn read_errors_are_unavailable() {
        let e = ServiceError::from_read_err(DbErr::Query(RuntimeErr::Internal("boom".into())));
        assert!(matches!(e, ServiceError::StoreUnavailable(_)));
        assert_eq!(ServiceError::not_found("client 3").to_string(), "not found: client 3 not found");
    }
}
