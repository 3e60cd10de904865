//! Error types for the record store

use std::fmt;

/// Failures reported by a [`RecordStore`](crate::RecordStore)
#[derive(Debug)]
pub enum StoreError {
    /// Another record already uses this email
    Conflict(String),
    /// No record has this email
    NotFound,
    /// The store could not be reached
    Unavailable(String),
    Database(Box<sqlx::Error>),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Conflict(email) => write!(f, "Email already exists: {}", email),
            StoreError::NotFound => write!(f, "Record not found"),
            StoreError::Unavailable(msg) => write!(f, "Record store unavailable: {}", msg),
            StoreError::Database(err) => write!(f, "Database error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Database(Box::new(other)),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        match err {
            sqlx::migrate::MigrateError::Execute(inner) => StoreError::from(inner),
            other => StoreError::Database(Box::new(sqlx::Error::Migrate(Box::new(other)))),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_error_display() {
        let err = StoreError::Conflict("ann@x.com".to_string());
        assert_eq!(format!("{}", err), "Email already exists: ann@x.com");
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::NotFound
        ));
    }

    #[test]
    fn test_pool_errors_map_to_unavailable() {
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolClosed),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn test_migration_connection_failure_is_unavailable() {
        let err = StoreError::from(sqlx::migrate::MigrateError::Execute(
            sqlx::Error::PoolTimedOut,
        ));
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_migration_history_mismatch_is_database_error() {
        let err = StoreError::from(sqlx::migrate::MigrateError::VersionMissing(20250301000000));
        assert!(matches!(err, StoreError::Database(_)));
        assert!(err.to_string().contains("20250301000000"));
    }

    #[test]
    fn test_other_errors_keep_source() {
        let err = StoreError::from(sqlx::Error::Protocol("bad frame".into()));
        assert!(matches!(err, StoreError::Database(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
