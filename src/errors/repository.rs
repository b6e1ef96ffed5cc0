use sqlx::Error as SqlxError;
use thiserror::Error;

// PostgreSQL SQLSTATE codes we translate
const UNIQUE_VIOLATION: &str = "23505";
const NOT_NULL_VIOLATION: &str = "23502";
const CHECK_VIOLATION: &str = "23514";

#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Connection, pool or query failure
    #[error("Database error: {0}")]
    Database(SqlxError),

    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint rejected the row (for urls: a duplicate hash)
    #[error("Conflict error: {0}")]
    Conflict(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        match err {
            SqlxError::RowNotFound => Self::NotFound("Resource not found".to_string()),
            SqlxError::Database(db_err) => {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                let code = db_err.code().map(|c| c.into_owned());
                match code.as_deref() {
                    Some(UNIQUE_VIOLATION) => {
                        Self::Conflict(format!("Unique constraint '{}' violated", constraint))
                    }
                    Some(NOT_NULL_VIOLATION) | Some(CHECK_VIOLATION) => Self::InvalidData(
                        format!("Row rejected by constraint '{}'", constraint),
                    ),
                    _ => Self::Database(SqlxError::Database(db_err)),
                }
            }
            _ => Self::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    /// Minimal driver error carrying just a SQLSTATE and constraint name
    #[derive(Debug)]
    struct FakeDbError {
        code: &'static str,
        constraint: &'static str,
    }

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "SQLSTATE {}", self.code)
        }
    }

    impl std::error::Error for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.code {
                UNIQUE_VIOLATION => ErrorKind::UniqueViolation,
                NOT_NULL_VIOLATION => ErrorKind::NotNullViolation,
                CHECK_VIOLATION => ErrorKind::CheckViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn db_error(code: &'static str, constraint: &'static str) -> SqlxError {
        SqlxError::Database(Box::new(FakeDbError { code, constraint }))
    }

    #[test]
    fn unique_violation_maps_to_conflict() {
        let err = RepositoryError::from(db_error("23505", "urls_hash_key"));
        assert!(err.is_conflict());
        assert!(matches!(err, RepositoryError::Conflict(ref m) if m.contains("urls_hash_key")));
    }

    #[test]
    fn check_and_not_null_violations_map_to_invalid_data() {
        for code in ["23514", "23502"] {
            let err = RepositoryError::from(db_error(code, "urls_url_original_check"));
            assert!(matches!(err, RepositoryError::InvalidData(_)), "{}", code);
        }
    }

    #[test]
    fn other_database_errors_are_kept() {
        let err = RepositoryError::from(db_error("40001", "none"));
        assert!(matches!(err, RepositoryError::Database(_)));
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = RepositoryError::from(SqlxError::RowNotFound);
        assert!(matches!(err, RepositoryError::NotFound(_)));
        assert!(!err.is_conflict());
    }

    #[test]
    fn pool_errors_stay_database_errors() {
        let err = RepositoryError::from(SqlxError::PoolTimedOut);
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}
