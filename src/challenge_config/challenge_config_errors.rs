use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Custom error type for challenge config operations
#[derive(Debug, Error)]
pub enum ChallengeConfigError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
}

impl From<DieselError> for ChallengeConfigError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => {
                ChallengeConfigError::NotFound("Challenge config not found".to_string())
            }
            // A unique violation on the primary key means a concurrent create
            // won the race for the per-user singleton.
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                ChallengeConfigError::AlreadyExists(info.message().to_string())
            }
            _ => ChallengeConfigError::DatabaseError(err.to_string()),
        }
    }
}

/// Result type for challenge config operations
pub type Result<T> = std::result::Result<T, ChallengeConfigError>;
