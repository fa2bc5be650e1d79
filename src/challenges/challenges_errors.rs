use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for challenge lifecycle operations
#[derive(Debug, Error)]
pub enum ChallengeError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already completed: {0}")]
    AlreadyCompleted(String),
    #[error("Active challenge limit of {0} reached")]
    LimitExceeded(usize),
}

impl From<DieselError> for ChallengeError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => ChallengeError::NotFound("Challenge not found".to_string()),
            _ => ChallengeError::DatabaseError(err.to_string()),
        }
    }
}

/// Result type for challenge operations
pub type Result<T> = std::result::Result<T, ChallengeError>;
