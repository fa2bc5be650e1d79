use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for badge operations
#[derive(Debug, Error)]
pub enum BadgeError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<DieselError> for BadgeError {
    fn from(err: DieselError) -> Self {
        BadgeError::DatabaseError(err.to_string())
    }
}

/// Result type for badge operations
pub type Result<T> = std::result::Result<T, BadgeError>;
