use diesel::result::Error as DieselError;
use thiserror::Error;

use crate::badges::BadgeError;
use crate::challenge_config::ChallengeConfigError;
use crate::challenges::ChallengeError;
use crate::users::UserError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the savings challenge core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Challenge error: {0}")]
    Challenge(#[from] ChallengeError),

    #[error("Challenge config error: {0}")]
    ChallengeConfig(#[from] ChallengeConfigError),

    #[error("User error: {0}")]
    User(#[from] UserError),

    #[error("Badge error: {0}")]
    Badge(#[from] BadgeError),
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(#[from] diesel::result::ConnectionError),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(#[from] r2d2::Error),

    #[error("Database query failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Division by zero when computing a percentage")]
    DivisionByZero,
}

/// Coarse classification of errors for the boundary layer.
///
/// The transport layer owns the mapping from kind to status code; the core
/// never encodes a status itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    AlreadyCompleted,
    BadInput,
    LimitExceeded,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Database(_) => ErrorKind::Internal,
            Error::Validation(_) => ErrorKind::BadInput,
            Error::Challenge(e) => match e {
                ChallengeError::NotFound(_) => ErrorKind::NotFound,
                ChallengeError::AlreadyCompleted(_) => ErrorKind::AlreadyCompleted,
                ChallengeError::LimitExceeded(_) => ErrorKind::LimitExceeded,
                ChallengeError::DatabaseError(_) => ErrorKind::Internal,
            },
            Error::ChallengeConfig(e) => match e {
                ChallengeConfigError::NotFound(_) => ErrorKind::NotFound,
                ChallengeConfigError::AlreadyExists(_) => ErrorKind::AlreadyExists,
                ChallengeConfigError::DatabaseError(_) => ErrorKind::Internal,
            },
            Error::User(e) => match e {
                UserError::NotFound(_) => ErrorKind::NotFound,
                UserError::AlreadyExists(_) => ErrorKind::AlreadyExists,
                UserError::DatabaseError(_) => ErrorKind::Internal,
            },
            Error::Badge(e) => match e {
                BadgeError::DatabaseError(_) => ErrorKind::Internal,
            },
        }
    }
}

// Implement From for DieselError to Error directly
impl From<DieselError> for Error {
    fn from(err: DieselError) -> Self {
        Error::Database(DatabaseError::QueryFailed(err))
    }
}

// Add From implementation for rust_decimal::Error
impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

// Add From implementation for std::io::Error
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

// Add this implementation
impl From<r2d2::Error> for Error {
    fn from(e: r2d2::Error) -> Self {
        Error::Database(DatabaseError::PoolCreationFailed(e))
    }
}
