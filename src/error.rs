//! Error types for tutorlink.

use thiserror::Error;

use crate::auth::validation::ValidationError;
use crate::auth::PasswordError;

/// Common error type for tutorlink.
#[derive(Error, Debug)]
pub enum TutorlinkError {
    /// A submitted field is malformed or empty.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Username already taken within the account variant.
    #[error("username already exists: {0}")]
    DuplicateUsername(String),

    /// Credentials did not verify.
    ///
    /// Deliberately carries no detail about which field was wrong.
    #[error("authentication failed")]
    AuthFailed,

    /// Target account or relation is absent.
    #[error("{0} not found")]
    NotFound(String),

    /// The requester may not mutate this resource.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// No verified identity is attached to the request.
    #[error("not authenticated")]
    Unauthenticated,

    /// Persistence layer failure.
    ///
    /// Every error coming out of sqlx lands here.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Password hashing machinery failed.
    #[error("hashing error: {0}")]
    Hashing(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl TutorlinkError {
    /// Whether the error is an infrastructure failure rather than an
    /// expected, user-correctable outcome.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TutorlinkError::StorageUnavailable(_)
                | TutorlinkError::Hashing(_)
                | TutorlinkError::Io(_)
                | TutorlinkError::Config(_)
        )
    }
}

impl From<sqlx::Error> for TutorlinkError {
    fn from(e: sqlx::Error) -> Self {
        TutorlinkError::StorageUnavailable(e.to_string())
    }
}

impl From<ValidationError> for TutorlinkError {
    fn from(e: ValidationError) -> Self {
        TutorlinkError::InvalidInput(e.to_string())
    }
}

impl From<PasswordError> for TutorlinkError {
    fn from(e: PasswordError) -> Self {
        match e {
            PasswordError::VerificationFailed => TutorlinkError::AuthFailed,
            other => TutorlinkError::Hashing(other.to_string()),
        }
    }
}

/// Result type alias for tutorlink operations.
pub type Result<T> = std::result::Result<T, TutorlinkError>;
