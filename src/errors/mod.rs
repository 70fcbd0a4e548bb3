// Defines a custom error type and a result type alias using the thiserror crate.
use thiserror::Error;

// Make the response module public
pub mod response;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required field: {0}")]
    Validation(String),

    #[error("Email already exists")]
    Conflict,

    #[error("User not found")]
    NotFound,

    // The #[from] attribute automatically converts a std::io::Error into an AppError::Storage using the From trait.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
