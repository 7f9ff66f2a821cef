// Error taxonomy for the service and a result alias, built on thiserror.
use thiserror::Error;

pub mod response;
pub mod store;

pub use store::{StoreError, StoreResult};

/// Raised before anything is persisted; the user can correct the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Total Utilization must be greater than 0")]
    UtilizationNotPositive,

    #[error("Total Utilization cannot exceed 8 hours")]
    UtilizationTooHigh,

    #[error("Total Utilization is auto-calculated for this task")]
    UtilizationReadOnly,

    #[error("Please fill in all required fields")]
    MissingRequiredFields,

    #[error("Count must be at least 1")]
    InvalidCount,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("This account has been disabled")]
    Disabled,

    #[error("Not authenticated")]
    NotAuthenticated,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    // Backing store unreachable or returned garbage.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Session error: {0}")]
    Session(String),

    #[error("{0}")]
    Unavailable(String),
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
