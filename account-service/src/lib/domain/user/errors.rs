use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for display name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for plaintext password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    Empty,
}

/// Top-level error for all account operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordError),

    // Domain-level errors
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No bearer token provided")]
    TokenMissing,

    #[error("Token is invalid: {0}")]
    TokenInvalid(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("User not found: {0}")]
    UserNotFound(String),

    // Infrastructure errors
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<auth::TokenError> for UserError {
    fn from(err: auth::TokenError) -> Self {
        match err {
            auth::TokenError::Expired => UserError::TokenExpired,
            auth::TokenError::Invalid(reason) => UserError::TokenInvalid(reason),
            auth::TokenError::EncodingFailed(reason) => {
                UserError::Internal(format!("Failed to encode token: {}", reason))
            }
        }
    }
}

impl From<auth::PasswordError> for UserError {
    fn from(err: auth::PasswordError) -> Self {
        UserError::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for UserError {
    fn from(err: tokio::task::JoinError) -> Self {
        UserError::Internal(format!("Blocking task failed: {}", err))
    }
}
