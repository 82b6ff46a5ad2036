use thiserror::Error;

/// Error type for identity token operations.
///
/// `Expired` and `Invalid` stay distinct here so callers can log the reason;
/// HTTP adapters are expected to collapse them into one outward signal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}
