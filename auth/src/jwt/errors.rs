use thiserror::Error;

/// Error type for token issuance and parsing.
///
/// `Expired` is kept apart from `Invalid`: an expired access token can be
/// replaced through the refresh exchange, an invalid one cannot.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signing secret is not configured")]
    MissingSecret,

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Token is expired")]
    Expired,
}
