use thiserror::Error;

/// Error type for session token operations.
///
/// Every way a token can be rejected maps to exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(String),

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token has expired")]
    Expired,
}

/// Error for SigningKey construction failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningKeyError {
    #[error("Signing secret too short: minimum {min} bytes, got {actual}")]
    TooShort { min: usize, actual: usize },
}
