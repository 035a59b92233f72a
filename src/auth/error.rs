use thiserror::Error;

/// Errors that can occur while issuing or checking tokens.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Missing or malformed bearer token")]
    MissingToken,
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Failed to issue token: {0}")]
    Issue(String),
}
