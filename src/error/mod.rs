//! Error types for credentials-google.

use thiserror::Error;

use crate::auth::AuthError;

/// Crate-level error for configuration and setup.
///
/// Per-request authentication failures never surface as this type; the flows
/// report them through [`crate::auth::LoginOutcome`] and
/// [`crate::auth::TokenOutcome`]. `CredentialsError` covers everything that can
/// go wrong before a request is ever handled.
#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Authentication error: {0}")]
    Authentication(String),
}

impl CredentialsError {
    /// Shorthand for a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

impl From<toml::de::Error> for CredentialsError {
    fn from(error: toml::de::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<AuthError> for CredentialsError {
    fn from(error: AuthError) -> Self {
        Self::Authentication(error.to_string())
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CredentialsError>;
