use thiserror::Error;

use super::outcome::Challenge;

/// HTTP status reported when a request declares a Google token but omits it.
pub const UNAUTHORIZED: u16 = 401;

/// Failure taxonomy shared by the redirect and token flows.
///
/// Only [`AuthError::MissingCredential`] carries a status out to the caller;
/// transport, rejection and decode failures collapse to a bare failure and are
/// logged here instead.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Provider rejected request with status {status}")]
    ProviderRejected { status: u16 },
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),
    #[error("Request does not target this provider")]
    NotApplicable,
}

impl AuthError {
    /// Whether a caller-side retry could reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::ProviderRejected { status } => (500..=599).contains(status),
            _ => false,
        }
    }

    /// The outcome payload handed back to the host for this error.
    pub fn challenge(&self) -> Challenge {
        match self {
            Self::MissingCredential(_) => Challenge::with_status(UNAUTHORIZED),
            _ => Challenge::default(),
        }
    }
}

// The request URL carries the access token as a query parameter, so it is
// stripped before the error is rendered.
impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.without_url().to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}
