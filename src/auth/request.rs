//! Minimal view of an incoming request.

use std::collections::HashMap;

use reqwest::Url;

use super::error::AuthError;

/// The parts of an incoming request the Google flows read.
///
/// Host frameworks implement this for their own request type; [`AuthRequest`]
/// is an owned implementation for hosts that prefer to copy the values out.
pub trait CredentialRequest: Send + Sync {
    /// Header value by name. Lookups are case-insensitive.
    fn header(&self, name: &str) -> Option<&str>;

    /// Decoded query parameter by name.
    fn query_param(&self, name: &str) -> Option<&str>;
}

/// Owned request headers and query parameters.
///
/// # Example
/// ```
/// use credentials_google::auth::{AuthRequest, CredentialRequest};
///
/// let request = AuthRequest::new()
///     .with_header("X-token-type", "GoogleToken")
///     .with_header("access_token", "ya29.token");
/// assert_eq!(request.header("x-token-type"), Some("GoogleToken"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AuthRequest {
    headers: HashMap<String, String>,
    query: HashMap<String, String>,
}

impl AuthRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a request from its URL, keeping the decoded query parameters.
    ///
    /// When a parameter repeats, the first occurrence wins.
    pub fn from_url(url: &str) -> Result<Self, AuthError> {
        let url = Url::parse(url)
            .map_err(|e| AuthError::Decode(format!("invalid request URL: {e}")))?;
        let mut request = Self::new();
        for (key, value) in url.query_pairs() {
            request
                .query
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        Ok(request)
    }

    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }
}

impl CredentialRequest for AuthRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}
