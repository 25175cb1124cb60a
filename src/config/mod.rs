//! Configuration for the Google credential flows (code > env > TOML file).

use std::fmt;
use std::path::Path;
use std::time::Duration;

use bon::Builder;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{CredentialsError, Result};

pub const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://accounts.google.com/o/oauth2/token";
pub const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";
pub const GOOGLE_TOKEN_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Google endpoints used by the flows. Overridable for testing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleEndpoints {
    /// Authorization endpoint the user agent is redirected to.
    pub authorize_url: String,
    /// Code-for-token exchange endpoint.
    pub token_url: String,
    /// OpenID userinfo endpoint read by the redirect flow.
    pub userinfo_url: String,
    /// Userinfo endpoint read by bearer-token verification.
    pub token_userinfo_url: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            authorize_url: GOOGLE_AUTHORIZE_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            userinfo_url: GOOGLE_USERINFO_URL.to_string(),
            token_userinfo_url: GOOGLE_TOKEN_USERINFO_URL.to_string(),
        }
    }
}

impl GoogleEndpoints {
    /// Point every endpoint at `base` (e.g. a local mock server), keeping
    /// Google's paths.
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            authorize_url: format!("{base}/o/oauth2/auth"),
            token_url: format!("{base}/o/oauth2/token"),
            userinfo_url: format!("{base}/oauth2/v3/userinfo"),
            token_userinfo_url: format!("{base}/oauth2/v2/userinfo"),
        }
    }
}

/// Construction-time settings for [`crate::auth::GoogleCredentials`] and
/// [`crate::auth::GoogleTokenAuthenticator`].
///
/// # Example
/// ```
/// use credentials_google::config::GoogleConfig;
///
/// let config = GoogleConfig::builder()
///     .client_id("1234.apps.googleusercontent.com")
///     .client_secret("secret")
///     .callback_url("http://localhost:8080/login/google/callback")
///     .cache_size(10_000)
///     .build();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.scopes, vec!["profile".to_string()]);
/// ```
#[derive(Clone, Builder, Serialize, Deserialize)]
pub struct GoogleConfig {
    #[builder(into)]
    pub client_id: String,
    #[builder(into)]
    pub client_secret: String,
    /// The URL Google redirects back to.
    #[builder(into)]
    pub callback_url: String,
    #[builder(default = default_scopes())]
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
    /// Token cache bound for the token flow; `0` means unbounded.
    #[builder(default)]
    #[serde(default)]
    pub cache_size: usize,
    /// Transport timeout for calls to Google. Unset means the client default.
    pub request_timeout_secs: Option<u64>,
    #[builder(default)]
    #[serde(default)]
    pub endpoints: GoogleEndpoints,
}

impl fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"..")
            .field("callback_url", &self.callback_url)
            .field("scopes", &self.scopes)
            .field("cache_size", &self.cache_size)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

fn default_scopes() -> Vec<String> {
    vec!["profile".to_string()]
}

impl GoogleConfig {
    /// Load from environment variables, reading `.env` first if present.
    ///
    /// Required: `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`,
    /// `GOOGLE_CALLBACK_URL`. Optional: `GOOGLE_TOKEN_CACHE_SIZE`,
    /// `GOOGLE_SCOPES`, `GOOGLE_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            var(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| CredentialsError::configuration(format!("{key} is not set")))
        };

        let config = Self {
            client_id: required("GOOGLE_CLIENT_ID")?,
            client_secret: required("GOOGLE_CLIENT_SECRET")?,
            callback_url: required("GOOGLE_CALLBACK_URL")?,
            scopes: var("GOOGLE_SCOPES")
                .map(|raw| parse_scopes(&raw))
                .filter(|scopes| !scopes.is_empty())
                .unwrap_or_else(default_scopes),
            cache_size: parse_number(&var, "GOOGLE_TOKEN_CACHE_SIZE")?.unwrap_or(0),
            request_timeout_secs: parse_number(&var, "GOOGLE_REQUEST_TIMEOUT_SECS")?,
            endpoints: GoogleEndpoints::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document with the same fields as this struct.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Reject empty credentials and unparseable URLs.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ] {
            if value.trim().is_empty() {
                return Err(CredentialsError::configuration(format!(
                    "{key} must not be empty"
                )));
            }
        }
        if self.scopes.is_empty() {
            return Err(CredentialsError::configuration(
                "at least one scope is required",
            ));
        }

        for (key, value) in [
            ("callback_url", &self.callback_url),
            ("endpoints.authorize_url", &self.endpoints.authorize_url),
            ("endpoints.token_url", &self.endpoints.token_url),
            ("endpoints.userinfo_url", &self.endpoints.userinfo_url),
            (
                "endpoints.token_userinfo_url",
                &self.endpoints.token_userinfo_url,
            ),
        ] {
            Url::parse(value).map_err(|e| {
                CredentialsError::configuration(format!("{key} is not a valid URL: {e}"))
            })?;
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Scopes joined the way Google's authorization endpoint expects.
    pub fn scope_param(&self) -> String {
        self.scopes.join(" ")
    }

    /// HTTP client honoring the configured transport timeout.
    pub(crate) fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout() {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(|e| {
            CredentialsError::configuration(format!("failed to build HTTP client: {e}"))
        })
    }
}

fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|scope| !scope.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_number<T: std::str::FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>> {
    match var(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map(Some).map_err(|_| {
            CredentialsError::configuration(format!("{key} must be a non-negative integer"))
        }),
        _ => Ok(None),
    }
}
