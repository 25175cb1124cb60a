//! Authorization-code login flow against Google.

use std::fmt;

use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use strum::Display;
use tracing::{debug, error, warn};

use super::error::AuthError;
use super::outcome::LoginOutcome;
use super::profile::GOOGLE_PROVIDER;
use super::request::CredentialRequest;
use super::user_profile::UserProfile;
use crate::config::{GoogleConfig, GoogleEndpoints};
use crate::error::CredentialsError;

/// Stage of a single redirect-flow request, reported in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum LoginState {
    AwaitingCode,
    ExchangingCode,
    ExchangingToken,
    Resolved,
}

#[derive(Debug, Deserialize)]
struct TokenExchangeResponse {
    access_token: Option<String>,
}

/// Google web login using the OAuth authorization-code grant.
///
/// Each call to [`authenticate`](Self::authenticate) handles one request:
/// without a `code` query parameter it asks the host to redirect to Google;
/// with one, it exchanges the code for an access token and the token for the
/// subject's profile. No retries are attempted.
///
/// # Example
/// ```no_run
/// use credentials_google::auth::{AuthRequest, GoogleCredentials, LoginOutcome};
/// use credentials_google::config::GoogleConfig;
///
/// # async fn example() -> credentials_google::error::Result<()> {
/// let google = GoogleCredentials::new(GoogleConfig::from_env()?)?;
/// let request = AuthRequest::from_url("http://localhost:8080/login/google?code=4/abc")?;
/// match google.authenticate(&request).await {
///     LoginOutcome::Success(profile) => println!("hello {}", profile.display_name),
///     LoginOutcome::InProgress { redirect_url } => println!("redirect to {redirect_url}"),
///     LoginOutcome::Failure(_) => println!("login failed"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GoogleCredentials {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    callback_url: String,
    scope: String,
    endpoints: GoogleEndpoints,
}

impl fmt::Debug for GoogleCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"..")
            .field("callback_url", &self.callback_url)
            .field("scope", &self.scope)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

impl GoogleCredentials {
    pub fn new(config: GoogleConfig) -> Result<Self, CredentialsError> {
        config.validate()?;
        let client = config.http_client()?;
        Ok(Self {
            client,
            scope: config.scope_param(),
            client_id: config.client_id,
            client_secret: config.client_secret,
            callback_url: config.callback_url,
            endpoints: config.endpoints,
        })
    }

    /// Replace the HTTP client, e.g. to share a connection pool with the host.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// The plugin name, also used as the profile provider.
    pub fn name(&self) -> &'static str {
        GOOGLE_PROVIDER
    }

    /// This plugin authenticates by redirecting the user agent.
    pub fn redirecting(&self) -> bool {
        true
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    /// Google's authorization URL for this client.
    pub fn authorize_url(&self) -> Result<String, AuthError> {
        let url = Url::parse_with_params(
            &self.endpoints.authorize_url,
            [
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.callback_url.as_str()),
                ("scope", self.scope.as_str()),
                ("response_type", "code"),
            ],
        )
        .map_err(|e| AuthError::Decode(format!("invalid authorize URL: {e}")))?;
        Ok(url.to_string())
    }

    /// Handle one request of the login flow.
    pub async fn authenticate(&self, request: &dyn CredentialRequest) -> LoginOutcome {
        let Some(code) = request.query_param("code").filter(|code| !code.is_empty()) else {
            debug!(state = %LoginState::AwaitingCode, "No authorization code, redirecting to Google");
            return match self.authorize_url() {
                Ok(redirect_url) => LoginOutcome::InProgress { redirect_url },
                Err(err) => {
                    error!(error = %err, "Failed to build Google login URL");
                    LoginOutcome::Failure(err.challenge())
                }
            };
        };

        match self.login(code).await {
            Ok(profile) => {
                debug!(state = %LoginState::Resolved, user_id = %profile.id, "Google login succeeded");
                LoginOutcome::Success(profile)
            }
            Err(err) => {
                warn!(state = %LoginState::Resolved, error = %err, "Google login failed");
                LoginOutcome::Failure(err.challenge())
            }
        }
    }

    async fn login(&self, code: &str) -> Result<UserProfile, AuthError> {
        debug!(state = %LoginState::ExchangingCode, "Exchanging authorization code");
        let access_token = self.exchange_code(code).await?;
        debug!(state = %LoginState::ExchangingToken, "Fetching Google profile");
        self.fetch_user_profile(&access_token).await
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        let resp = self
            .client
            .post(&self.endpoints.token_url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.callback_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        let body = ok_body(resp).await?;
        let payload: TokenExchangeResponse = serde_json::from_slice(&body)?;
        payload
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AuthError::Decode("token response has no access_token".to_string()))
    }

    /// Fetch the subject's profile with an access token.
    pub async fn fetch_user_profile(&self, access_token: &str) -> Result<UserProfile, AuthError> {
        let resp = self
            .client
            .get(&self.endpoints.userinfo_url)
            .header("Accept", "application/json")
            .query(&[("access_token", access_token)])
            .send()
            .await?;

        let body = ok_body(resp).await?;
        let userinfo: Value = serde_json::from_slice(&body)?;
        UserProfile::from_userinfo(&userinfo, self.name())
            .ok_or_else(|| AuthError::Decode("userinfo is missing sub or name".to_string()))
    }
}

/// Read the body of a 200 response; anything else is a rejection.
pub(crate) async fn ok_body(resp: reqwest::Response) -> Result<Vec<u8>, AuthError> {
    let status = resp.status();
    if status != StatusCode::OK {
        return Err(AuthError::ProviderRejected {
            status: status.as_u16(),
        });
    }
    Ok(resp.bytes().await?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> GoogleCredentials {
        GoogleCredentials::new(
            GoogleConfig::builder()
                .client_id("client-id")
                .client_secret("client-secret")
                .callback_url("http://localhost:8080/login/google/callback")
                .build(),
        )
        .unwrap()
    }

    #[test]
    fn authorize_url_carries_client_parameters() {
        let url = credentials().authorize_url().unwrap();
        assert_eq!(
            url,
            "https://accounts.google.com/o/oauth2/auth?client_id=client-id\
             &redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Flogin%2Fgoogle%2Fcallback\
             &scope=profile&response_type=code"
        );
    }

    #[test]
    fn debug_redacts_client_secret() {
        let rendered = format!("{:?}", credentials());
        assert!(rendered.contains("client-id"));
        assert!(!rendered.contains("client-secret"));
    }

    #[test]
    fn plugin_identity() {
        let google = credentials();
        assert_eq!(google.name(), "Google");
        assert!(google.redirecting());
    }

    #[test]
    fn login_states_render_snake_case() {
        assert_eq!(LoginState::AwaitingCode.to_string(), "awaiting_code");
        assert_eq!(LoginState::ExchangingToken.to_string(), "exchanging_token");
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = GoogleConfig::builder()
            .client_id("")
            .client_secret("secret")
            .callback_url("http://localhost/cb")
            .build();
        assert!(matches!(
            GoogleCredentials::new(config),
            Err(CredentialsError::Configuration(_))
        ));
    }
}
