//! Bearer-token verification against Google's userinfo endpoint.

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::cache::{describe_size, TokenCache, TokenCacheRegistry};
use super::error::AuthError;
use super::outcome::TokenOutcome;
use super::profile::{decode_profile, TokenProfile};
use super::redirect::ok_body;
use super::request::CredentialRequest;
use crate::config::{GoogleConfig, GoogleEndpoints, GOOGLE_TOKEN_USERINFO_URL};
use crate::error::CredentialsError;

/// Header declaring which kind of token the request carries.
pub const TOKEN_TYPE_HEADER: &str = "X-token-type";
/// [`TOKEN_TYPE_HEADER`] value claimed by this provider.
pub const GOOGLE_TOKEN_TYPE: &str = "GoogleToken";
/// Header carrying the access token itself.
pub const ACCESS_TOKEN_HEADER: &str = "access_token";

/// Authenticates requests that present a Google access token directly.
///
/// Requests must carry `X-token-type: GoogleToken` and the token in an
/// `access_token` header. Verified tokens are cached, so a token is sent to
/// Google at most once while its entry stays in the cache.
///
/// # Example
/// ```no_run
/// use credentials_google::auth::{
///     AuthRequest, GoogleTokenAuthenticator, GoogleTokenProfile, TokenOutcome,
/// };
///
/// # async fn example() {
/// let auth = GoogleTokenAuthenticator::<GoogleTokenProfile>::new();
/// let request = AuthRequest::new()
///     .with_header("X-token-type", "GoogleToken")
///     .with_header("access_token", "ya29.a0Af...");
/// if let TokenOutcome::Success(profile) = auth.authenticate(&request).await {
///     println!("{} ({:?})", profile.name, profile.email);
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GoogleTokenAuthenticator<P> {
    client: reqwest::Client,
    userinfo_url: String,
    cache: Arc<TokenCache<P>>,
}

impl<P: TokenProfile> Default for GoogleTokenAuthenticator<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: TokenProfile> GoogleTokenAuthenticator<P> {
    /// Authenticator with its own cache sized by [`TokenProfile::CACHE_SIZE`].
    pub fn new() -> Self {
        debug!(
            profile_type = std::any::type_name::<P>(),
            size = %describe_size(P::CACHE_SIZE),
            "Creating token cache"
        );
        Self::with_cache(Arc::new(TokenCache::new(P::CACHE_SIZE)))
    }

    /// Authenticator sharing `cache`, typically obtained from a
    /// [`TokenCacheRegistry`].
    pub fn with_cache(cache: Arc<TokenCache<P>>) -> Self {
        Self {
            client: reqwest::Client::new(),
            userinfo_url: GOOGLE_TOKEN_USERINFO_URL.to_string(),
            cache,
        }
    }

    /// Authenticator using the registry's cache for `P`.
    pub fn from_registry(registry: &TokenCacheRegistry) -> Self {
        Self::with_cache(registry.cache_for::<P>())
    }

    /// Authenticator configured from `config`; `cache_size` overrides
    /// [`TokenProfile::CACHE_SIZE`].
    pub fn from_config(config: &GoogleConfig) -> Result<Self, CredentialsError> {
        config.validate()?;
        debug!(
            profile_type = std::any::type_name::<P>(),
            size = %describe_size(config.cache_size),
            "Creating token cache"
        );
        Ok(Self {
            client: config.http_client()?,
            userinfo_url: config.endpoints.token_userinfo_url.clone(),
            cache: Arc::new(TokenCache::new(config.cache_size)),
        })
    }

    pub fn with_endpoints(mut self, endpoints: &GoogleEndpoints) -> Self {
        self.userinfo_url = endpoints.token_userinfo_url.clone();
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn cache(&self) -> &Arc<TokenCache<P>> {
        &self.cache
    }

    /// Handle one request.
    pub async fn authenticate(&self, request: &dyn CredentialRequest) -> TokenOutcome<P> {
        match self.authenticate_request(request).await {
            Ok(profile) => TokenOutcome::Success(profile),
            Err(err @ AuthError::NotApplicable) => TokenOutcome::Pass(err.challenge()),
            Err(err) => {
                warn!(error = %err, "Google token authentication failed");
                TokenOutcome::Failure(err.challenge())
            }
        }
    }

    async fn authenticate_request(&self, request: &dyn CredentialRequest) -> Result<P, AuthError> {
        if request.header(TOKEN_TYPE_HEADER) != Some(GOOGLE_TOKEN_TYPE) {
            return Err(AuthError::NotApplicable);
        }
        let token = request
            .header(ACCESS_TOKEN_HEADER)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingCredential(ACCESS_TOKEN_HEADER))?;
        self.verify(token).await
    }

    /// Resolve `token` to a profile, from cache when possible.
    pub async fn verify(&self, token: &str) -> Result<P, AuthError> {
        if let Some(profile) = self.cache.get(token) {
            debug!(user_id = %profile.id(), "Google token served from cache");
            return Ok(profile);
        }

        debug!("Google token not cached, fetching profile");
        let profile = fetch_token_profile::<P>(&self.client, &self.userinfo_url, token).await?;
        self.cache.put(token, profile.clone());
        Ok(profile)
    }
}

/// Fetch and decode the profile for `token`, bypassing any cache.
pub async fn fetch_token_profile<P: TokenProfile>(
    client: &reqwest::Client,
    userinfo_url: &str,
    token: &str,
) -> Result<P, AuthError> {
    let resp = client
        .get(userinfo_url)
        .header("Accept", "application/json")
        .query(&[("access_token", token)])
        .send()
        .await
        .map_err(|e| {
            let err = AuthError::from(e);
            error!(error = %err, "Request to Google failed");
            err
        })?;

    let body = ok_body(resp).await.map_err(|e| {
        error!(error = %e, "Google profile request failed");
        e
    })?;
    decode_profile(&body)
}
