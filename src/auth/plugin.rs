//! Registerable credential plugin trait.

use async_trait::async_trait;

use super::outcome::LoginOutcome;
use super::redirect::GoogleCredentials;
use super::request::CredentialRequest;

/// A redirect-style authentication mechanism a host framework can register.
///
/// Hosts keep plugins as `Box<dyn CredentialsPlugin>` and try them in turn;
/// [`GoogleCredentials`] is the implementation provided here.
#[async_trait]
pub trait CredentialsPlugin: Send + Sync {
    /// Plugin name, e.g. "Google".
    fn name(&self) -> &str;

    /// Whether authenticating may redirect the user agent.
    fn redirecting(&self) -> bool;

    /// Handle one request of the plugin's login flow.
    async fn authenticate(&self, request: &dyn CredentialRequest) -> LoginOutcome;
}

#[async_trait]
impl CredentialsPlugin for GoogleCredentials {
    fn name(&self) -> &str {
        GoogleCredentials::name(self)
    }

    fn redirecting(&self) -> bool {
        GoogleCredentials::redirecting(self)
    }

    async fn authenticate(&self, request: &dyn CredentialRequest) -> LoginOutcome {
        GoogleCredentials::authenticate(self, request).await
    }
}
