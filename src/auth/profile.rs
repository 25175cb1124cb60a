//! Typed Google profiles and the decoder that produces them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::AuthError;

/// Provider name reported by every Google profile.
pub const GOOGLE_PROVIDER: &str = "Google";

/// A consumer-defined profile shape that a Google access token resolves to.
///
/// Implementors are plain `serde` structs. Fields Google may withhold (email,
/// gender, ...) must be `Option`s, otherwise decoding fails for subjects who
/// did not grant them. Fields Google never sends need `Option` or
/// `#[serde(default)]` as well.
///
/// # Example
/// ```
/// use credentials_google::auth::TokenProfile;
/// use serde::Deserialize;
///
/// #[derive(Debug, Clone, Deserialize)]
/// struct ExampleProfile {
///     id: String,
///     name: String,
///     email: Option<String>,
/// }
///
/// impl TokenProfile for ExampleProfile {
///     const CACHE_SIZE: usize = 1_000;
///
///     fn id(&self) -> &str {
///         &self.id
///     }
///
///     fn name(&self) -> &str {
///         &self.name
///     }
/// }
/// ```
pub trait TokenProfile: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Maximum number of cached tokens for this type; `0` means unbounded.
    const CACHE_SIZE: usize = 0;

    /// The subject's unique Google id.
    fn id(&self) -> &str;

    /// The subject's display name.
    fn name(&self) -> &str;

    fn provider(&self) -> &str {
        GOOGLE_PROVIDER
    }
}

/// The full set of fields Google's v2 userinfo endpoint can return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleTokenProfile {
    pub id: String,
    pub name: String,
    pub family_name: String,
    pub given_name: String,
    pub picture: String,
    pub locale: String,
    pub gender: Option<String>,
    pub email: Option<String>,
    /// Only present when `email` was granted.
    pub verified_email: Option<bool>,
}

impl TokenProfile for GoogleTokenProfile {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Decode a Google userinfo payload into the profile shape `P`.
///
/// Unknown fields are ignored. Missing required fields and type mismatches
/// are reported as [`AuthError::Decode`].
pub fn decode_profile<P: TokenProfile>(body: &[u8]) -> Result<P, AuthError> {
    serde_json::from_slice(body).map_err(|error| {
        tracing::error!(
            profile_type = std::any::type_name::<P>(),
            error = %error,
            "Failed to decode Google profile"
        );
        AuthError::Decode(error.to_string())
    })
}
