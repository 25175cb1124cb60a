//! Convenience re-exports for common use.

pub use crate::auth::{
    AuthError, AuthRequest, Challenge, CredentialRequest, CredentialsPlugin, GoogleCredentials,
    GoogleTokenAuthenticator, GoogleTokenProfile, LoginOutcome, TokenCacheRegistry, TokenOutcome,
    TokenProfile, UserProfile,
};
pub use crate::config::GoogleConfig;
pub use crate::error::{CredentialsError, Result};
