//! Google OAuth flows, typed profiles and the token cache.

pub mod cache;
pub mod error;
pub mod outcome;
pub mod plugin;
pub mod profile;
pub mod redirect;
pub mod request;
pub mod token;
pub mod user_profile;

pub use cache::{TokenCache, TokenCacheRegistry};
pub use error::AuthError;
pub use outcome::{Challenge, LoginOutcome, TokenOutcome};
pub use plugin::CredentialsPlugin;
pub use profile::{decode_profile, GoogleTokenProfile, TokenProfile, GOOGLE_PROVIDER};
pub use redirect::{GoogleCredentials, LoginState};
pub use request::{AuthRequest, CredentialRequest};
pub use token::{
    fetch_token_profile, GoogleTokenAuthenticator, ACCESS_TOKEN_HEADER, GOOGLE_TOKEN_TYPE,
    TOKEN_TYPE_HEADER,
};
pub use user_profile::{UserProfile, UserProfileEmail, UserProfileName, UserProfilePhoto};
