//! Google OAuth2 credentials for web request handlers.
//!
//! Two flows are provided:
//!
//! - [`auth::GoogleCredentials`]: browser login with the authorization-code
//!   grant. A request without a `code` yields a redirect to Google; the
//!   callback request exchanges the code and returns a [`auth::UserProfile`].
//! - [`auth::GoogleTokenAuthenticator`]: requests carrying
//!   `X-token-type: GoogleToken` and an `access_token` header are verified
//!   against Google and decoded into a consumer-defined [`auth::TokenProfile`],
//!   with verified tokens kept in a per-type [`auth::TokenCache`].
//!
//! # Quick Start
//!
//! ```no_run
//! use credentials_google::prelude::*;
//!
//! # async fn example() -> credentials_google::error::Result<()> {
//! let config = GoogleConfig::from_env()?;
//! let tokens = GoogleTokenAuthenticator::<GoogleTokenProfile>::from_config(&config)?;
//!
//! let request = AuthRequest::new()
//!     .with_header("X-token-type", "GoogleToken")
//!     .with_header("access_token", "ya29.a0Af...");
//! match tokens.authenticate(&request).await {
//!     TokenOutcome::Success(profile) => println!("hello {}", profile.name),
//!     TokenOutcome::Failure(challenge) => println!("rejected: {:?}", challenge.status),
//!     TokenOutcome::Pass(_) => println!("not a Google token, try the next plugin"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod prelude;
