//! Results handed back to the host framework.

use std::collections::HashMap;

use super::user_profile::UserProfile;

/// Status and headers the host should use when a flow does not succeed.
///
/// Both are optional; `None` lets the host apply its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Challenge {
    pub status: Option<u16>,
    pub headers: Option<HashMap<String, String>>,
}

impl Challenge {
    pub fn with_status(status: u16) -> Self {
        Self {
            status: Some(status),
            headers: None,
        }
    }
}

/// Outcome of one turn of the redirect-based login flow.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// The subject was authenticated.
    Success(UserProfile),
    /// The code exchange or profile fetch failed.
    Failure(Challenge),
    /// No code yet: the host must redirect the user agent to `redirect_url`.
    InProgress { redirect_url: String },
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Outcome of bearer-token verification for a consumer profile type `P`.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenOutcome<P> {
    /// The token resolved to a profile, from cache or from Google.
    Success(P),
    /// The request targeted Google but could not be authenticated.
    Failure(Challenge),
    /// The request does not carry a Google token; try another mechanism.
    Pass(Challenge),
}

impl<P> TokenOutcome<P> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The authenticated profile, if any.
    pub fn profile(&self) -> Option<&P> {
        match self {
            Self::Success(profile) => Some(profile),
            _ => None,
        }
    }
}
