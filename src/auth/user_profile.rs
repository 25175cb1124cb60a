//! Provider-neutral profile produced by the redirect login flow.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The subject's structured name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfileName {
    pub family_name: String,
    pub given_name: String,
    pub middle_name: String,
}

/// An e-mail address and its provider-defined type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfileEmail {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A profile photo URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfilePhoto {
    pub value: String,
}

/// An authenticated subject.
///
/// `id` and `display_name` are always present. The remaining attributes are
/// filled only when Google returned them, which depends on the scopes the
/// subject granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    pub provider: String,
    pub name: Option<UserProfileName>,
    pub emails: Option<Vec<UserProfileEmail>>,
    pub photos: Option<Vec<UserProfilePhoto>>,
}

impl UserProfile {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            provider: provider.into(),
            name: None,
            emails: None,
            photos: None,
        }
    }

    /// Build a profile from an OpenID Connect userinfo payload.
    ///
    /// Returns `None` unless both `sub` and `name` are strings. The structured
    /// name is kept only when both `family_name` and `given_name` are present.
    pub fn from_userinfo(userinfo: &Value, provider: &str) -> Option<Self> {
        let id = userinfo.get("sub")?.as_str()?;
        let display_name = userinfo.get("name")?.as_str()?;
        let field = |key: &str| userinfo.get(key).and_then(Value::as_str);

        let name = match (field("family_name"), field("given_name")) {
            (Some(family_name), Some(given_name)) => Some(UserProfileName {
                family_name: family_name.to_string(),
                given_name: given_name.to_string(),
                middle_name: field("middle_name").unwrap_or_default().to_string(),
            }),
            _ => None,
        };

        Some(Self {
            name,
            emails: field("email").map(|email| {
                vec![UserProfileEmail {
                    value: email.to_string(),
                    kind: String::new(),
                }]
            }),
            photos: field("picture").map(|picture| {
                vec![UserProfilePhoto {
                    value: picture.to_string(),
                }]
            }),
            ..Self::new(id, display_name, provider)
        })
    }
}
