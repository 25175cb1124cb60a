//! Shared fixtures: Google userinfo payloads and consumer profile types.

#![allow(dead_code)]

use credentials_google::auth::{GoogleCredentials, TokenProfile};
use credentials_google::config::{GoogleConfig, GoogleEndpoints};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TOKEN: &str = "Test token";
pub const TOKEN_2: &str = "Test token 2";

/// v2 userinfo payload granting email; `gender` is absent.
pub fn john_doe_v2() -> Value {
    json!({
        "family_name": "Doe",
        "name": "John Doe",
        "picture": "https://lh4.googleusercontent.com/-abc123/abc123/abc123/abc123/photo.jpg",
        "locale": "en",
        "email": "john_doe@invalid.com",
        "given_name": "John",
        "id": "123456789012345678901",
        "verified_email": true
    })
}

/// v2 userinfo payload for a subject who declined to share email.
pub fn jane_doe_v2() -> Value {
    json!({
        "family_name": "Doe",
        "name": "Jane Doe",
        "picture": "https://lh4.googleusercontent.com/-xyz456/xyz456/xyz456/xyz456/photo.jpg",
        "locale": "en",
        "given_name": "Jane",
        "id": "112233445566778899001"
    })
}

/// v3 (OpenID) userinfo payload as returned to the redirect flow.
pub fn john_doe_v3() -> Value {
    json!({
        "sub": "123456789012345678901",
        "name": "John Doe",
        "given_name": "John",
        "family_name": "Doe",
        "picture": "https://lh4.googleusercontent.com/-abc123/photo.jpg",
        "email": "john_doe@invalid.com",
        "email_verified": true,
        "locale": "en"
    })
}

/// A consumer profile with fields Google never sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestGoogleToken {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub favourite_artist: Option<String>,
    pub favourite_number: Option<i64>,
}

impl TokenProfile for TestGoogleToken {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A second, differently-shaped consumer profile with a bounded cache.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoundedProfile {
    pub id: String,
    pub name: String,
}

impl TokenProfile for BoundedProfile {
    const CACHE_SIZE: usize = 2;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub fn to_bytes(value: &Value) -> Vec<u8> {
    serde_json::to_vec(value).expect("serialize fixture")
}

pub fn config_for(server: &MockServer) -> GoogleConfig {
    GoogleConfig::builder()
        .client_id("test-client-id")
        .client_secret("test-client-secret")
        .callback_url("http://localhost:8080/login/google/callback")
        .endpoints(GoogleEndpoints::with_base_url(&server.uri()))
        .build()
}

pub fn credentials_for(server: &MockServer) -> GoogleCredentials {
    GoogleCredentials::new(config_for(server)).expect("valid config")
}
