//! HTTP client for the CareGuide identity service.
//!
//! This module provides the `AuthClient` struct for registration and
//! login requests. A successful response is handed to the session store
//! before the call returns; a failed one leaves the store untouched.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::SessionStore;
use crate::models::{user::display_name_from_email, UserProfile};
use crate::storage::Storage;

use super::ApiError;

/// Base URL for the identity service.
const DEFAULT_API_BASE_URL: &str = "https://api.careguide.health";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Registration payload. Demographic fields are optional; absent ones
/// are left off the wire entirely.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "fullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(rename = "birthYear", skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthUserResponse {
    email: String,
    #[serde(rename = "fullName")]
    full_name: Option<String>,
    #[serde(rename = "createdAt")]
    created_at: Option<DateTime<Utc>>,
}

impl AuthUserResponse {
    /// Fill the gaps the service is allowed to leave: a display name
    /// synthesized from the email's local part, and a creation time of
    /// now. The synthesized name stays local; it is never sent back.
    fn into_profile(self) -> UserProfile {
        let full_name = self
            .full_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| display_name_from_email(&self.email));

        UserProfile {
            email: self.email,
            full_name,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// API client for the CareGuide identity service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    /// Create a client against the production identity service.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }

    /// Create a client against a specific base URL (staging, local).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Register a new account and open a session for it. The session
    /// store is written before this returns; on any failure it is left
    /// untouched.
    pub async fn register<S: Storage>(
        &self,
        store: &SessionStore<S>,
        request: &RegisterRequest,
    ) -> Result<UserProfile> {
        let url = format!("{}/auth/register", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to send registration request")?;

        let response = Self::check_response(response).await?;

        let auth: AuthUserResponse = response
            .json()
            .await
            .context("Failed to parse registration response")?;

        debug!(email = %auth.email, "Registration succeeded");

        let profile = auth.into_profile();
        store.establish(&profile);
        Ok(profile)
    }

    /// Log in to an existing account and open a session for it. Same
    /// store contract as `register`.
    pub async fn login<S: Storage>(
        &self,
        store: &SessionStore<S>,
        email: &str,
        password: &str,
    ) -> Result<UserProfile> {
        let url = format!("{}/auth/login", self.base_url);
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Failed to send login request")?;

        let response = Self::check_response(response).await?;

        let auth: AuthUserResponse = response
            .json()
            .await
            .context("Failed to parse login response")?;

        debug!(email = %auth.email, "Login succeeded");

        let profile = auth.into_profile();
        store.establish(&profile);
        Ok(profile)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_auth_response() {
        let json = r#"{"email": "a@b.com", "fullName": "A B", "createdAt": "2024-01-01T00:00:00Z"}"#;
        let auth: AuthUserResponse = serde_json::from_str(json).unwrap();

        let profile = auth.into_profile();
        assert_eq!(profile.email, "a@b.com");
        assert_eq!(profile.full_name, "A B");
        assert_eq!(
            profile.created_at,
            "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn test_missing_name_is_synthesized_from_email() {
        let json = r#"{"email": "jane.doe@example.com", "createdAt": "2024-01-01T00:00:00Z"}"#;
        let auth: AuthUserResponse = serde_json::from_str(json).unwrap();

        let profile = auth.into_profile();
        assert_eq!(profile.full_name, "Jane Doe");
    }

    #[test]
    fn test_empty_name_is_synthesized_from_email() {
        let json = r#"{"email": "sam@example.com", "fullName": "", "createdAt": "2024-01-01T00:00:00Z"}"#;
        let auth: AuthUserResponse = serde_json::from_str(json).unwrap();

        assert_eq!(auth.into_profile().full_name, "Sam");
    }

    #[test]
    fn test_missing_created_at_defaults_to_now() {
        let json = r#"{"email": "a@b.com", "fullName": "A B"}"#;
        let auth: AuthUserResponse = serde_json::from_str(json).unwrap();

        let before = Utc::now();
        let profile = auth.into_profile();
        assert!(profile.created_at >= before);
    }

    #[tokio::test]
    async fn test_failed_request_leaves_store_untouched() {
        use crate::auth::session::{AUTH_FLAG_KEY, USER_KEY};
        use crate::storage::{MemoryStorage, Storage};

        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());

        // Nothing is listening on the discard port, so the request fails
        // at the transport layer
        let client = AuthClient::with_base_url("http://127.0.0.1:9").unwrap();
        let result = client.login(&store, "a@b.com", "hunter22hunter22").await;

        assert!(result.is_err());
        assert!(!store.is_valid());
        assert!(storage.get(AUTH_FLAG_KEY).unwrap().is_none());
        assert!(storage.get(USER_KEY).unwrap().is_none());
    }

    #[test]
    fn test_register_request_omits_absent_fields() {
        let request = RegisterRequest {
            email: "a@b.com".to_string(),
            password: "hunter22hunter22".to_string(),
            full_name: None,
            birth_year: None,
            sex: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"email\""));
        assert!(!json.contains("fullName"));
        assert!(!json.contains("birthYear"));
        assert!(!json.contains("sex"));

        let request = RegisterRequest {
            birth_year: Some(1990),
            ..request
        };
        assert!(serde_json::to_string(&request).unwrap().contains("\"birthYear\":1990"));
    }
}
