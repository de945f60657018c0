//! HTTP implementation of the remote profile gateway.
//!
//! Thin adapter over the vitae backend's profile endpoints. Transport and
//! authorization failures are mapped onto the structured error classes the
//! synchronizer's fallback logic depends on.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use vitae_core::error::{Result, VitaeError};
use vitae_core::profile::{Profile, ProfileGateway, ProfilePatch};
use vitae_core::resume::Resume;

const DEFAULT_VITAE_URL: &str = "https://api.vitae.app";

/// Profile gateway that talks to the vitae backend over HTTP.
#[derive(Clone)]
pub struct HttpProfileGateway {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateProfileRequest<'a> {
    name: &'a str,
    resume: &'a Resume,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    id: String,
    name: String,
    resume: Resume,
    updated_at: i64,
    #[serde(default)]
    is_active: bool,
}

impl From<ProfileResponse> for Profile {
    fn from(response: ProfileResponse) -> Self {
        Profile {
            id: response.id,
            name: response.name,
            resume: response.resume,
            updated_at: response.updated_at,
            is_active: response.is_active,
        }
    }
}

impl HttpProfileGateway {
    /// Creates a gateway with explicit configuration.
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_token,
        }
    }

    /// Loads configuration from environment variables
    /// (`VITAE_API_URL`, `VITAE_API_TOKEN`).
    ///
    /// Returns an error if no token is configured (the backend rejects
    /// anonymous calls anyway).
    pub fn try_from_env() -> std::result::Result<Self, String> {
        let Ok(api_token) = env::var("VITAE_API_TOKEN") else {
            return Err("No VITAE_API_TOKEN found in environment".to_string());
        };
        let base_url = env::var("VITAE_API_URL").unwrap_or_else(|_| DEFAULT_VITAE_URL.to_string());
        tracing::info!("[ProfileGateway] Initialized with URL: {}", base_url);
        Ok(Self::new(base_url, Some(api_token)))
    }

    /// Attaches the bearer token when one is configured.
    fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.api_token {
            request.header("Authorization", format!("Bearer {}", token))
        } else {
            request
        }
    }

    fn profiles_url(&self) -> String {
        format!("{}/profiles", self.base_url)
    }

    fn profile_url(&self, id: &str) -> String {
        format!("{}/profiles/{}", self.base_url, id)
    }
}

/// Maps a non-success response onto the structured error taxonomy.
async fn error_from_response(id: &str, response: Response) -> VitaeError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => VitaeError::not_authenticated(body),
        StatusCode::NOT_FOUND => VitaeError::not_found("profile", id),
        _ => VitaeError::transport(format!("HTTP {}: {}", status, body)),
    }
}

fn send_error(err: reqwest::Error) -> VitaeError {
    VitaeError::transport(err.to_string())
}

#[async_trait]
impl ProfileGateway for HttpProfileGateway {
    async fn list(&self) -> Result<Vec<Profile>> {
        let request = self.auth_request(
            self.client
                .get(self.profiles_url())
                .timeout(Duration::from_secs(10)),
        );
        let response = request.send().await.map_err(send_error)?;
        if !response.status().is_success() {
            return Err(error_from_response("", response).await);
        }
        let profiles: Vec<ProfileResponse> = response
            .json()
            .await
            .map_err(|e| VitaeError::transport(e.to_string()))?;
        Ok(profiles.into_iter().map(Into::into).collect())
    }

    async fn create(&self, name: &str, resume: &Resume) -> Result<Profile> {
        let body = CreateProfileRequest { name, resume };
        let request = self.auth_request(
            self.client
                .post(self.profiles_url())
                .json(&body)
                .timeout(Duration::from_secs(10)),
        );
        let response = request.send().await.map_err(send_error)?;
        if !response.status().is_success() {
            return Err(error_from_response("", response).await);
        }
        let created: ProfileResponse = response
            .json()
            .await
            .map_err(|e| VitaeError::transport(e.to_string()))?;
        tracing::info!("[ProfileGateway] Created profile {}", created.id);
        Ok(created.into())
    }

    async fn update(&self, id: &str, patch: ProfilePatch) -> Result<Profile> {
        let request = self.auth_request(
            self.client
                .patch(self.profile_url(id))
                .json(&patch)
                .timeout(Duration::from_secs(10)),
        );
        let response = request.send().await.map_err(send_error)?;
        if !response.status().is_success() {
            return Err(error_from_response(id, response).await);
        }
        let updated: ProfileResponse = response
            .json()
            .await
            .map_err(|e| VitaeError::transport(e.to_string()))?;
        Ok(updated.into())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let request = self.auth_request(
            self.client
                .delete(self.profile_url(id))
                .timeout(Duration::from_secs(10)),
        );
        let response = request.send().await.map_err(send_error)?;
        if !response.status().is_success() {
            return Err(error_from_response(id, response).await);
        }
        tracing::info!("[ProfileGateway] Deleted profile {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_maps_to_domain_profile() {
        let raw = serde_json::json!({
            "id": "p-1",
            "name": "Main",
            "resume": { "id": "r-1", "summary": "hello" },
            "updatedAt": 99
        });
        let response: ProfileResponse = serde_json::from_value(raw).unwrap();
        let profile: Profile = response.into();
        assert_eq!(profile.id, "p-1");
        assert_eq!(profile.resume.summary, "hello");
        assert!(!profile.is_active);
    }

    #[test]
    fn test_urls_are_per_profile() {
        let gateway = HttpProfileGateway::new("https://api.example.test", None);
        assert_eq!(
            gateway.profile_url("p-1"),
            "https://api.example.test/profiles/p-1"
        );
    }
}
