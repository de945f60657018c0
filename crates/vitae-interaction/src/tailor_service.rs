//! HTTP implementation of the AI parsing/tailoring service.
//!
//! The backend does the actual language work; this adapter only ships text
//! back and forth. Callers are expected to use the `*_or_original` fallback
//! helpers from `vitae_core::tailor` so a degraded backend never corrupts
//! the document.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use vitae_core::error::{Result, VitaeError};
use vitae_core::resume::Resume;
use vitae_core::tailor::TailoringService;

/// Tailoring service backed by the vitae AI endpoints.
#[derive(Clone)]
pub struct HttpTailoringService {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct RewriteRequest<'a> {
    text: &'a str,
    job_description: &'a str,
}

#[derive(Debug, Deserialize)]
struct RewriteResponse {
    text: String,
}

#[derive(Debug, Serialize)]
struct ParseRequest<'a> {
    raw_text: &'a str,
}

impl HttpTailoringService {
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_token,
        }
    }

    fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.api_token {
            request.header("Authorization", format!("Bearer {}", token))
        } else {
            request
        }
    }

    async fn rewrite(&self, endpoint: &str, text: &str, job_description: &str) -> Result<String> {
        let url = format!("{}/tailor/{}", self.base_url, endpoint);
        let body = RewriteRequest {
            text,
            job_description,
        };
        let request = self.auth_request(
            self.client
                .post(&url)
                .json(&body)
                .timeout(Duration::from_secs(30)),
        );
        let response = request
            .send()
            .await
            .map_err(|e| VitaeError::transport(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VitaeError::transport(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }
        let rewritten: RewriteResponse = response
            .json()
            .await
            .map_err(|e| VitaeError::transport(e.to_string()))?;
        Ok(rewritten.text)
    }
}

#[async_trait]
impl TailoringService for HttpTailoringService {
    async fn parse_resume(&self, raw_text: &str) -> Result<Resume> {
        let url = format!("{}/parse", self.base_url);
        let body = ParseRequest { raw_text };
        let request = self.auth_request(
            self.client
                .post(&url)
                .json(&body)
                .timeout(Duration::from_secs(30)),
        );
        let response = request
            .send()
            .await
            .map_err(|e| VitaeError::transport(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VitaeError::transport(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }
        let resume: Resume = response
            .json()
            .await
            .map_err(|e| VitaeError::transport(e.to_string()))?;
        tracing::info!("[Tailoring] Parsed imported resume {}", resume.id);
        Ok(resume)
    }

    async fn tailor_summary(&self, summary: &str, job_description: &str) -> Result<String> {
        self.rewrite("summary", summary, job_description).await
    }

    async fn tailor_bullet(&self, bullet: &str, job_description: &str) -> Result<String> {
        self.rewrite("bullet", bullet, job_description).await
    }
}
