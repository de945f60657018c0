//! AI parsing/tailoring service contract.
//!
//! The backing service is a black box that either returns a well-formed
//! document or fragment, or fails. The safe-fallback convention for callers:
//! on any failure the original text is used unchanged, so a degraded AI
//! backend never corrupts the document.

use async_trait::async_trait;

use crate::error::Result;
use crate::resume::Resume;

/// An abstract AI-backed parsing and tailoring service.
#[async_trait]
pub trait TailoringService: Send + Sync {
    /// Parses free text (an imported resume) into a document.
    async fn parse_resume(&self, raw_text: &str) -> Result<Resume>;

    /// Rewrites a summary toward a job description.
    async fn tailor_summary(&self, summary: &str, job_description: &str) -> Result<String>;

    /// Rewrites a single bullet toward a job description.
    async fn tailor_bullet(&self, bullet: &str, job_description: &str) -> Result<String>;
}

/// Tailors a summary, falling back to the original on failure.
pub async fn tailor_summary_or_original(
    service: &dyn TailoringService,
    summary: &str,
    job_description: &str,
) -> String {
    match service.tailor_summary(summary, job_description).await {
        Ok(tailored) => tailored,
        Err(err) => {
            tracing::warn!("[Tailoring] summary rewrite failed, keeping original: {}", err);
            summary.to_string()
        }
    }
}

/// Tailors a bullet, falling back to the original on failure.
pub async fn tailor_bullet_or_original(
    service: &dyn TailoringService,
    bullet: &str,
    job_description: &str,
) -> String {
    match service.tailor_bullet(bullet, job_description).await {
        Ok(tailored) => tailored,
        Err(err) => {
            tracing::warn!("[Tailoring] bullet rewrite failed, keeping original: {}", err);
            bullet.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VitaeError;

    struct FailingService;

    #[async_trait]
    impl TailoringService for FailingService {
        async fn parse_resume(&self, _raw_text: &str) -> Result<Resume> {
            Err(VitaeError::transport("backend down"))
        }

        async fn tailor_summary(&self, _summary: &str, _job: &str) -> Result<String> {
            Err(VitaeError::transport("backend down"))
        }

        async fn tailor_bullet(&self, _bullet: &str, _job: &str) -> Result<String> {
            Err(VitaeError::transport("backend down"))
        }
    }

    #[tokio::test]
    async fn test_fallback_returns_original_text() {
        let service = FailingService;
        let out = tailor_summary_or_original(&service, "original", "job").await;
        assert_eq!(out, "original");
        let out = tailor_bullet_or_original(&service, "bullet", "job").await;
        assert_eq!(out, "bullet");
    }
}
