//! HTTP adapter posting claims to the backend pipeline.
//!
//! Endpoint: POST {url} (multipart: `phone` text, `audio` file)
//! Health:   GET  {origin}/

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{ClaimEndpoint, EndpointError, HealthReport};
use crate::domain::{ClaimReceipt, ClaimUpload, AUDIO_FIELD, PHONE_FIELD, RECORDING_MIME};

/// Claim backend reached over HTTP
pub struct HttpClaimEndpoint {
    /// Submission URL
    url: Url,
    /// HTTP client
    client: reqwest::Client,
}

/// Body of the backend root route
#[derive(Debug, Deserialize)]
struct RootResponse {
    #[serde(default)]
    message: String,
}

impl HttpClaimEndpoint {
    /// Create a client for a submission URL
    pub fn new(url: &str) -> Result<Self, EndpointError> {
        let url = Url::parse(url).map_err(|e| EndpointError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(EndpointError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(Self {
            url,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Root of the backend origin, used for health checks
    fn root_url(&self) -> Result<Url, EndpointError> {
        self.url.join("/").map_err(|e| EndpointError::InvalidUrl {
            url: self.url.to_string(),
            reason: e.to_string(),
        })
    }

    /// Build the multipart body for an upload
    fn build_form(upload: &ClaimUpload<'_>) -> Result<Form, EndpointError> {
        let audio_part = Part::bytes(upload.audio.bytes().to_vec())
            .file_name(upload.audio.file_name())
            .mime_str(RECORDING_MIME)
            .map_err(|e| EndpointError::Transport(e.to_string()))?;

        Ok(Form::new()
            .text(PHONE_FIELD, upload.phone.as_str().to_string())
            .part(AUDIO_FIELD, audio_part))
    }
}

#[async_trait]
impl ClaimEndpoint for HttpClaimEndpoint {
    fn describe(&self) -> String {
        format!("POST {}", self.url)
    }

    #[instrument(skip(self, upload), fields(audio = %upload.audio.short_id(), phone = %upload.phone.masked()))]
    async fn submit(&self, upload: &ClaimUpload<'_>) -> Result<ClaimReceipt, EndpointError> {
        let form = Self::build_form(upload)?;

        debug!(url = %self.url, bytes = upload.audio.len(), "Posting claim");

        let response = self
            .client
            .post(self.url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| EndpointError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_detail(&response.text().await.unwrap_or_default());
            warn!(status = status.as_u16(), detail = %body, "Backend rejected claim");
            return Err(EndpointError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| EndpointError::Transport(e.to_string()))?;

        ClaimReceipt::parse(&body).map_err(|e| EndpointError::Decode(e.to_string()))
    }

    async fn health_check(&self) -> Result<HealthReport, EndpointError> {
        let root = self.root_url()?;

        let response = self
            .client
            .get(root)
            .send()
            .await
            .map_err(|e| EndpointError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_detail(&response.text().await.unwrap_or_default());
            return Err(EndpointError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let root: RootResponse = response
            .json()
            .await
            .map_err(|e| EndpointError::Decode(e.to_string()))?;

        Ok(HealthReport {
            message: root.message,
        })
    }
}

/// Pull `detail` out of an error body, falling back to the raw text
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| match value.get("detail") {
            Some(serde_json::Value::String(detail)) => Some(detail.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        })
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AudioArtifact, PhoneNumber};

    #[test]
    fn test_endpoint_url_validation() {
        assert!(HttpClaimEndpoint::new("http://localhost:8000/run_pipeline").is_ok());
        assert!(matches!(
            HttpClaimEndpoint::new("not a url"),
            Err(EndpointError::InvalidUrl { .. })
        ));
        assert!(matches!(
            HttpClaimEndpoint::new("ftp://localhost/run_pipeline"),
            Err(EndpointError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_root_url() {
        let endpoint = HttpClaimEndpoint::new("http://localhost:8000/run_pipeline").unwrap();
        assert_eq!(endpoint.root_url().unwrap().as_str(), "http://localhost:8000/");
        assert_eq!(endpoint.describe(), "POST http://localhost:8000/run_pipeline");
    }

    #[test]
    fn test_error_detail() {
        assert_eq!(
            error_detail(r#"{"detail":"Invalid phone number"}"#),
            "Invalid phone number"
        );
        assert_eq!(error_detail("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_detail(r#"{"error":"x"}"#), r#"{"error":"x"}"#);
    }

    #[test]
    fn test_build_form() {
        let phone = PhoneNumber::from("+15551234567");
        let audio = AudioArtifact::new(vec![0u8; 16]);
        let upload = ClaimUpload::new(&phone, &audio);
        let form = HttpClaimEndpoint::build_form(&upload).unwrap();
        assert!(!form.boundary().is_empty());
    }
}
