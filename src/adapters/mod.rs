//! Adapter interfaces for the claim backend.
//!
//! The submission pipeline only talks to the backend through
//! [`ClaimEndpoint`], so tests can script responses without a server.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ClaimReceipt, ClaimUpload};

// Re-export the HTTP adapter
pub use http::HttpClaimEndpoint;

/// Default submission endpoint of the backend
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/run_pipeline";

/// Failures talking to the backend.
///
/// The submission pipeline folds all of these into a single error status.
#[derive(Debug, Clone, Error)]
pub enum EndpointError {
    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode backend response: {0}")]
    Decode(String),
}

/// Backend reply to a health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub message: String,
}

/// Trait for claim submission backends
#[async_trait]
pub trait ClaimEndpoint: Send + Sync {
    /// Human-readable endpoint description (for logs)
    fn describe(&self) -> String;

    /// Send one claim upload; 2xx with a JSON body is success
    async fn submit(&self, upload: &ClaimUpload<'_>) -> Result<ClaimReceipt, EndpointError>;

    /// Check that the backend is reachable
    async fn health_check(&self) -> Result<HealthReport, EndpointError>;
}
