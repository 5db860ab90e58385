//! Recorded audio ready for upload.
//!
//! An artifact is produced once per recording session by the capture
//! boundary and is immutable afterwards.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Filename label every upload carries, regardless of the source file.
pub const RECORDING_FILE_NAME: &str = "recording.wav";

/// MIME type sent with the audio part
pub const RECORDING_MIME: &str = "audio/wav";

/// A finished audio recording
#[derive(Debug, Clone, PartialEq)]
pub struct AudioArtifact {
    /// Raw audio bytes (WAV container)
    bytes: Vec<u8>,

    /// Hex SHA-256 of `bytes`, used for log correlation
    digest: String,

    /// Duration in seconds, if the header could be read
    duration_secs: Option<f64>,

    /// When the recording finished
    recorded_at: DateTime<Utc>,
}

impl AudioArtifact {
    /// Wrap finished recording bytes
    pub fn new(bytes: Vec<u8>) -> Self {
        let digest = hex::encode(Sha256::digest(&bytes));
        Self {
            bytes,
            digest,
            duration_secs: None,
            recorded_at: Utc::now(),
        }
    }

    /// Attach a known duration
    pub fn with_duration(mut self, duration_secs: f64) -> Self {
        self.duration_secs = Some(duration_secs);
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The filename label sent with the upload
    pub fn file_name(&self) -> &'static str {
        RECORDING_FILE_NAME
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// First 8 hex chars of the digest
    pub fn short_id(&self) -> &str {
        &self.digest[..8]
    }

    pub fn duration_secs(&self) -> Option<f64> {
        self.duration_secs
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
