//! WAV-file backed capture source.
//!
//! Stands in for a live microphone on the command line: "recording"
//! loads a finished WAV file and delivers it as the artifact.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{CaptureBoundary, CaptureError, CaptureFlag};
use crate::domain::AudioArtifact;

/// Default upper bound on an artifact (25 MiB)
pub const DEFAULT_MAX_ARTIFACT_BYTES: u64 = 25 * 1024 * 1024;

/// Capture collaborator that reads a WAV file from disk
pub struct WavFileCapture {
    path: PathBuf,
    flag: CaptureFlag,
    max_bytes: u64,
}

impl WavFileCapture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            flag: CaptureFlag::new(),
            max_bytes: DEFAULT_MAX_ARTIFACT_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Shared flag, for wiring into an orchestrator
    pub fn flag(&self) -> CaptureFlag {
        self.flag.clone()
    }

    /// Run one capture session and produce the artifact.
    ///
    /// The flag is raised for the duration of the load and always lowered
    /// before returning.
    pub async fn record(&self) -> Result<AudioArtifact, CaptureError> {
        self.flag.set_active(true);
        let result = self.load().await;
        self.flag.set_active(false);
        result
    }

    async fn load(&self) -> Result<AudioArtifact, CaptureError> {
        let metadata = tokio::fs::metadata(&self.path).await?;
        let size = metadata.len();

        if size == 0 {
            return Err(CaptureError::Empty(self.path.display().to_string()));
        }
        if size > self.max_bytes {
            return Err(CaptureError::TooLarge {
                actual: size,
                limit: self.max_bytes,
            });
        }

        let bytes = tokio::fs::read(&self.path).await?;
        let duration = wav_duration_secs(&bytes);
        let mut artifact = AudioArtifact::new(bytes);
        if let Some(secs) = duration {
            artifact = artifact.with_duration(secs);
        } else {
            debug!(path = %self.path.display(), "WAV header unreadable, duration unknown");
        }

        info!(
            id = %artifact.short_id(),
            bytes = artifact.len(),
            duration_secs = ?artifact.duration_secs(),
            "Recording captured"
        );

        Ok(artifact)
    }
}

impl CaptureBoundary for WavFileCapture {
    fn is_active(&self) -> bool {
        self.flag.is_active()
    }
}

/// Duration of an in-memory WAV file, if its header parses
pub fn wav_duration_secs(bytes: &[u8]) -> Option<f64> {
    let reader = hound::WavReader::new(Cursor::new(bytes)).ok()?;
    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return None;
    }
    // duration() counts frames (samples per channel)
    Some(reader.duration() as f64 / spec.sample_rate as f64)
}
