//! Capture boundary: the microphone side of the client.
//!
//! The core never records audio itself. A collaborator owns the capture
//! device, reports whether it is active, and hands over exactly one
//! [`AudioArtifact`] per finished recording.
//!
//! ```text
//! collaborator ──start──▶ CaptureFlag (true)
//!              ──stop───▶ CaptureFlag (false) ──artifact──▶ FormOrchestrator
//! ```

pub mod wav_file;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

// Re-export
pub use wav_file::WavFileCapture;

/// Read-only view of a capture collaborator
pub trait CaptureBoundary: Send + Sync {
    /// Whether a recording is currently in progress
    fn is_active(&self) -> bool;
}

/// Shared recording flag.
///
/// Clones share storage. The collaborator mutates it; the orchestrator
/// only reads it through [`CaptureBoundary`].
#[derive(Debug, Clone, Default)]
pub struct CaptureFlag {
    active: Arc<AtomicBool>,
}

impl CaptureFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set by the collaborator when capture starts or stops
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }
}

impl CaptureBoundary for CaptureFlag {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Errors producing an artifact
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Recording is empty: {0}")]
    Empty(String),

    #[error("Recording too large: {actual} bytes > {limit} bytes")]
    TooLarge { actual: u64, limit: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
