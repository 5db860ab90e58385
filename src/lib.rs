//! claimvoice - Voice insurance-claim client
//!
//! Records a spoken claim, submits it together with a phone number to
//! the claims backend, and plays back any audio the backend returns.
//!
//! # Architecture
//!
//! One session object drives everything:
//! - A capture collaborator delivers a finished recording
//! - The submission pipeline validates, uploads, and tracks status
//! - The playback controller presents the response audio
//!
//! # Modules
//!
//! - `adapters`: Backend integration (HTTP multipart upload)
//! - `capture`: Capture boundary and the WAV file source
//! - `core`: Submission pipeline and session orchestrator
//! - `domain`: Data structures (AudioArtifact, PhoneNumber, SubmissionStatus)
//! - `playback`: Response audio controller
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Submit a claim
//! claimvoice submit --phone +15551234567 --audio claim.wav
//!
//! # Check the backend
//! claimvoice health
//! ```

pub mod adapters;
pub mod capture;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod playback;

// Re-export main types at crate root for convenience
pub use adapters::{ClaimEndpoint, EndpointError, HttpClaimEndpoint};
pub use capture::{CaptureBoundary, CaptureFlag, WavFileCapture};
pub use core::{ClaimSubmissionPipeline, FormOrchestrator, SubmissionOutcome, SubmitRejection};
pub use domain::{AudioArtifact, ClaimReceipt, Notice, PhoneNumber, PlaybackResource, SubmissionStatus};
pub use playback::{format_time, MediaElement, MediaEvent, PlaybackController};
