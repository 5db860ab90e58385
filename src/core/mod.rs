//! Core claim-session logic.
//!
//! This module contains:
//! - Pipeline: Input validation, upload, submission status
//! - Orchestrator: Session fields wired to the pipeline and playback

pub mod orchestrator;
pub mod pipeline;

// Re-export commonly used types
pub use orchestrator::FormOrchestrator;
pub use pipeline::{ClaimSubmissionPipeline, SubmissionOutcome, SubmitRejection};
