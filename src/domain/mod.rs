//! Domain types for the claim client.
//!
//! This module contains the core data structures:
//! - Artifact: Recorded audio ready for upload
//! - Claim: Phone number, packaged upload, backend receipt
//! - Status: Submission lifecycle
//! - Notice: User-visible messages

pub mod artifact;
pub mod claim;
pub mod notice;
pub mod status;

// Re-export commonly used types
pub use artifact::{AudioArtifact, RECORDING_FILE_NAME, RECORDING_MIME};
pub use claim::{ClaimReceipt, ClaimUpload, PhoneNumber, PlaybackResource, AUDIO_FIELD, PHONE_FIELD};
pub use notice::{Notice, Severity};
pub use status::SubmissionStatus;
