//! Claim submission pipeline.
//!
//! Drives the four-state submission lifecycle:
//!
//! ```text
//! idle ──▶ processing ──▶ success ──┐
//!   ▲          │                     │
//!   │          └──────▶ error ───────┤
//!   └────────────────────────────────┘ (new submission re-enters processing)
//! ```
//!
//! A submission is split into [`begin`](ClaimSubmissionPipeline::begin),
//! which validates and enters `processing`, and
//! [`finish`](ClaimSubmissionPipeline::finish), which records the outcome.
//! [`submit`](ClaimSubmissionPipeline::submit) runs both around the single
//! network call. There is no retry, timeout, or cancellation: a request
//! that never completes leaves the pipeline in `processing`.

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::adapters::{ClaimEndpoint, EndpointError};
use crate::domain::{AudioArtifact, ClaimReceipt, ClaimUpload, Notice, PhoneNumber, SubmissionStatus};

/// Why a submission was not started.
///
/// Rejections never change the submission status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    #[error("Phone number required")]
    PhoneMissing,

    #[error("No recording found")]
    RecordingMissing,

    #[error("Recording still in progress")]
    RecordingInProgress,

    #[error("A submission is already in progress")]
    InFlight,
}

impl SubmitRejection {
    /// User-visible message for this rejection
    pub fn notice(&self) -> Notice {
        match self {
            Self::PhoneMissing => Notice::phone_required(),
            Self::RecordingMissing => Notice::recording_missing(),
            Self::RecordingInProgress => Notice::recording_in_progress(),
            Self::InFlight => Notice::submission_in_progress(),
        }
    }
}

/// Result of a submission that reached the backend
#[derive(Debug, Clone)]
pub enum SubmissionOutcome {
    /// 2xx with a decodable body
    Accepted(ClaimReceipt),

    /// Transport failure, non-2xx, or undecodable body
    Failed(EndpointError),
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Validates claim inputs, sends them, and tracks the status
pub struct ClaimSubmissionPipeline<E: ClaimEndpoint> {
    endpoint: E,
    status: SubmissionStatus,
}

impl<E: ClaimEndpoint> ClaimSubmissionPipeline<E> {
    pub fn new(endpoint: E) -> Self {
        Self {
            endpoint,
            status: SubmissionStatus::Idle,
        }
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// Validate inputs and enter `processing`.
    ///
    /// Checks run in order: in-flight guard, phone, recording. The first
    /// failure wins and the status is left untouched.
    pub fn begin<'a>(
        &mut self,
        phone: &'a PhoneNumber,
        audio: Option<&'a AudioArtifact>,
    ) -> Result<ClaimUpload<'a>, SubmitRejection> {
        if !self.status.can_start() {
            return Err(SubmitRejection::InFlight);
        }
        if phone.is_empty() {
            return Err(SubmitRejection::PhoneMissing);
        }
        let audio = audio.ok_or(SubmitRejection::RecordingMissing)?;

        self.transition(SubmissionStatus::Processing);
        Ok(ClaimUpload::new(phone, audio))
    }

    /// Record the backend's answer and leave `processing`.
    ///
    /// Called outside `processing` the status is left as is.
    pub fn finish(&mut self, result: Result<ClaimReceipt, EndpointError>) -> SubmissionOutcome {
        let (next, outcome) = match result {
            Ok(receipt) => (SubmissionStatus::Success, SubmissionOutcome::Accepted(receipt)),
            Err(e) => (SubmissionStatus::Error, SubmissionOutcome::Failed(e)),
        };

        if self.status == SubmissionStatus::Processing {
            self.transition(next);
        } else {
            warn!(status = %self.status, "Submission result arrived outside processing, ignored");
        }

        outcome
    }

    /// Validate, send once, and record the outcome
    #[instrument(skip_all, fields(endpoint = %self.endpoint.describe()))]
    pub async fn submit(
        &mut self,
        phone: &PhoneNumber,
        audio: Option<&AudioArtifact>,
    ) -> Result<SubmissionOutcome, SubmitRejection> {
        let upload = self.begin(phone, audio)?;

        info!(
            phone = %upload.phone.masked(),
            audio = %upload.audio.short_id(),
            bytes = upload.audio.len(),
            "Submitting claim"
        );

        let result = self.endpoint.submit(&upload).await;
        if let Err(ref e) = result {
            warn!(error = %e, "Claim submission failed");
        }

        Ok(self.finish(result))
    }

    /// Return to `idle` from a finished state
    pub fn reset(&mut self) {
        if self.status != SubmissionStatus::Idle {
            self.transition(SubmissionStatus::Idle);
        }
    }

    fn transition(&mut self, to: SubmissionStatus) {
        if !self.status.can_transition_to(to) {
            warn!(from = %self.status, to = %to, "Invalid submission transition, ignored");
            return;
        }
        info!(from = %self.status, to = %to, "Submission status changed");
        self.status = to;
    }
}
