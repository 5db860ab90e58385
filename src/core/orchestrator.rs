//! Session orchestrator.
//!
//! Holds the fields of one claim session (phone, recording, response
//! audio) and wires user actions to the submission pipeline and the
//! playback controller. Everything here runs on one task; the only
//! suspension point is the network call inside [`FormOrchestrator::submit`].

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::adapters::ClaimEndpoint;
use crate::capture::CaptureBoundary;
use crate::domain::{AudioArtifact, Notice, PhoneNumber, PlaybackResource, SubmissionStatus};
use crate::playback::{MediaElement, PlaybackController};

use super::pipeline::{ClaimSubmissionPipeline, SubmissionOutcome, SubmitRejection};

/// One claim session
pub struct FormOrchestrator<E, C, M>
where
    E: ClaimEndpoint,
    C: CaptureBoundary,
    M: MediaElement,
{
    /// Correlates log lines for this session
    session_id: Uuid,

    phone: PhoneNumber,
    audio: Option<AudioArtifact>,
    response_audio: Option<PlaybackResource>,

    capture: C,
    pipeline: ClaimSubmissionPipeline<E>,
    player: PlaybackController<M>,

    /// Most recent user-visible message
    notice: Option<Notice>,
}

impl<E, C, M> FormOrchestrator<E, C, M>
where
    E: ClaimEndpoint,
    C: CaptureBoundary,
    M: MediaElement,
{
    /// Start a session
    pub fn new(endpoint: E, capture: C, media: M) -> Self {
        let session_id = Uuid::new_v4();
        info!(%session_id, endpoint = %endpoint.describe(), "Claim session started");

        Self {
            session_id,
            phone: PhoneNumber::default(),
            audio: None,
            response_audio: None,
            capture,
            pipeline: ClaimSubmissionPipeline::new(endpoint),
            player: PlaybackController::new(media),
            notice: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    // ------------------------------------------------------------------
    // User actions
    // ------------------------------------------------------------------

    pub fn set_phone(&mut self, phone: impl Into<PhoneNumber>) {
        self.phone = phone.into();
    }

    /// A new capture started; any held recording is discarded
    pub fn on_recording_started(&mut self) {
        if let Some(old) = self.audio.take() {
            debug!(session_id = %self.session_id, audio = %old.short_id(), "Discarding previous recording");
        }
    }

    /// The capture boundary delivered a finished recording
    pub fn on_recording_complete(&mut self, artifact: AudioArtifact) {
        info!(
            session_id = %self.session_id,
            audio = %artifact.short_id(),
            bytes = artifact.len(),
            "Recording stored"
        );
        self.audio = Some(artifact);
        self.notice = Some(Notice::recording_saved());
    }

    /// Submit the current phone number and recording.
    ///
    /// Rejections leave every field and the status unchanged. On success the
    /// phone and recording are cleared and any response audio is bound for
    /// playback; on failure both are kept so the user can retry.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn submit(&mut self) -> Result<SubmissionStatus, SubmitRejection> {
        let result = if self.capture.is_active() {
            Err(SubmitRejection::RecordingInProgress)
        } else {
            self.pipeline.submit(&self.phone, self.audio.as_ref()).await
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(rejection) => {
                info!(reason = %rejection, "Submission rejected");
                self.notice = Some(rejection.notice());
                return Err(rejection);
            }
        };

        match outcome {
            SubmissionOutcome::Accepted(receipt) => {
                self.phone.clear();
                self.audio = None;
                self.response_audio = receipt.playback_resource();
                self.player.bind(self.response_audio.clone());
                self.notice = Some(Notice::submitted());
            }
            SubmissionOutcome::Failed(_) => {
                self.notice = Some(Notice::submission_failed());
            }
        }

        Ok(self.pipeline.status())
    }

    /// Toggle playback of the response audio
    pub fn toggle_playback(&mut self) {
        self.player.toggle_play_pause();
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn audio(&self) -> Option<&AudioArtifact> {
        self.audio.as_ref()
    }

    pub fn response_audio(&self) -> Option<&PlaybackResource> {
        self.response_audio.as_ref()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.pipeline.status()
    }

    pub fn is_recording(&self) -> bool {
        self.capture.is_active()
    }

    /// Whether the submit action should be enabled
    pub fn can_submit(&self) -> bool {
        !self.is_recording()
            && self.audio.is_some()
            && !self.phone.is_empty()
            && self.status() != SubmissionStatus::Processing
    }

    /// A recording is held and capture is idle
    pub fn recording_ready(&self) -> bool {
        self.audio.is_some() && !self.is_recording()
    }

    /// Persistent status line for finished submissions
    pub fn status_message(&self) -> Option<&'static str> {
        match self.status() {
            SubmissionStatus::Success => Some("Your request has been processed successfully!"),
            SubmissionStatus::Error => Some("Processing failed. Please try again."),
            SubmissionStatus::Idle | SubmissionStatus::Processing => None,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.status() == SubmissionStatus::Processing {
            "Processing Your Request..."
        } else {
            "Submit Claim Request"
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Take the latest notice for presentation
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn player(&self) -> &PlaybackController<M> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlaybackController<M> {
        &mut self.player
    }

    pub fn endpoint(&self) -> &E {
        self.pipeline.endpoint()
    }
}
