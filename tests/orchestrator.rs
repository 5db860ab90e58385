//! Claim Session Integration Tests
//!
//! Drives a full session against a scripted backend: validation guards,
//! success reset, failure retention, and response audio binding.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use claimvoice::adapters::{ClaimEndpoint, EndpointError, HealthReport};
use claimvoice::capture::CaptureFlag;
use claimvoice::core::{FormOrchestrator, SubmitRejection};
use claimvoice::domain::{
    AudioArtifact, ClaimReceipt, ClaimUpload, Notice, PlaybackResource, SubmissionStatus,
};
use claimvoice::playback::{MediaElement, MediaEvent, PlaybackError};
use tokio::sync::mpsc;

/// What the backend saw for one request
#[derive(Debug, Clone)]
struct RecordedCall {
    phone: String,
    file_name: String,
    digest: String,
}

/// Backend double answering from a script
#[derive(Default)]
struct ScriptedEndpoint {
    replies: Mutex<VecDeque<Result<ClaimReceipt, EndpointError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedEndpoint {
    fn replying(replies: Vec<Result<ClaimReceipt, EndpointError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClaimEndpoint for ScriptedEndpoint {
    fn describe(&self) -> String {
        "scripted".to_string()
    }

    async fn submit(&self, upload: &ClaimUpload<'_>) -> Result<ClaimReceipt, EndpointError> {
        self.calls.lock().unwrap().push(RecordedCall {
            phone: upload.phone.as_str().to_string(),
            file_name: upload.audio.file_name().to_string(),
            digest: upload.audio.digest().to_string(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(EndpointError::Transport("no scripted reply".to_string())))
    }

    async fn health_check(&self) -> Result<HealthReport, EndpointError> {
        Ok(HealthReport {
            message: "Insurance Claim Assistant API is running".to_string(),
        })
    }
}

/// Media element that records loads
#[derive(Default)]
struct SilentMedia {
    loaded: Vec<PlaybackResource>,
    events: Vec<mpsc::UnboundedSender<MediaEvent>>,
}

impl MediaElement for SilentMedia {
    fn load(&mut self, resource: &PlaybackResource) -> mpsc::UnboundedReceiver<MediaEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.loaded.push(resource.clone());
        self.events.push(tx);
        rx
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn unload(&mut self) {}
}

type Session = FormOrchestrator<ScriptedEndpoint, CaptureFlag, SilentMedia>;

fn session(replies: Vec<Result<ClaimReceipt, EndpointError>>) -> (Session, CaptureFlag) {
    let flag = CaptureFlag::new();
    let session = FormOrchestrator::new(
        ScriptedEndpoint::replying(replies),
        flag.clone(),
        SilentMedia::default(),
    );
    (session, flag)
}

fn two_second_recording() -> AudioArtifact {
    AudioArtifact::new(vec![7u8; 64_000]).with_duration(2.0)
}

fn accepted() -> Result<ClaimReceipt, EndpointError> {
    Ok(ClaimReceipt::parse(r#"{"ok":true}"#).unwrap())
}

fn server_error() -> Result<ClaimReceipt, EndpointError> {
    Err(EndpointError::Status {
        status: 500,
        body: r#"{"detail":"Pipeline execution failed"}"#.to_string(),
    })
}

#[tokio::test]
async fn test_successful_submission_resets_fields() {
    let (mut session, _flag) = session(vec![accepted()]);
    session.set_phone("+15551234567");
    session.on_recording_complete(two_second_recording());
    assert!(session.can_submit());

    let status = session.submit().await.unwrap();

    assert_eq!(status, SubmissionStatus::Success);
    assert!(session.phone().is_empty());
    assert!(session.audio().is_none());
    assert!(session.response_audio().is_none());
    assert!(!session.player().is_bound());
    assert_eq!(session.notice(), Some(&Notice::submitted()));
    assert_eq!(
        session.status_message(),
        Some("Your request has been processed successfully!")
    );

    let calls = session.endpoint().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].phone, "+15551234567");
    assert_eq!(calls[0].file_name, "recording.wav");
}

#[tokio::test]
async fn test_server_error_keeps_inputs_for_retry() {
    let (mut session, _flag) = session(vec![server_error(), accepted()]);
    let recording = two_second_recording();
    let digest = recording.digest().to_string();
    session.set_phone("+15551234567");
    session.on_recording_complete(recording);

    let status = session.submit().await.unwrap();

    assert_eq!(status, SubmissionStatus::Error);
    assert_eq!(session.phone().as_str(), "+15551234567");
    assert_eq!(session.audio().map(|a| a.digest().to_string()), Some(digest.clone()));
    assert_eq!(session.notice(), Some(&Notice::submission_failed()));
    assert_eq!(session.status_message(), Some("Processing failed. Please try again."));
    assert!(session.can_submit());

    // Retry with the unchanged inputs
    let status = session.submit().await.unwrap();
    assert_eq!(status, SubmissionStatus::Success);

    let calls = session.endpoint().calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].digest, digest);
}

#[tokio::test]
async fn test_transport_failure_is_error() {
    let (mut session, _flag) = session(vec![Err(EndpointError::Transport(
        "connection refused".to_string(),
    ))]);
    session.set_phone("+15551234567");
    session.on_recording_complete(two_second_recording());

    assert_eq!(session.submit().await.unwrap(), SubmissionStatus::Error);
    assert!(session.audio().is_some());
}

#[tokio::test]
async fn test_undecodable_body_is_error() {
    let (mut session, _flag) = session(vec![Err(EndpointError::Decode(
        "expected value at line 1 column 1".to_string(),
    ))]);
    session.set_phone("+15551234567");
    session.on_recording_complete(two_second_recording());

    assert_eq!(session.submit().await.unwrap(), SubmissionStatus::Error);
    assert_eq!(session.phone().as_str(), "+15551234567");
}

#[tokio::test]
async fn test_empty_phone_is_rejected_without_call() {
    let (mut session, _flag) = session(vec![accepted()]);
    session.on_recording_complete(two_second_recording());
    assert!(!session.can_submit());

    let result = session.submit().await;

    assert_eq!(result, Err(SubmitRejection::PhoneMissing));
    assert_eq!(session.status(), SubmissionStatus::Idle);
    assert_eq!(session.notice(), Some(&Notice::phone_required()));
    assert!(session.audio().is_some());
    assert!(session.endpoint().calls().is_empty());
}

#[tokio::test]
async fn test_missing_recording_is_rejected_without_call() {
    let (mut session, _flag) = session(vec![accepted()]);
    session.set_phone("+15551234567");

    let result = session.submit().await;

    assert_eq!(result, Err(SubmitRejection::RecordingMissing));
    assert_eq!(session.status(), SubmissionStatus::Idle);
    assert_eq!(session.notice(), Some(&Notice::recording_missing()));
    assert!(session.endpoint().calls().is_empty());
}

#[tokio::test]
async fn test_rejection_after_error_keeps_error_status() {
    let (mut session, _flag) = session(vec![server_error()]);
    session.set_phone("+15551234567");
    session.on_recording_complete(two_second_recording());
    session.submit().await.unwrap();

    session.set_phone("");
    assert_eq!(session.submit().await, Err(SubmitRejection::PhoneMissing));
    assert_eq!(session.status(), SubmissionStatus::Error);
    assert_eq!(session.endpoint().calls().len(), 1);
}

#[tokio::test]
async fn test_submit_blocked_while_recording() {
    let (mut session, flag) = session(vec![accepted()]);
    session.set_phone("+15551234567");
    session.on_recording_complete(two_second_recording());

    flag.set_active(true);
    assert!(!session.can_submit());
    assert!(!session.recording_ready());
    assert_eq!(session.submit().await, Err(SubmitRejection::RecordingInProgress));
    assert!(session.endpoint().calls().is_empty());

    flag.set_active(false);
    assert!(session.recording_ready());
    assert_eq!(session.submit().await, Ok(SubmissionStatus::Success));
}

#[tokio::test]
async fn test_new_recording_discards_previous() {
    let (mut session, _flag) = session(vec![]);
    session.on_recording_complete(two_second_recording());
    assert!(session.audio().is_some());

    session.on_recording_started();
    assert!(session.audio().is_none());

    let replacement = AudioArtifact::new(vec![9u8; 128]);
    let digest = replacement.digest().to_string();
    session.on_recording_complete(replacement);
    assert_eq!(session.audio().map(|a| a.digest()), Some(digest.as_str()));
    assert_eq!(session.notice(), Some(&Notice::recording_saved()));
}

#[tokio::test]
async fn test_response_audio_is_bound_for_playback() {
    let receipt =
        ClaimReceipt::parse(r#"{"status":"success","audio_url":"http://localhost:8000/reply.mp3"}"#)
            .unwrap();
    let (mut session, _flag) = session(vec![Ok(receipt)]);
    session.set_phone("+15551234567");
    session.on_recording_complete(two_second_recording());

    session.submit().await.unwrap();

    let resource = PlaybackResource::new("http://localhost:8000/reply.mp3");
    assert_eq!(session.response_audio(), Some(&resource));
    assert_eq!(session.player().resource(), Some(&resource));
    assert_eq!(session.player().element().loaded, vec![resource]);

    session.toggle_playback();
    assert!(session.player().is_playing());
}

#[tokio::test]
async fn test_second_claim_after_success() {
    let first = ClaimReceipt::parse(r#"{"audio_url":"http://localhost:8000/claim1.mp3"}"#).unwrap();
    let (mut session, _flag) = session(vec![Ok(first), accepted()]);

    session.set_phone("+15551234567");
    session.on_recording_complete(two_second_recording());
    assert_eq!(session.submit().await, Ok(SubmissionStatus::Success));
    assert!(session.player().is_bound());

    // Success is a legal entry state for the next claim
    assert!(!session.can_submit());
    session.set_phone("+15557654321");
    session.on_recording_started();
    session.on_recording_complete(AudioArtifact::new(vec![3u8; 256]));
    assert!(session.can_submit());

    assert_eq!(session.submit().await, Ok(SubmissionStatus::Success));

    let calls = session.endpoint().calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].phone, "+15557654321");
    assert_ne!(calls[0].digest, calls[1].digest);

    // The second reply carried no audio; the first claim's reply is gone
    assert!(session.response_audio().is_none());
    assert!(!session.player().is_bound());
    assert!(session.phone().is_empty());
    assert!(session.audio().is_none());
}

#[tokio::test]
async fn test_non_object_reply_is_success() {
    let (mut session, _flag) = session(vec![Ok(ClaimReceipt::parse("null").unwrap())]);
    session.set_phone("+15551234567");
    session.on_recording_complete(two_second_recording());

    assert_eq!(session.submit().await, Ok(SubmissionStatus::Success));
    assert!(session.phone().is_empty());
    assert!(session.response_audio().is_none());
}

#[tokio::test]
async fn test_submit_label_tracks_status() {
    let (session, _flag) = session(vec![]);
    assert_eq!(session.submit_label(), "Submit Claim Request");
    assert!(session.status_message().is_none());
}
