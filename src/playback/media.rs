//! Media element seam.
//!
//! A media element plays one source at a time and reports progress
//! through a channel handed out by [`MediaElement::load`]. Dropping the
//! receiver detaches every listener for that source at once.

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::info;

use crate::domain::PlaybackResource;

/// Lifecycle signals from a loaded source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// Playback position advanced (seconds)
    TimeUpdate(f64),

    /// Metadata loaded; carries the duration in seconds
    LoadedMetadata(f64),

    /// Playback reached the end
    Ended,
}

/// Errors from media requests
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("Play request rejected: {0}")]
    Rejected(String),

    #[error("No audio output available")]
    Unsupported,
}

/// Something that can play a [`PlaybackResource`]
pub trait MediaElement {
    /// Switch to a new source and subscribe to its lifecycle signals
    fn load(&mut self, resource: &PlaybackResource) -> mpsc::UnboundedReceiver<MediaEvent>;

    /// Request playback to start
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Request playback to pause
    fn pause(&mut self);

    /// Release the current source
    fn unload(&mut self);
}

/// Media element for terminals without an audio sink.
///
/// Loading only records the locator so the caller can print it; play
/// requests are rejected.
#[derive(Debug, Default)]
pub struct HeadlessMedia {
    source: Option<PlaybackResource>,
    events: Option<mpsc::UnboundedSender<MediaEvent>>,
}

impl HeadlessMedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently loaded locator
    pub fn source(&self) -> Option<&PlaybackResource> {
        self.source.as_ref()
    }
}

impl MediaElement for HeadlessMedia {
    fn load(&mut self, resource: &PlaybackResource) -> mpsc::UnboundedReceiver<MediaEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        info!(source = %resource, "Response audio available");
        self.source = Some(resource.clone());
        self.events = Some(tx);
        rx
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        Err(PlaybackError::Unsupported)
    }

    fn pause(&mut self) {}

    fn unload(&mut self) {
        self.source = None;
        self.events = None;
    }
}
