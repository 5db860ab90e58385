//! Playback of the backend's response audio.
//!
//! The controller owns the play/pause flag and the position/duration
//! pair for one bound resource. The flag is optimistic: it flips as soon
//! as the user toggles, and is only corrected by the `Ended` signal.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::media::{MediaElement, MediaEvent};
use crate::domain::PlaybackResource;

/// Position within the bound resource (seconds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackPosition {
    pub current_time: f64,

    /// NaN until metadata arrives
    pub duration: f64,
}

impl PlaybackPosition {
    /// Position of a freshly bound resource
    pub fn start() -> Self {
        Self {
            current_time: 0.0,
            duration: f64::NAN,
        }
    }

    /// Fraction played; NaN while the duration is 0 or unknown
    pub fn progress(&self) -> f64 {
        if self.duration.is_finite() && self.duration > 0.0 {
            self.current_time / self.duration
        } else {
            f64::NAN
        }
    }
}

impl Default for PlaybackPosition {
    fn default() -> Self {
        Self::start()
    }
}

/// Snapshot for display
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackView {
    pub resource: PlaybackResource,
    pub playing: bool,

    /// Fraction in [0, 1]; NaN renders as an empty bar
    pub progress: f64,
    pub elapsed: String,
    pub total: String,
}

struct Binding {
    resource: PlaybackResource,
    events: mpsc::UnboundedReceiver<MediaEvent>,
}

/// Play/pause and progress tracking for one response resource
pub struct PlaybackController<M: MediaElement> {
    element: M,
    binding: Option<Binding>,
    playing: bool,
    position: PlaybackPosition,
}

impl<M: MediaElement> PlaybackController<M> {
    pub fn new(element: M) -> Self {
        Self {
            element,
            binding: None,
            playing: false,
            position: PlaybackPosition::start(),
        }
    }

    /// Attach to a resource, replacing any previous one.
    ///
    /// `None` only detaches. Re-binding the resource that is already bound
    /// keeps the current subscription.
    pub fn bind(&mut self, resource: Option<PlaybackResource>) {
        if let (Some(current), Some(next)) = (&self.binding, &resource) {
            if current.resource == *next {
                return;
            }
        }

        self.unbind();

        let Some(resource) = resource else {
            return;
        };

        debug!(source = %resource, "Binding playback resource");
        let events = self.element.load(&resource);
        self.binding = Some(Binding { resource, events });
        self.position = PlaybackPosition::start();
        self.playing = false;
    }

    /// Detach from the current resource, dropping its subscription
    pub fn unbind(&mut self) {
        if let Some(binding) = self.binding.take() {
            debug!(source = %binding.resource, "Unbinding playback resource");
            drop(binding.events);
            self.element.unload();
            self.position = PlaybackPosition::start();
            self.playing = false;
        }
    }

    /// Flip between playing and paused.
    ///
    /// The flag changes immediately; a rejected play request is logged and
    /// otherwise ignored. No-op while unbound.
    pub fn toggle_play_pause(&mut self) {
        if self.binding.is_none() {
            return;
        }

        if self.playing {
            self.element.pause();
        } else if let Err(e) = self.element.play() {
            warn!(error = %e, "Play request failed");
        }
        self.playing = !self.playing;
    }

    /// Apply every lifecycle signal queued so far; returns how many
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self
            .binding
            .as_mut()
            .and_then(|binding| binding.events.try_recv().ok())
        {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next lifecycle signal and apply it.
    ///
    /// Returns `None` when unbound or when the element closed the stream.
    pub async fn next_event(&mut self) -> Option<MediaEvent> {
        let event = self.binding.as_mut()?.events.recv().await?;
        self.apply(event);
        Some(event)
    }

    fn apply(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate(time) => self.position.current_time = time,
            MediaEvent::LoadedMetadata(duration) => self.position.duration = duration,
            MediaEvent::Ended => self.playing = false,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub fn resource(&self) -> Option<&PlaybackResource> {
        self.binding.as_ref().map(|binding| &binding.resource)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> PlaybackPosition {
        self.position
    }

    pub fn element(&self) -> &M {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut M {
        &mut self.element
    }

    /// Display snapshot; `None` renders nothing
    pub fn view(&self) -> Option<PlaybackView> {
        let binding = self.binding.as_ref()?;
        Some(PlaybackView {
            resource: binding.resource.clone(),
            playing: self.playing,
            progress: self.position.progress(),
            elapsed: format_time(self.position.current_time),
            total: format_time(self.position.duration),
        })
    }
}

impl<M: MediaElement> Drop for PlaybackController<M> {
    fn drop(&mut self) {
        self.unbind();
    }
}

/// Format seconds as `m:ss`.
///
/// Minutes are unpadded and may exceed 59. Unknown or negative times
/// render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
