//! Response audio playback.
//!
//! - Controller: play/pause flag, position tracking, display snapshot
//! - Media: the element seam and a headless element for terminals

pub mod controller;
pub mod media;

pub use controller::{format_time, PlaybackController, PlaybackPosition, PlaybackView};
pub use media::{HeadlessMedia, MediaElement, MediaEvent, PlaybackError};
