//! Claim inputs, the packaged upload, and the backend's receipt.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::artifact::AudioArtifact;

/// Multipart field carrying the phone number
pub const PHONE_FIELD: &str = "phone";

/// Multipart field carrying the audio bytes
pub const AUDIO_FIELD: &str = "audio";

/// Phone number as typed by the user.
///
/// Only presence is checked; format is the backend's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Log-safe form: everything but the last four characters hidden
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        let keep = chars.len().min(4);
        let hidden = chars.len() - keep;
        let tail: String = chars[hidden..].iter().collect();
        format!("{}{}", "*".repeat(hidden), tail)
    }
}

impl From<&str> for PhoneNumber {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PhoneNumber {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// The single payload sent to the submission endpoint.
///
/// Borrows the session's inputs so they stay intact for a retry.
#[derive(Debug, Clone, Copy)]
pub struct ClaimUpload<'a> {
    pub phone: &'a PhoneNumber,
    pub audio: &'a AudioArtifact,
}

impl<'a> ClaimUpload<'a> {
    pub fn new(phone: &'a PhoneNumber, audio: &'a AudioArtifact) -> Self {
        Self { phone, audio }
    }
}

/// Locator for response audio the user can play back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaybackResource(String);

impl PlaybackResource {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaybackResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// JSON body of a successful submission.
///
/// Any parseable JSON counts as accepted. The known fields are picked out
/// when they are strings; anything else about the body is kept raw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimReceipt {
    pub status: Option<String>,
    pub message: Option<String>,

    /// Phone number echoed back by the backend
    pub phone: Option<String>,

    /// Response audio, when the backend provides one
    pub audio_url: Option<String>,

    /// Body as returned
    pub body: Value,
}

impl ClaimReceipt {
    /// Parse a 2xx response body
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Value>(body).map(Self::from_value)
    }

    pub fn from_value(body: Value) -> Self {
        let field = |name: &str| body.get(name).and_then(Value::as_str).map(str::to_string);

        Self {
            status: field("status"),
            message: field("message"),
            phone: field("phone"),
            audio_url: field("audio_url"),
            body,
        }
    }

    /// Playback resource carried by the receipt (blank locators ignored)
    pub fn playback_resource(&self) -> Option<PlaybackResource> {
        self.audio_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(PlaybackResource::new)
    }
}
