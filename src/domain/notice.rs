//! User-visible notices.
//!
//! Presentation (toasts, banners, terminal lines) belongs to the caller;
//! the core only decides what to say.

/// How a notice should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A transient message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    fn new(title: &str, description: &str, severity: Severity) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            severity,
        }
    }

    pub fn recording_saved() -> Self {
        Self::new(
            "Recording saved",
            "Your audio has been recorded successfully",
            Severity::Info,
        )
    }

    pub fn phone_required() -> Self {
        Self::new(
            "Phone number required",
            "Please enter your phone number",
            Severity::Error,
        )
    }

    pub fn recording_missing() -> Self {
        Self::new(
            "No recording found",
            "Please record your message first",
            Severity::Error,
        )
    }

    pub fn recording_in_progress() -> Self {
        Self::new(
            "Recording in progress",
            "Stop recording before submitting",
            Severity::Error,
        )
    }

    pub fn submission_in_progress() -> Self {
        Self::new(
            "Submission in progress",
            "Please wait for the current request to finish",
            Severity::Error,
        )
    }

    pub fn submitted() -> Self {
        Self::new(
            "Success!",
            "Your claim request has been processed",
            Severity::Info,
        )
    }

    pub fn submission_failed() -> Self {
        Self::new(
            "Processing failed",
            "There was an error processing your request. Please try again.",
            Severity::Error,
        )
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
