//! Submission status and its transition rules.

use serde::{Deserialize, Serialize};

/// Lifecycle of one claim submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Nothing submitted yet
    #[default]
    Idle,

    /// Request in flight
    Processing,

    /// Backend accepted the claim
    Success,

    /// Transport failure or non-2xx response
    Error,
}

impl SubmissionStatus {
    /// Whether a new submission may start from this state
    pub fn can_start(self) -> bool {
        !matches!(self, Self::Processing)
    }

    /// Whether the status is a finished outcome
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    /// Validate a transition
    pub fn can_transition_to(self, to: SubmissionStatus) -> bool {
        use SubmissionStatus::*;
        matches!(
            (self, to),
            (Idle | Success | Error, Processing)
                | (Processing, Success | Error)
                | (Idle | Success | Error, Idle)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
