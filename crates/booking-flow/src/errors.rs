use courtbook_core_types::Stage;
use thiserror::Error;

use crate::ports::PortError;

#[derive(Debug, Error)]
pub enum FlowError {
    /// The trigger element for the named stage never became actionable
    /// within that stage's timeout.
    #[error("timed out entering stage {stage}")]
    TransitionTimeout { stage: Stage },

    /// The booking menu never appeared after the login control was
    /// activated. Distinct from a generic timeout so a credential failure
    /// is readable from the terminal log line.
    #[error("login not confirmed within the login timeout")]
    LoginNotConfirmed,

    #[error("no calendar cell for day {day}")]
    DateNotFound { day: u32 },

    /// The selected slot exposes no court-choice selector at all.
    #[error("no courts available for the selected slot")]
    NoCourtAvailable,

    /// Courts were offered but none of the preferred labels matched.
    #[error("no preferred court among available options: {}", available.join(", "))]
    NoPreferredCourt { available: Vec<String> },

    #[error("run cancelled")]
    Cancelled,

    #[error(transparent)]
    Session(#[from] PortError),
}
