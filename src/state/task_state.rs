//! Lifecycle states for a single unit of crawl work
//!
//! A unit starts `Pending` and ends in one of the terminal states. Only
//! `Done` means a page was recorded; every other terminal state is a skip.
use std::fmt;

/// Represents the state of one URL taken from the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskState {
    // ===== Active States =====
    /// Taken from the frontier, nothing checked yet
    Pending,

    /// Passed the gate and the host check, fetch completed
    Fetched,

    /// Page record written to the page map
    Recorded,

    /// Outgoing links pushed onto the frontier
    FannedOut,

    // ===== Terminal Success State =====
    /// Page recorded and fanned out
    Done,

    // ===== Terminal Skip States =====
    /// URL could not be normalized
    SkippedInvalid,

    /// Key already recorded or reserved
    SkippedDuplicate,

    /// Page budget reached at the gate
    SkippedLimit,

    /// Host differs from the base host
    SkippedHost,

    /// Fetch produced no usable HTML
    SkippedNoContent,

    /// Crawl was stopped before this unit could make progress
    Cancelled,

    // ===== Special States =====
    /// Budget fully reserved by in-flight fetches; the URL goes back to the frontier
    Parked,
}

impl TaskState {
    /// Returns true if no further processing happens for this unit
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            Self::Pending | Self::Fetched | Self::Recorded | Self::FannedOut | Self::Parked
        )
    }

    /// Returns true if this unit recorded a page
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if this unit ended without recording a page
    pub fn is_skipped(&self) -> bool {
        self.is_terminal() && !self.is_success()
    }

    /// Checks whether moving from `self` to `next` follows the crawl state machine
    pub fn can_transition_to(&self, next: TaskState) -> bool {
        use TaskState::*;

        match (self, next) {
            (
                Pending,
                SkippedInvalid | SkippedDuplicate | SkippedLimit | SkippedHost | Cancelled
                | Parked | Fetched,
            ) => true,
            (Fetched, SkippedNoContent | Recorded | Cancelled) => true,
            (Recorded, FannedOut) => true,
            (FannedOut, Done) => true,
            (Parked, Pending) => true,
            _ => false,
        }
    }

    /// Short label used in logs and statistics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetched => "fetched",
            Self::Recorded => "recorded",
            Self::FannedOut => "fanned_out",
            Self::Done => "done",
            Self::SkippedInvalid => "skipped_invalid",
            Self::SkippedDuplicate => "skipped_duplicate",
            Self::SkippedLimit => "skipped_limit",
            Self::SkippedHost => "skipped_host",
            Self::SkippedNoContent => "skipped_no_content",
            Self::Cancelled => "cancelled",
            Self::Parked => "parked",
        }
    }

    /// Returns all possible task states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Pending,
            Self::Fetched,
            Self::Recorded,
            Self::FannedOut,
            Self::Done,
            Self::SkippedInvalid,
            Self::SkippedDuplicate,
            Self::SkippedLimit,
            Self::SkippedHost,
            Self::SkippedNoContent,
            Self::Cancelled,
            Self::Parked,
        ]
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
