//! Run phase definitions for tracking harvest progress
//!
//! A run moves `Init -> ListPhase -> ListPersisted -> DetailPhase(0..n) -> Done`.
//! `Failed` is reachable from every non-terminal phase.
use std::fmt;

/// Represents the current phase of a harvest run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunPhase {
    /// Nothing fetched yet, output location being prepared
    Init,

    /// Walking the ranking listing
    ListPhase,

    /// Ranked list written to storage
    ListPersisted,

    /// Aggregating user details; `chunk` is the 0-based window index
    DetailPhase { chunk: usize },

    /// Every ranked user was persisted or skipped
    Done,

    /// A fatal error stopped the run
    Failed,
}

impl RunPhase {
    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if moving from `self` to `next` is allowed
    pub fn can_transition_to(&self, next: RunPhase) -> bool {
        if next == Self::Failed {
            return !self.is_terminal();
        }

        match (*self, next) {
            (Self::Init, Self::ListPhase) => true,
            (Self::ListPhase, Self::ListPersisted) => true,
            (Self::ListPersisted, Self::DetailPhase { chunk: 0 }) => true,
            (Self::ListPersisted, Self::Done) => true,
            (Self::DetailPhase { chunk }, Self::DetailPhase { chunk: next_chunk }) => {
                next_chunk == chunk + 1
            }
            (Self::DetailPhase { .. }, Self::Done) => true,
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::ListPhase => "list_phase",
            Self::ListPersisted => "list_persisted",
            Self::DetailPhase { .. } => "detail_phase",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DetailPhase { chunk } => write!(f, "{}({})", self.name(), chunk),
            _ => write!(f, "{}", self.name()),
        }
    }
}
