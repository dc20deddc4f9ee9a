/// Per-user result of the detail phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserOutcome {
    /// The user's record was written to storage
    Persisted { handle: String },

    /// The user could not be aggregated; the batch carried on without it
    Skipped { handle: String, reason: String },
}

impl UserOutcome {
    pub fn handle(&self) -> &str {
        match self {
            Self::Persisted { handle } | Self::Skipped { handle, .. } => handle,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}
