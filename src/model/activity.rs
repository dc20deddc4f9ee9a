//! Submission activity records
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One submission from a user's recent activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub submission_id: String,

    pub problem_id: String,

    /// Normalized language label (see `extract::normalize_language`)
    pub language: String,

    /// Verdict text as rendered by the judge
    pub status: String,

    /// None when the page's timestamp could not be read
    pub submitted_at: Option<DateTime<Utc>>,
}
