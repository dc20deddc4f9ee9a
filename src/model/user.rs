//! User-side records produced by the listing walk and the profile extractor
use crate::model::ActivityEntry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the ranking listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedUser {
    /// The user's handle
    pub name: String,

    /// 1-based position in the ranking
    pub rank: u32,
}

/// Classification of a problem attempt, as rendered by the badge style on a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Accepted
    Solved,

    /// Partial credit
    Partial,

    /// Attempted without any credit
    Attempted,
}

impl Outcome {
    /// Maps a `text-<style>` badge style to an outcome
    ///
    /// Returns None for styles the profile page does not use for problem badges.
    pub fn from_badge_style(style: &str) -> Option<Self> {
        match style {
            "success" => Some(Self::Solved),
            "warning" => Some(Self::Partial),
            "muted" => Some(Self::Attempted),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solved => "solved",
            Self::Partial => "partial",
            Self::Attempted => "attempted",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Problem ids grouped by outcome, each group in page order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemsByOutcome {
    pub solved: Vec<String>,
    pub partial: Vec<String>,
    pub attempted: Vec<String>,
}

impl ProblemsByOutcome {
    pub fn push(&mut self, outcome: Outcome, problem_id: impl Into<String>) {
        self.get_mut(outcome).push(problem_id.into());
    }

    pub fn get(&self, outcome: Outcome) -> &[String] {
        match outcome {
            Outcome::Solved => &self.solved,
            Outcome::Partial => &self.partial,
            Outcome::Attempted => &self.attempted,
        }
    }

    fn get_mut(&mut self, outcome: Outcome) -> &mut Vec<String> {
        match outcome {
            Outcome::Solved => &mut self.solved,
            Outcome::Partial => &mut self.partial,
            Outcome::Attempted => &mut self.attempted,
        }
    }

    /// Total number of problem badges across all outcomes
    pub fn len(&self) -> usize {
        self.solved.len() + self.partial.len() + self.attempted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Profile data extracted from a user's page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name
    pub name: Option<String>,

    pub handle: String,

    #[serde(default)]
    pub about: String,

    /// Absolute avatar URL
    pub avatar_url: Option<String>,

    /// Numeric user id discovered from the problem badges
    pub user_id: Option<String>,

    pub problems: ProblemsByOutcome,
}

impl UserProfile {
    /// An empty profile for `handle`, used before any field is extracted
    pub fn empty(handle: impl Into<String>) -> Self {
        Self {
            name: None,
            handle: handle.into(),
            about: String::new(),
            avatar_url: None,
            user_id: None,
            problems: ProblemsByOutcome::default(),
        }
    }
}

/// The persisted unit for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(flatten)]
    pub profile: UserProfile,

    /// Copied from the matching [`RankedUser`]
    pub rank: u32,

    /// At most ten most recent submissions, in source order
    pub activity: Vec<ActivityEntry>,
}

impl UserRecord {
    pub fn new(profile: UserProfile, rank: u32, activity: Vec<ActivityEntry>) -> Self {
        Self {
            profile,
            rank,
            activity,
        }
    }
}
