//! Data model for harvested users
//!
//! - `RankedUser`: one `(name, rank)` pair from the ranking listing
//! - `UserProfile`: fields extracted from a profile page
//! - `ActivityEntry`: one recent submission
//! - `UserRecord`: profile + rank + activity, the unit written per user

mod activity;
mod user;

pub use activity::ActivityEntry;
pub use user::{Outcome, ProblemsByOutcome, RankedUser, UserProfile, UserRecord};

/// Number of recent submissions kept per user
pub const ACTIVITY_LIMIT: usize = 10;
