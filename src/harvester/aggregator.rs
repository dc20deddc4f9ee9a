//! Per-user detail aggregation
//!
//! One user costs two sequential requests: the profile page, then (when the
//! profile revealed a numeric user id) the submissions page for that id.

use crate::extract::{extract_activity_rows, extract_profile, ActivityRow};
use crate::harvester::fetcher::{FetchError, Fetcher};
use crate::model::{ActivityEntry, RankedUser, UserRecord, ACTIVITY_LIMIT};
use thiserror::Error;

/// Failure while aggregating one user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    #[error("profile unavailable: {0}")]
    Profile(FetchError),

    #[error("activity unavailable: {0}")]
    Activity(FetchError),
}

/// Builds [`UserRecord`]s from profile and activity pages
#[derive(Debug, Clone)]
pub struct Aggregator {
    fetcher: Fetcher,
}

impl Aggregator {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// Aggregates the record for one ranked user
    ///
    /// The rank is copied from `user`. A profile without problem badges has no
    /// discoverable user id; its activity is left empty and the activity page is
    /// not requested.
    pub async fn aggregate(&self, user: &RankedUser) -> Result<UserRecord, AggregationError> {
        let endpoints = self.fetcher.endpoints();

        let profile_url = endpoints.profile(&user.name);
        let html = self
            .fetcher
            .fetch(&profile_url)
            .await
            .map_err(AggregationError::Profile)?;
        let profile = extract_profile(&html, &user.name, endpoints.base());

        if profile.handle != user.name {
            tracing::warn!(
                "Profile for {} reports handle {}",
                user.name,
                profile.handle
            );
        }

        let activity = match profile.user_id.as_deref() {
            Some(user_id) => {
                let activity_url = endpoints.activity(user_id);
                let html = self
                    .fetcher
                    .fetch(&activity_url)
                    .await
                    .map_err(AggregationError::Activity)?;
                recent_activity(&user.name, extract_activity_rows(&html))
            }
            None => {
                tracing::debug!("{}: no user id found, skipping activity", user.name);
                Vec::new()
            }
        };

        Ok(UserRecord::new(profile, user.rank, activity))
    }
}

/// Keeps the first [`ACTIVITY_LIMIT`] rows, in source order, as entries
fn recent_activity(handle: &str, rows: Vec<ActivityRow>) -> Vec<ActivityEntry> {
    if rows.len() > ACTIVITY_LIMIT {
        tracing::debug!(
            "{}: keeping {} of {} submissions",
            handle,
            ACTIVITY_LIMIT,
            rows.len()
        );
    }

    rows.into_iter()
        .take(ACTIVITY_LIMIT)
        .map(ActivityRow::into_entry)
        .collect()
}
