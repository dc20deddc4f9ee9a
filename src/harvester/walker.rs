//! Paginated ranking walker
//!
//! Walks listing pages `1..=max_page` in concurrent windows and concatenates
//! the rows in page order. The bound is configured, not discovered: empty
//! pages contribute nothing and do not stop the walk.

use crate::extract::extract_listing_rows;
use crate::harvester::fetcher::{FetchError, Fetcher};
use crate::harvester::scheduler::WindowScheduler;
use crate::model::RankedUser;
use std::collections::HashSet;

/// Walks the ranking listing
#[derive(Debug, Clone)]
pub struct ListWalker {
    fetcher: Fetcher,
    scheduler: WindowScheduler,
}

impl ListWalker {
    pub fn new(fetcher: Fetcher, scheduler: WindowScheduler) -> Self {
        Self { fetcher, scheduler }
    }

    /// Fetches pages `1..=max_page` and returns every ranked user in page order
    ///
    /// A fetch failure on any page fails the whole walk; no partial list is
    /// returned. Pages in chunks after the failing one are never requested.
    ///
    /// The ranking can shift between page fetches, so a handle may show up on
    /// two pages; only its first occurrence is kept.
    pub async fn walk(&self, max_page: u32) -> crate::Result<Vec<RankedUser>> {
        let pages: Vec<u32> = (1..=max_page).collect();
        tracing::info!(
            "Walking {} listing pages in windows of {}",
            pages.len(),
            self.scheduler.width()
        );

        let per_page = self
            .scheduler
            .try_run(pages, |page| {
                let fetcher = self.fetcher.clone();
                async move { fetch_page(&fetcher, page).await }
            })
            .await?;

        Ok(dedup_by_name(per_page.into_iter().flatten()))
    }

    /// Fetches and extracts a single listing page
    pub async fn fetch_page(&self, page: u32) -> Result<Vec<RankedUser>, FetchError> {
        fetch_page(&self.fetcher, page).await
    }
}

fn dedup_by_name(users: impl IntoIterator<Item = RankedUser>) -> Vec<RankedUser> {
    let mut seen = HashSet::new();
    users
        .into_iter()
        .filter(|user| {
            let first = seen.insert(user.name.clone());
            if !first {
                tracing::warn!(
                    "{} listed again at rank {}; keeping the earlier entry",
                    user.name,
                    user.rank
                );
            }
            first
        })
        .collect()
}

async fn fetch_page(fetcher: &Fetcher, page: u32) -> Result<Vec<RankedUser>, FetchError> {
    let url = fetcher.endpoints().listing(page);
    let html = fetcher.fetch(&url).await?;

    let users: Vec<RankedUser> = extract_listing_rows(&html)
        .into_iter()
        .map(|row| RankedUser {
            name: row.handle,
            rank: row.rank,
        })
        .collect();

    if users.is_empty() {
        tracing::debug!("Listing page {} has no rows", page);
    } else {
        tracing::debug!("Listing page {}: {} users", page, users.len());
    }

    Ok(users)
}
