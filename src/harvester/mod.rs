//! Harvester module: fetching, scheduling, and run orchestration
//!
//! This module contains the network side of a harvest:
//! - HTTP fetching with the identifying header set
//! - The fixed-window concurrency scheduler shared by both phases
//! - The paginated ranking walker
//! - Per-user profile + activity aggregation
//! - The run orchestrator tying the phases together

mod aggregator;
mod fetcher;
mod orchestrator;
mod scheduler;
mod walker;

pub use aggregator::{AggregationError, Aggregator};
pub use fetcher::{build_http_client, Endpoints, FetchCause, FetchError, Fetcher};
pub use orchestrator::Harvester;
pub use scheduler::WindowScheduler;
pub use walker::ListWalker;

use crate::config::Config;
use crate::output::RunReport;

/// Runs a complete harvest with JSON file output
///
/// # Returns
///
/// * `Ok(RunReport)` - Every ranked user was persisted or skipped
/// * `Err(HarvestError)` - The run halted on a fatal error
pub async fn harvest(config: &Config) -> crate::Result<RunReport> {
    Harvester::new(config)?.run().await
}
