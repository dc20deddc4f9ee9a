//! Harvest orchestrator - main run sequencing
//!
//! Drives one batch run through its phases:
//! 1. Prepare the output location
//! 2. Walk the ranking listing (any fetch failure is fatal)
//! 3. Persist the ranked list
//! 4. Aggregate and persist every user, chunk by chunk; a user whose pages
//!    cannot be fetched is skipped and the batch carries on
//!
//! Records are written as each user completes, so a run stopped mid-way keeps
//! the files of every finished chunk.

use crate::config::Config;
use crate::harvester::aggregator::Aggregator;
use crate::harvester::fetcher::Fetcher;
use crate::harvester::scheduler::WindowScheduler;
use crate::harvester::walker::ListWalker;
use crate::model::RankedUser;
use crate::output::RunReport;
use crate::state::{RunPhase, UserOutcome};
use crate::storage::{JsonFileStorage, Storage};
use crate::HarvestError;
use std::sync::Arc;
use std::time::Instant;

/// Main harvest orchestrator
pub struct Harvester {
    walker: ListWalker,
    aggregator: Aggregator,
    storage: Arc<dyn Storage>,
    detail_scheduler: WindowScheduler,
    max_page: u32,
    phase: RunPhase,
}

impl Harvester {
    /// Creates a harvester writing JSON files to the configured output directory
    pub fn new(config: &Config) -> crate::Result<Self> {
        let storage = Arc::new(JsonFileStorage::new(&config.output.directory));
        Self::with_storage(config, storage)
    }

    /// Creates a harvester with a custom storage backend
    pub fn with_storage(config: &Config, storage: Arc<dyn Storage>) -> crate::Result<Self> {
        let fetcher = Fetcher::from_config(&config.source)?;
        let list_scheduler = WindowScheduler::new(config.run.list_window());

        Ok(Self {
            walker: ListWalker::new(fetcher.clone(), list_scheduler),
            aggregator: Aggregator::new(fetcher),
            storage,
            detail_scheduler: WindowScheduler::new(config.run.detail_window()),
            max_page: config.run.max_page,
            phase: RunPhase::Init,
        })
    }

    /// Current phase of the run
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Runs the harvest to completion
    ///
    /// On error the harvester ends in [`RunPhase::Failed`].
    pub async fn run(&mut self) -> crate::Result<RunReport> {
        let start = Instant::now();

        match self.execute(start).await {
            Ok(report) => Ok(report),
            Err(e) => {
                tracing::error!("Harvest failed during {}: {}", self.phase, e);
                if self.phase.can_transition_to(RunPhase::Failed) {
                    self.phase = RunPhase::Failed;
                }
                Err(e)
            }
        }
    }

    async fn execute(&mut self, start: Instant) -> crate::Result<RunReport> {
        if self.phase != RunPhase::Init {
            return Err(HarvestError::InvalidTransition {
                from: self.phase,
                to: RunPhase::ListPhase,
            });
        }

        self.storage.prepare()?;

        advance(&mut self.phase, RunPhase::ListPhase)?;
        let users = self.walker.walk(self.max_page).await?;
        tracing::info!(
            "Found {} users on {} listing pages in {:.2}s",
            users.len(),
            self.max_page,
            start.elapsed().as_secs_f64()
        );

        self.storage.save_ranking(&users)?;
        advance(&mut self.phase, RunPhase::ListPersisted)?;

        let ranked_users = users.len();
        let outcomes = self.detail_phase(users).await?;
        advance(&mut self.phase, RunPhase::Done)?;

        let report = RunReport {
            pages_walked: self.max_page,
            ranked_users,
            outcomes,
            elapsed: start.elapsed(),
        };

        tracing::info!(
            "Harvest completed: {} of {} users written, {} skipped, in {:.2}s",
            report.persisted_count(),
            report.ranked_users,
            report.skipped().len(),
            report.elapsed.as_secs_f64()
        );

        Ok(report)
    }

    async fn detail_phase(&mut self, users: Vec<RankedUser>) -> crate::Result<Vec<UserOutcome>> {
        let scheduler = self.detail_scheduler;
        let chunks = scheduler.chunk_count(users.len());
        let aggregator = self.aggregator.clone();
        let storage = Arc::clone(&self.storage);
        let phase = &mut self.phase;

        scheduler
            .try_run_with(
                users,
                |user| {
                    let aggregator = aggregator.clone();
                    let storage = Arc::clone(&storage);
                    async move { harvest_user(&aggregator, storage.as_ref(), user).await }
                },
                |chunk, len| {
                    advance(phase, RunPhase::DetailPhase { chunk })?;
                    tracing::info!("Detail chunk {}/{}: {} users", chunk + 1, chunks, len);
                    Ok(())
                },
            )
            .await
    }
}

/// Aggregates and persists one user
///
/// Fetch failures become [`UserOutcome::Skipped`]; storage failures are fatal.
async fn harvest_user(
    aggregator: &Aggregator,
    storage: &dyn Storage,
    user: RankedUser,
) -> crate::Result<UserOutcome> {
    match aggregator.aggregate(&user).await {
        Ok(record) => {
            storage.save_user(&user.name, &record)?;
            tracing::debug!(
                "Saved {} (rank {}, {} submissions)",
                user.name,
                user.rank,
                record.activity.len()
            );
            Ok(UserOutcome::Persisted { handle: user.name })
        }
        Err(e) => {
            tracing::warn!("Skipping {} (rank {}): {}", user.name, user.rank, e);
            Ok(UserOutcome::Skipped {
                handle: user.name,
                reason: e.to_string(),
            })
        }
    }
}

/// Moves `phase` to `next`, rejecting transitions the state machine forbids
fn advance(phase: &mut RunPhase, next: RunPhase) -> crate::Result<()> {
    if !phase.can_transition_to(next) {
        return Err(HarvestError::InvalidTransition {
            from: *phase,
            to: next,
        });
    }
    tracing::debug!("Phase {} -> {}", phase, next);
    *phase = next;
    Ok(())
}
