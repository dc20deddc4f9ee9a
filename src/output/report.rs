//! End-of-run report
//!
//! Summarizes what a harvest run produced: how many users were ranked, which
//! were persisted, and which were skipped and why.

use crate::state::UserOutcome;
use std::time::Duration;

/// Summary of a completed harvest run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Number of listing pages walked
    pub pages_walked: u32,

    /// Number of users in the ranked list
    pub ranked_users: usize,

    /// Detail-phase outcome per ranked user, in ranking order
    pub outcomes: Vec<UserOutcome>,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunReport {
    pub fn persisted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_skipped()).count()
    }

    /// `(handle, reason)` for every skipped user
    pub fn skipped(&self) -> Vec<(&str, &str)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                UserOutcome::Skipped { handle, reason } => Some((handle.as_str(), reason.as_str())),
                UserOutcome::Persisted { .. } => None,
            })
            .collect()
    }

    /// True when every ranked user was persisted
    pub fn is_complete(&self) -> bool {
        self.persisted_count() == self.ranked_users
    }
}

/// Prints the report to stdout in a formatted manner
pub fn print_report(report: &RunReport) {
    println!("=== Harvest Report ===\n");

    println!("Overview:");
    println!("  Listing pages walked: {}", report.pages_walked);
    println!("  Ranked users: {}", report.ranked_users);
    println!("  Records written: {}", report.persisted_count());
    println!("  Elapsed: {:.2}s", report.elapsed.as_secs_f64());
    println!();

    let skipped = report.skipped();
    if !skipped.is_empty() {
        println!("Skipped Users ({}):", skipped.len());
        for (handle, reason) in &skipped {
            println!("  - {}: {}", handle, reason);
        }
        println!();
    }

    let coverage = if report.ranked_users > 0 {
        (report.persisted_count() as f64 / report.ranked_users as f64) * 100.0
    } else {
        100.0
    };

    println!(
        "Coverage: {:.1}% ({} / {} users written)",
        coverage,
        report.persisted_count(),
        report.ranked_users
    );
}
