//! State module for tracking harvest progress
//!
//! # Components
//!
//! - `RunPhase`: the run-level state machine driven by the orchestrator
//! - `UserOutcome`: what happened to one user during the detail phase

mod run_phase;
mod user_outcome;

// Re-export main types
pub use run_phase::RunPhase;
pub use user_outcome::UserOutcome;
