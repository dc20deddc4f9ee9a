//! Output module for run reporting
//!
//! Record persistence lives in [`crate::storage`]; this module only summarizes
//! a finished run for the operator.

mod report;

pub use report::{print_report, RunReport};
