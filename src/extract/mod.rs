//! Markup extraction for the judge's HTML pages
//!
//! The judge has no API, so every record is scraped from rendered HTML. Each
//! page kind has a narrow entry point returning typed results:
//! - [`extract_listing_rows`]: `(rank, handle)` pairs from a ranking page
//! - [`extract_profile`]: a [`UserProfile`](crate::model::UserProfile) from a profile page
//! - [`extract_activity_rows`]: submission rows from a submissions page
//!
//! All functions are pure. A missing optional field is a soft miss: the field
//! keeps its default and extraction carries on. Zero matches is an empty result,
//! never an error.

mod activity;
mod language;
mod listing;
mod profile;

pub use activity::{extract_activity_rows, parse_timestamp, ActivityRow, ACTIVITY_COLUMNS};
pub use language::normalize_language;
pub use listing::{extract_listing_rows, ListingRow};
pub use profile::{
    extract_about, extract_avatar, extract_header, extract_problem_badges, extract_profile,
    ProblemBadge,
};

use percent_encoding::percent_decode_str;
use scraper::ElementRef;

/// Whitespace-trimmed text content of an element
fn cell_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Decodes a percent-encoded URL path segment
fn decode_path_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}
