//! Submission table extraction
//!
//! The submissions page renders one ten-column row per submission:
//! id, problem, user, time, memory, verdict, language, code length, score,
//! submitted at. Only the columns the activity record needs are kept.

use super::{cell_text, normalize_language};
use crate::model::ActivityEntry;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// Number of cells in a submission row
pub const ACTIVITY_COLUMNS: usize = 10;

static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());
static SUBMISSION_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href^="/submissions/"]"#).unwrap());
static PROBLEM_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href^="/problems/"]"#).unwrap());

/// Raw fields of one submission row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRow {
    pub submission_id: String,
    pub problem_id: String,
    pub status: String,
    pub language_raw: String,
    pub submitted_at_raw: String,
}

impl ActivityRow {
    /// Converts the raw row into an [`ActivityEntry`]
    ///
    /// An unreadable timestamp is a soft miss: the entry is kept with
    /// `submitted_at` left empty.
    pub fn into_entry(self) -> ActivityEntry {
        let submitted_at = parse_timestamp(&self.submitted_at_raw);
        if submitted_at.is_none() {
            tracing::warn!(
                "submission {}: unreadable timestamp {:?}",
                self.submission_id,
                self.submitted_at_raw
            );
        }

        ActivityEntry {
            submission_id: self.submission_id,
            problem_id: self.problem_id,
            language: normalize_language(&self.language_raw),
            status: self.status,
            submitted_at,
        }
    }
}

/// Extracts every submission row, in the order the page lists them
pub fn extract_activity_rows(html: &str) -> Vec<ActivityRow> {
    let document = Html::parse_document(html);

    document.select(&ROW).filter_map(parse_row).collect()
}

fn parse_row(tr: ElementRef<'_>) -> Option<ActivityRow> {
    let cells: Vec<ElementRef<'_>> = tr.select(&CELL).collect();
    if cells.len() != ACTIVITY_COLUMNS {
        return None;
    }

    let submission_id = cells[0].select(&SUBMISSION_LINK).next().map(cell_text)?;
    let problem_id = cells[1].select(&PROBLEM_LINK).next().map(cell_text)?;
    if submission_id.is_empty() || problem_id.is_empty() {
        return None;
    }

    Some(ActivityRow {
        submission_id,
        problem_id,
        status: cell_text(cells[5]),
        language_raw: cell_text(cells[6]),
        submitted_at_raw: cell_text(cells[9]),
    })
}

/// Parses a submission timestamp
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS +ZZZZ`, and offset-less
/// `YYYY-MM-DD HH:MM[:SS]` (read as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%d %H:%M:%S %:z"] {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    None
}
