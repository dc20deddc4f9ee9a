//! Ranking listing extraction
//!
//! A listing page renders one `<tr>` per user: the first cell holds the rank,
//! the second cell links to `/users/{handle}` (wrapping the avatar image).

use super::{cell_text, decode_path_segment};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());
static USER_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href^="/users/"]"#).unwrap());

/// One `(rank, handle)` pair from a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub rank: u32,
    pub handle: String,
}

/// Extracts every ranked user row from a listing page, in page order
///
/// Rows without at least two cells (headers, spacers) are ignored. Rows with a
/// rank that is not a positive integer or without a user link are skipped with a warning.
pub fn extract_listing_rows(html: &str) -> Vec<ListingRow> {
    let document = Html::parse_document(html);

    document
        .select(&ROW)
        .enumerate()
        .filter_map(|(i, tr)| parse_row(i, tr))
        .collect()
}

fn parse_row(index: usize, tr: ElementRef<'_>) -> Option<ListingRow> {
    let cells: Vec<ElementRef<'_>> = tr.select(&CELL).collect();
    if cells.len() < 2 {
        return None;
    }

    let rank = match cell_text(cells[0]).parse::<u32>() {
        Ok(rank) if rank >= 1 => rank,
        _ => {
            tracing::warn!("listing row {}: rank cell is not a positive number", index);
            return None;
        }
    };

    let handle = cells[1]
        .select(&USER_LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| href.strip_prefix("/users/"))
        .map(|tail| tail.split(['/', '?', '#']).next().unwrap_or_default())
        .map(decode_path_segment)
        .filter(|handle| !handle.is_empty());

    match handle {
        Some(handle) => Some(ListingRow { rank, handle }),
        None => {
            tracing::warn!("listing row {} (rank {}): no user link", index, rank);
            None
        }
    }
}
