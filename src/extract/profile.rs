//! Profile page extraction
//!
//! Each field has its own sub-extractor returning an `Option`, so one missing
//! block never costs the rest of the profile.

use super::cell_text;
use crate::model::{Outcome, UserProfile};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

static HEADER_NAME: Lazy<Selector> = Lazy::new(|| Selector::parse("h5").unwrap());
static ABOUT: Lazy<Selector> = Lazy::new(|| Selector::parse("dfn").unwrap());
static AVATAR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img.img-rounded.img-responsive[src]").unwrap());
static BADGE: Lazy<Selector> = Lazy::new(|| Selector::parse("a[class][href]").unwrap());

/// `/problems/{problem}/submissions?filter_user_id={user}`
static BADGE_HREF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/problems/(\d+)/submissions\?filter_user_id=(\d+)$").unwrap()
});

/// One problem badge from the profile's problem list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemBadge {
    /// None when the badge style is not one of the known outcome styles
    pub outcome: Option<Outcome>,
    pub problem_id: String,
    pub user_id: String,
}

/// Extracts a full profile
///
/// `requested_handle` is used when the header block is missing so the profile
/// still matches the ranking entry it was fetched for. `base_url` resolves the
/// avatar path into an absolute URL.
pub fn extract_profile(html: &str, requested_handle: &str, base_url: &Url) -> UserProfile {
    let document = Html::parse_document(html);
    let mut profile = UserProfile::empty(requested_handle);

    match extract_header(&document) {
        Some((name, handle)) => {
            profile.name = Some(name);
            profile.handle = handle;
        }
        None => tracing::debug!("{}: name/handle header not found", requested_handle),
    }

    match extract_about(&document) {
        Some(about) => profile.about = about,
        None => tracing::debug!("{}: about not found", requested_handle),
    }

    profile.avatar_url = extract_avatar(&document, base_url);
    if profile.avatar_url.is_none() {
        tracing::debug!("{}: avatar not found", requested_handle);
    }

    for badge in extract_problem_badges(&document) {
        match badge.outcome {
            Some(outcome) => profile.problems.push(outcome, badge.problem_id),
            None => tracing::warn!(
                "{}: problem {} has an unknown badge style",
                requested_handle,
                badge.problem_id
            ),
        }
        // Last badge wins when the page is inconsistent.
        profile.user_id = Some(badge.user_id);
    }

    profile
}

/// Display name and handle from the `<h5>name</h5><h6>handle</h6>` header
pub fn extract_header(document: &Html) -> Option<(String, String)> {
    document.select(&HEADER_NAME).find_map(|h5| {
        let h6 = h5
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .next()
            .filter(|sibling| sibling.value().name() == "h6")?;

        let name = cell_text(h5);
        let handle = cell_text(h6);
        if name.is_empty() || handle.is_empty() {
            return None;
        }
        Some((name, handle))
    })
}

/// The free-text "about" from the first `<dfn>`
pub fn extract_about(document: &Html) -> Option<String> {
    document
        .select(&ABOUT)
        .next()
        .map(cell_text)
        .filter(|about| !about.is_empty())
}

/// Absolute avatar URL
pub fn extract_avatar(document: &Html, base_url: &Url) -> Option<String> {
    let src = document.select(&AVATAR).next()?.value().attr("src")?.trim();
    if src.is_empty() {
        return None;
    }
    base_url.join(src).ok().map(|url| url.to_string())
}

/// Every problem badge, in page order
pub fn extract_problem_badges(document: &Html) -> Vec<ProblemBadge> {
    document
        .select(&BADGE)
        .filter_map(|a| {
            let style = a.value().classes().find_map(|c| c.strip_prefix("text-"))?;
            let href = a.value().attr("href")?;
            let captures = BADGE_HREF.captures(href)?;

            Some(ProblemBadge {
                outcome: Outcome::from_badge_style(style),
                problem_id: captures[1].to_string(),
                user_id: captures[2].to_string(),
            })
        })
        .collect()
}
