//! Candidate extraction strategies.
//!
//! A search page is turned into [`RawCandidate`]s by an ordered chain of
//! strategies sharing one signature. Each strategy is a fallback for the
//! previous one: the anchor walk handles the normal rendered page, the raw
//! id-pattern scan survives markup the DOM parser cannot make sense of, and
//! the container walk catches layouts where price text sits outside the
//! listing anchor. The first non-empty result wins; a page that defeats all
//! three simply yields nothing — extraction never fails a cycle.

use std::collections::HashSet;

use offerwatch_core::Confidence;
use scraper::{Html, Selector};

use crate::link::{canonicalize_listing_link, item_id_pattern};
use crate::types::RawCandidate;

/// Shortest anchor text line that can be a title. Shorter lines are badges
/// and distance markers.
const MIN_ANCHOR_TITLE_LEN: usize = 4;

/// Shortest container text block that can be a title.
const MIN_CONTAINER_TITLE_LEN: usize = 6;

type Strategy = fn(&str, &str) -> Vec<RawCandidate>;

const STRATEGIES: &[(&str, Strategy)] = &[
    ("anchor", anchor_strategy),
    ("pattern", pattern_strategy),
    ("container", container_strategy),
];

/// Extracts at most `cap` candidates from one page of search results.
///
/// Strategies run in fallback order until one yields a non-empty result.
/// Candidates beyond the cap are dropped, not queued — the cap bounds
/// notification volume per query per cycle.
#[must_use]
pub fn extract_candidates(markup: &str, origin: &str, cap: usize) -> Vec<RawCandidate> {
    for (name, strategy) in STRATEGIES.iter().copied() {
        let mut found = strategy(markup, origin);
        if found.is_empty() {
            continue;
        }

        if found.len() > cap {
            tracing::debug!(
                strategy = name,
                found = found.len(),
                cap,
                "dropping candidates beyond the per-query cap"
            );
            found.truncate(cap);
        }

        tracing::debug!(strategy = name, count = found.len(), "extraction complete");
        return found;
    }

    tracing::debug!("no extraction strategy yielded candidates");
    Vec::new()
}

/// Primary strategy: walk listing anchors.
///
/// Selects every hyperlink whose href canonicalizes to an item-detail link,
/// then reads the anchor's rendered text lines: the price line is the first
/// line containing a currency marker, the title the first sufficiently long
/// non-price line. Anchors missing either are discarded.
fn anchor_strategy(markup: &str, origin: &str) -> Vec<RawCandidate> {
    let document = Html::parse_document(markup);
    let Ok(anchor_sel) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for anchor in document.select(&anchor_sel) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(link) = canonicalize_listing_link(href, origin) else {
            continue;
        };
        if seen.contains(&link.external_id) {
            continue;
        }

        let lines: Vec<&str> = anchor
            .text()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let Some(price_line) = lines.iter().find(|l| l.contains('$')) else {
            continue;
        };
        let Some(title_line) = lines
            .iter()
            .find(|l| !l.contains('$') && l.chars().count() >= MIN_ANCHOR_TITLE_LEN)
        else {
            continue;
        };

        seen.insert(link.external_id.clone());
        candidates.push(RawCandidate {
            external_id: link.external_id,
            title: (*title_line).to_string(),
            price_text: (*price_line).to_string(),
            link: link.url,
            confidence: Confidence::Full,
        });
    }

    candidates
}

/// Fallback strategy: scan the raw markup for item ids.
///
/// Used when the page renders without usable anchors. Only the listing id is
/// reliable here — title is a placeholder and the price is unknown, so the
/// candidate is marked [`Confidence::IdOnly`] for manual follow-up.
fn pattern_strategy(markup: &str, origin: &str) -> Vec<RawCandidate> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for caps in item_id_pattern().captures_iter(markup) {
        let id = &caps[1];
        if !seen.insert(id.to_string()) {
            continue;
        }
        candidates.push(RawCandidate {
            external_id: id.to_string(),
            title: format!("listing {id}"),
            price_text: String::new(),
            link: format!("{}/marketplace/item/{id}/", origin.trim_end_matches('/')),
            confidence: Confidence::IdOnly,
        });
    }

    candidates
}

/// Last-resort strategy: walk generic layout containers.
///
/// Handles layouts where the price sits in a sibling block rather than
/// inside the listing anchor. The container must still hold an item link
/// for id derivation; blocks without one are skipped.
fn container_strategy(markup: &str, origin: &str) -> Vec<RawCandidate> {
    let document = Html::parse_document(markup);
    let (Ok(container_sel), Ok(anchor_sel)) =
        (Selector::parse("div"), Selector::parse("a[href]"))
    else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for container in document.select(&container_sel) {
        let Some(link) = container
            .select(&anchor_sel)
            .filter_map(|a| a.value().attr("href"))
            .find_map(|href| canonicalize_listing_link(href, origin))
        else {
            continue;
        };
        // Nested divs share anchors; the outermost match wins.
        if seen.contains(&link.external_id) {
            continue;
        }

        let blocks: Vec<&str> = container
            .text()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .collect();

        let Some(price_block) = blocks.iter().find(|b| b.contains('$')) else {
            continue;
        };
        let Some(title_block) = blocks
            .iter()
            .find(|b| !b.contains('$') && b.chars().count() >= MIN_CONTAINER_TITLE_LEN)
        else {
            continue;
        };

        seen.insert(link.external_id.clone());
        candidates.push(RawCandidate {
            external_id: link.external_id,
            title: (*title_block).to_string(),
            price_text: (*price_block).to_string(),
            link: link.url,
            confidence: Confidence::Full,
        });
    }

    candidates
}
