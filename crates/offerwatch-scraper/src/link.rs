//! Listing-link canonicalization and external-id derivation.
//!
//! Search pages attach tracking query parameters to every listing href and
//! frequently emit relative links. Canonicalization resolves the href against
//! the marketplace origin, strips query and fragment, and derives the stable
//! `external_id` from the path — so the same listing yields the same id on
//! every scan regardless of how the page decorated the link.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

/// Minimum digit count for a path segment to qualify as a listing id.
/// Marketplace ids are long numerics; shorter numbers in paths are page
/// numbers or category ids.
pub(crate) const MIN_ID_DIGITS: usize = 10;

/// A canonicalized listing link: absolute URL without query/fragment, plus
/// the derived dedup id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLink {
    pub url: String,
    pub external_id: String,
}

/// Matches an item-detail path segment pair: `item/<long numeric id>`.
pub(crate) fn item_id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"item/([0-9]{10,})").expect("static pattern compiles"))
}

/// Canonicalizes a listing href against the marketplace origin.
///
/// Returns `None` when the href does not resolve, or when its path has no
/// `item` segment — such links are navigation chrome, not listings.
#[must_use]
pub fn canonicalize_listing_link(href: &str, origin: &str) -> Option<ListingLink> {
    let base = Url::parse(origin).ok()?;
    let mut url = base.join(href).ok()?;
    url.set_query(None);
    url.set_fragment(None);

    let path = url.path().to_owned();
    if !path.split('/').any(|seg| seg == "item") {
        return None;
    }

    let external_id = external_id_from_path(&path)?;
    Some(ListingLink {
        url: url.to_string(),
        external_id,
    })
}

/// Derives the external id from a canonical listing path.
///
/// Primary: the last or second-to-last path segment, whichever is a long
/// numeric (trailing slashes leave an empty last segment, so the id often
/// sits second-to-last). Fallback: a digest of the whole canonical path,
/// for markets whose item paths carry opaque slugs instead of numeric ids.
pub(crate) fn external_id_from_path(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    for seg in segments.iter().rev().take(2) {
        if seg.len() >= MIN_ID_DIGITS && seg.bytes().all(|b| b.is_ascii_digit()) {
            return Some((*seg).to_string());
        }
    }

    if segments.is_empty() {
        return None;
    }
    Some(path_digest(path))
}

/// Stable hex digest of a canonical path, truncated for readability.
fn path_digest(path: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = format!("{:x}", Sha256::digest(path.as_bytes()));
    digest[..16].to_string()
}
