//! Price parsing and the acceptance rules for extracted candidates.

use offerwatch_core::{SearchQuery, ZeroPricePolicy};

use crate::types::{NormalizedOffer, RawCandidate, RejectionReason, Verdict};

/// Parses marketplace price text into an integer amount.
///
/// Every non-digit character is stripped and the remaining digits are read
/// as base-10, so `"$45.000"`, `"45 000 CLP"`, and `"45000"` all parse to
/// `45000`. Text with no digits parses to 0.
#[must_use]
pub fn parse_price(text: &str) -> i64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    // Absurdly long digit runs (glued-together page text) saturate rather
    // than poison the candidate.
    digits.parse::<i64>().unwrap_or(i64::MAX)
}

/// Applies the acceptance rules to one candidate.
///
/// Checks, in order: negative keywords on the lower-cased title (a hit
/// rejects regardless of price), then the price band. Bounds are inclusive.
/// A price of exactly 0 — unparseable or literal — is handled by `policy`
/// when the query carries any bound; without bounds every candidate passes
/// the price check (the pass-through mode id-only extraction relies on).
///
/// Rejection tags the offer and excludes it downstream; it is never an error.
#[must_use]
pub fn normalize_and_filter(
    candidate: RawCandidate,
    query: &SearchQuery,
    policy: ZeroPricePolicy,
    negative_keywords: &[String],
) -> NormalizedOffer {
    let price_numeric = parse_price(&candidate.price_text);
    let had_digits = candidate.price_text.chars().any(|c| c.is_ascii_digit());

    let title_lower = candidate.title.to_lowercase();
    if let Some(hit) = negative_keywords
        .iter()
        .find(|kw| title_lower.contains(&kw.to_lowercase()))
    {
        tracing::debug!(id = %candidate.external_id, keyword = %hit, "candidate rejected by keyword");
        return NormalizedOffer {
            candidate,
            price_numeric,
            verdict: Verdict::Rejected(RejectionReason::NegativeKeyword),
        };
    }

    let bounded = query.min_price.is_some() || query.max_price.is_some();
    let verdict = if !bounded {
        Verdict::Accepted
    } else if price_numeric == 0 {
        match policy {
            ZeroPricePolicy::PassThrough => Verdict::Accepted,
            ZeroPricePolicy::Reject => Verdict::Rejected(if had_digits {
                RejectionReason::PriceOutOfRange
            } else {
                RejectionReason::UnparseablePrice
            }),
        }
    } else if query.min_price.is_some_and(|min| price_numeric < min)
        || query.max_price.is_some_and(|max| price_numeric > max)
    {
        Verdict::Rejected(RejectionReason::PriceOutOfRange)
    } else {
        Verdict::Accepted
    };

    NormalizedOffer {
        candidate,
        price_numeric,
        verdict,
    }
}
