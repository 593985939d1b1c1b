//! Candidate and offer types flowing through one scan cycle.
//!
//! A [`RawCandidate`] exists only within one extraction pass; it is never
//! persisted directly. Normalization attaches the parsed price and an
//! acceptance verdict, producing a [`NormalizedOffer`] that either proceeds
//! to dedup registration or carries its rejection reason for logging.

use offerwatch_core::Confidence;

/// One listing as extracted from a search page, before any filtering.
///
/// `external_id` is derived deterministically from the canonicalized listing
/// link, so re-scans of the same listing always produce the same id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    pub external_id: String,
    pub title: String,
    pub price_text: String,
    pub link: String,
    pub confidence: Confidence,
}

/// Why a candidate was excluded from dedup and notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    PriceOutOfRange,
    NegativeKeyword,
    UnparseablePrice,
}

impl RejectionReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RejectionReason::PriceOutOfRange => "price_out_of_range",
            RejectionReason::NegativeKeyword => "negative_keyword",
            RejectionReason::UnparseablePrice => "unparseable_price",
        }
    }
}

/// Outcome of normalization: the candidate survives filtering or carries a
/// tagged skip reason. Skips are data, not errors — extraction of the
/// remaining candidates continues regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(RejectionReason),
}

/// A candidate plus its parsed price and filtering verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedOffer {
    pub candidate: RawCandidate,
    pub price_numeric: i64,
    pub verdict: Verdict,
}

impl NormalizedOffer {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self.verdict, Verdict::Accepted)
    }

    /// The rejection reason, when the offer was rejected.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<RejectionReason> {
        match self.verdict {
            Verdict::Accepted => None,
            Verdict::Rejected(reason) => Some(reason),
        }
    }
}
