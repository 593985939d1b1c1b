//! Listing extraction and filtering for the marketplace scan pipeline.
//!
//! Turns one fetched search page into raw listing candidates (trying a chain
//! of extraction strategies), parses price text, and applies the price-band
//! and negative-keyword acceptance rules. Fetching itself lives in
//! [`client::PageClient`]; everything downstream of the markup string is
//! synchronous and side-effect free.

pub mod client;
pub mod error;
pub mod extract;
pub mod link;
pub mod normalize;
pub mod types;

mod retry;

pub use client::PageClient;
pub use error::ScraperError;
pub use extract::extract_candidates;
pub use link::canonicalize_listing_link;
pub use normalize::{normalize_and_filter, parse_price};
pub use types::{NormalizedOffer, RawCandidate, RejectionReason, Verdict};
