//! Database operations for the `offers` table — the dedup store.
//!
//! The table's primary key on the external id is the sole dedup mechanism:
//! [`register_offer`] inserts with `ON CONFLICT DO NOTHING`, so the insert
//! itself is the conflict point and overlapping scan cycles cannot race a
//! read-then-write. Rows are written once and never updated or deleted here.

use chrono::{DateTime, Utc};
use offerwatch_core::Confidence;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `offers` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OfferRow {
    /// External listing id; primary key.
    pub id: String,
    pub title: String,
    pub price_text: String,
    pub price_numeric: i64,
    /// `"full"` or `"id_only"`; see `offerwatch_core::Confidence`.
    pub confidence: String,
    pub first_seen_at: DateTime<Utc>,
}

/// An offer about to be registered. Field values reflect the first sighting;
/// later sightings of the same id never overwrite them.
#[derive(Debug, Clone)]
pub struct NewOffer {
    pub id: String,
    pub title: String,
    pub price_text: String,
    pub price_numeric: i64,
    pub confidence: Confidence,
}

/// Result of attempting to register an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    New,
    Duplicate,
}

/// Registers an offer if its id has never been seen.
///
/// Returns [`RegisterOutcome::New`] when the row was inserted, and
/// [`RegisterOutcome::Duplicate`] when a row with that id already exists —
/// in which case nothing is changed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn register_offer(pool: &PgPool, offer: &NewOffer) -> Result<RegisterOutcome, DbError> {
    let result = sqlx::query(
        "INSERT INTO offers (id, title, price_text, price_numeric, confidence) \
         VALUES ($1, $2, $3, $4, $5) \
         ON CONFLICT (id) DO NOTHING",
    )
    .bind(&offer.id)
    .bind(&offer.title)
    .bind(&offer.price_text)
    .bind(offer.price_numeric)
    .bind(offer.confidence.as_str())
    .execute(pool)
    .await?;

    if result.rows_affected() == 1 {
        Ok(RegisterOutcome::New)
    } else {
        Ok(RegisterOutcome::Duplicate)
    }
}

/// Filters for the viewer's offer listing.
#[derive(Debug, Clone, Default)]
pub struct OfferFilter {
    /// Case-insensitive substring match on the title.
    pub title_contains: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub limit: Option<i64>,
}

/// Lists offers ordered by detection time, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_offers(pool: &PgPool, filter: &OfferFilter) -> Result<Vec<OfferRow>, DbError> {
    let limit = filter.limit.unwrap_or(50).clamp(1, 200);

    let rows = sqlx::query_as::<_, OfferRow>(
        "SELECT id, title, price_text, price_numeric, confidence, first_seen_at \
         FROM offers \
         WHERE ($1::text IS NULL OR title ILIKE '%' || $1 || '%') \
           AND ($2::bigint IS NULL OR price_numeric >= $2) \
           AND ($3::bigint IS NULL OR price_numeric <= $3) \
         ORDER BY first_seen_at DESC \
         LIMIT $4",
    )
    .bind(&filter.title_contains)
    .bind(filter.min_price)
    .bind(filter.max_price)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetches one offer by external id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_offer(pool: &PgPool, id: &str) -> Result<Option<OfferRow>, DbError> {
    let row = sqlx::query_as::<_, OfferRow>(
        "SELECT id, title, price_text, price_numeric, confidence, first_seen_at \
         FROM offers WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
