//! Database operations for `scan_runs` — per-cycle bookkeeping.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `scan_runs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScanRunRow {
    pub id: i64,
    pub public_id: Uuid,
    pub trigger_source: String,
    pub status: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub queries_total: i32,
    pub queries_failed: i32,
    pub candidates_seen: i32,
    pub offers_new: i32,
    pub notifications_sent: i32,
    pub error_message: Option<String>,
}

/// Outcome counters recorded when a cycle completes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanRunTotals {
    pub queries_total: i32,
    pub queries_failed: i32,
    pub candidates_seen: i32,
    pub offers_new: i32,
    pub notifications_sent: i32,
}

const SCAN_RUN_COLUMNS: &str = "id, public_id, trigger_source, status, started_at, completed_at, \
     queries_total, queries_failed, candidates_seen, offers_new, notifications_sent, error_message";

/// Creates a new scan run in `running` status.
///
/// Generates a UUID in Rust and binds it to `public_id`. Returns the full
/// newly-created row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn start_scan_run(pool: &PgPool, trigger_source: &str) -> Result<ScanRunRow, DbError> {
    let public_id = Uuid::new_v4();

    let row = sqlx::query_as::<_, ScanRunRow>(&format!(
        "INSERT INTO scan_runs (public_id, trigger_source, status) \
         VALUES ($1, $2, 'running') \
         RETURNING {SCAN_RUN_COLUMNS}"
    ))
    .bind(public_id)
    .bind(trigger_source)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Marks a run as `succeeded`, sets `completed_at = NOW()` and the counters.
///
/// # Errors
///
/// Returns [`DbError::InvalidScanRunTransition`] if the run is not in
/// `running` status, or [`DbError::Sqlx`] if the update fails.
pub async fn complete_scan_run(
    pool: &PgPool,
    id: i64,
    totals: ScanRunTotals,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE scan_runs \
         SET status = 'succeeded', completed_at = NOW(), \
             queries_total = $1, queries_failed = $2, candidates_seen = $3, \
             offers_new = $4, notifications_sent = $5 \
         WHERE id = $6 AND status = 'running'",
    )
    .bind(totals.queries_total)
    .bind(totals.queries_failed)
    .bind(totals.candidates_seen)
    .bind(totals.offers_new)
    .bind(totals.notifications_sent)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidScanRunTransition {
            id,
            expected_status: "running",
        });
    }

    Ok(())
}

/// Marks a run as `failed`, sets `completed_at = NOW()` and `error_message`.
///
/// # Errors
///
/// Returns [`DbError::InvalidScanRunTransition`] if the run is not in
/// `running` status, or [`DbError::Sqlx`] if the update fails.
pub async fn fail_scan_run(pool: &PgPool, id: i64, error_message: &str) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE scan_runs \
         SET status = 'failed', completed_at = NOW(), error_message = $1 \
         WHERE id = $2 AND status = 'running'",
    )
    .bind(error_message)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidScanRunTransition {
            id,
            expected_status: "running",
        });
    }

    Ok(())
}

/// Lists scan runs ordered by start time, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_scan_runs(pool: &PgPool, limit: Option<i64>) -> Result<Vec<ScanRunRow>, DbError> {
    let limit = limit.unwrap_or(20).clamp(1, 100);

    let rows = sqlx::query_as::<_, ScanRunRow>(&format!(
        "SELECT {SCAN_RUN_COLUMNS} FROM scan_runs ORDER BY started_at DESC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
