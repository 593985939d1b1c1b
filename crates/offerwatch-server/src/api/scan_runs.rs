use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ScanRunItem {
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

#[derive(Debug, Deserialize)]
pub(super) struct ScanRunsQuery {
    pub limit: Option<i64>,
}

/// Recent scan cycles, newest first — the viewer's window into how the
/// watcher has been doing.
pub(super) async fn list_scan_runs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ScanRunsQuery>,
) -> Result<Json<ApiResponse<Vec<ScanRunItem>>>, ApiError> {
    let rows = offerwatch_db::list_scan_runs(&state.pool, query.limit)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| ScanRunItem {
            public_id: row.public_id,
            trigger_source: row.trigger_source,
            status: row.status,
            started_at: row.started_at,
            completed_at: row.completed_at,
            queries_total: row.queries_total,
            queries_failed: row.queries_failed,
            candidates_seen: row.candidates_seen,
            offers_new: row.offers_new,
            notifications_sent: row.notifications_sent,
            error_message: row.error_message,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
