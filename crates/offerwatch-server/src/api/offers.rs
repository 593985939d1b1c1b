use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct OfferItem {
    pub id: String,
    pub title: String,
    pub price_text: String,
    pub price_numeric: i64,
    pub confidence: String,
    pub first_seen_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OffersQuery {
    pub title: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub limit: Option<i64>,
}

/// Detected offers, newest first, with the viewer's text and price filters.
pub(super) async fn list_offers(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<OffersQuery>,
) -> Result<Json<ApiResponse<Vec<OfferItem>>>, ApiError> {
    let rows = offerwatch_db::list_offers(
        &state.pool,
        &offerwatch_db::OfferFilter {
            title_contains: query.title,
            min_price: query.min_price,
            max_price: query.max_price,
            limit: query.limit,
        },
    )
    .await
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| OfferItem {
            id: row.id,
            title: row.title,
            price_text: row.price_text,
            price_numeric: row.price_numeric,
            confidence: row.confidence,
            first_seen_at: row.first_seen_at,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
