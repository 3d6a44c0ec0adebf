/*
 * Responsibility
 * - GET /api/map/load
 * - regions / filters を extractor で受け、placeholder payload を返す
 * - 失敗しない (常に 200)
 */
use axum::Json;

use crate::{
    api::map::dto::load::{LoadMapQuery, LoadMapResponse},
    services::map_data,
};

pub async fn load_map(query: LoadMapQuery) -> Json<LoadMapResponse> {
    tracing::debug!(regions = %query.regions, filters = %query.filters, "load map");

    Json(LoadMapResponse {
        map_data: map_data::placeholder(&query.regions, &query.filters),
    })
}
