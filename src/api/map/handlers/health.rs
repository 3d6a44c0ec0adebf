/*
 * Responsibility
 * - GET /api/map/health (疎通用)
 * - 固定の {"status": "healthy"} を返す
 */
use axum::{Json, http::StatusCode, response::IntoResponse};

use crate::api::map::dto::health::HealthResponse;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse::healthy()))
}
