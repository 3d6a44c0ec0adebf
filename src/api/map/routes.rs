/*
 * Responsibility
 * - /api/map 配下の URL 構造を定義
 * - /health (疎通用), /load (placeholder)
 */
use axum::{Router, routing::get};

use crate::api::map::handlers::{health::health, load::load_map};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/load", get(load_map))
}
