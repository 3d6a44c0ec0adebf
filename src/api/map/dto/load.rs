/*
 * Responsibility
 * - GET /load の request/response DTO
 * - validation は持たない (入力はそのまま echo する)
 */
use serde::Serialize;

/// Decoded `regions` / `filters` query values. Missing values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadMapQuery {
    pub regions: String,
    pub filters: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadMapResponse {
    #[serde(rename = "mapData")]
    pub map_data: String,
}
