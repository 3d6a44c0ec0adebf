/*
 * Responsibility
 * - map load の placeholder payload 生成
 * - incident / traffic / evacuation のデータソースは未接続 (固定文字列のみ)
 */

/// Placeholder map payload. Pure and deterministic.
pub fn placeholder(regions: &str, filters: &str) -> String {
    format!("dummy data with {regions} and {filters}")
}
