/*
 * Responsibility
 * - HTTP API のエントリ (リソース単位の module を公開)
 */
pub mod map;
