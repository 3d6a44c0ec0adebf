/*
 * Responsibility
 * - handler から呼ばれるドメイン処理の公開
 */
pub mod map_data;
