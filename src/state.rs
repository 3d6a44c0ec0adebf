/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - 現状 map API は stateless なので中身は空 (データソース接続時にここへ追加)
 * - Clone 前提で持つ
 */
#[derive(Clone, Debug, Default)]
pub struct AppState;

impl AppState {
    pub fn new() -> Self {
        Self
    }
}
