/*
 * Responsibility
 * - raw query string を LoadMapQuery として受ける extractor
 * - 失敗しない (Rejection = Infallible)
 * 主な責務
 *  - application/x-www-form-urlencoded の decode ('+' → space, %XX)
 *  - 不正な UTF-8 は lossy に置換
 *  - 同じ key が複数ある場合は最後の値を採用
 * 置かないもの
 *  - validation (入力はそのまま echo する)
 */
use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::api::map::dto::load::LoadMapQuery;

impl LoadMapQuery {
    pub fn from_raw_query(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        let Some(raw) = raw else {
            return query;
        };

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "regions" => query.regions = value.into_owned(),
                "filters" => query.filters = value.into_owned(),
                _ => {}
            }
        }

        query
    }
}

impl<S> FromRequestParts<S> for LoadMapQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_raw_query(parts.uri.query()))
    }
}
