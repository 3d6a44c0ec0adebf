/*
 * Responsibility
 * - tracing 初期化 → Config 読み込み → state 生成 → Router 組み立て
 * - Middleware の適用 (HTTP / CORS / security headers)
 * - axum::serve() で起動、SIGINT/SIGTERM で graceful shutdown
 */
use std::{panic, process};

use anyhow::{Context, Result};
use axum::Router;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // RUST_LOG=info,disaster_map_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: fail fast. Production: default hook, server keeps running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting map API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let app = build_router(AppState::new(), &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/map", api::map::routes())
        .fallback(not_found)
        .with_state(state);

    let router = middleware::http::apply(router, config);
    let router = middleware::cors::apply(router, config);
    middleware::security_headers::apply(router, config)
}

async fn not_found() -> AppError {
    AppError::not_found("route")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("shutting down via Ctrl+C"),
        _ = terminate => tracing::info!("shutting down via SIGTERM"),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use axum::response::Response;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn dev_config() -> Config {
        Config::from_lookup(|_| None).unwrap()
    }

    fn prod_config(origins: &str) -> Config {
        let origins = origins.to_string();
        Config::from_lookup(move |key| match key {
            "APP_ENV" => Some("production".to_string()),
            "CORS_ALLOWED_ORIGINS" => Some(origins.clone()),
            _ => None,
        })
        .unwrap()
    }

    async fn send(config: &Config, req: Request<Body>) -> Response {
        build_router(AppState::new(), config)
            .oneshot(req)
            .await
            .unwrap()
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let res = send(&dev_config(), req).await;
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_returns_healthy() {
        let (status, body) = get("/api/map/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "healthy"}));
    }

    #[tokio::test]
    async fn load_echoes_regions_and_filters() {
        let (status, body) = get("/api/map/load?regions=north&filters=fire").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"mapData": "dummy data with north and fire"}));
    }

    #[tokio::test]
    async fn load_with_empty_values() {
        let (status, body) = get("/api/map/load?regions=&filters=").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"mapData": "dummy data with  and "}));
    }

    #[tokio::test]
    async fn load_never_rejects_input() {
        for uri in [
            "/api/map/load",
            "/api/map/load?",
            "/api/map/load?regions=north",
            "/api/map/load?regions=%zz&filters=%FF",
            "/api/map/load?regions=a&regions=b&filters=c&extra=1",
            "/api/map/load?regions&filters",
            "/api/map/load?=&&=x",
        ] {
            let (status, body) = get(uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert!(body["mapData"].is_string(), "{uri}");
        }

        let (_, body) = get("/api/map/load?regions=a&regions=b&filters=c").await;
        assert_eq!(body["mapData"], "dummy data with b and c");
    }

    #[tokio::test]
    async fn load_is_deterministic() {
        let uri = "/api/map/load?regions=south+west&filters=flood%2Cfire";
        let (_, first) = get(uri).await;
        let (_, second) = get(uri).await;

        assert_eq!(first, second);
        assert_eq!(first["mapData"], "dummy data with south west and flood,fire");
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let (status, body) = get("/api/map/zones").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn request_id_is_propagated_or_generated() {
        let req = Request::builder()
            .uri("/api/map/health")
            .header("x-request-id", "req-123")
            .body(Body::empty())
            .unwrap();
        let res = send(&dev_config(), req).await;
        assert_eq!(res.headers()["x-request-id"], "req-123");

        let req = Request::builder()
            .uri("/api/map/health")
            .body(Body::empty())
            .unwrap();
        let res = send(&dev_config(), req).await;
        let generated = res.headers()["x-request-id"].to_str().unwrap();
        assert_eq!(generated.len(), 36);
    }

    #[tokio::test]
    async fn security_headers_are_set() {
        let req = Request::builder()
            .uri("/api/map/health")
            .body(Body::empty())
            .unwrap();
        let res = send(&dev_config(), req).await;

        assert_eq!(res.headers()["x-frame-options"], "DENY");
        assert_eq!(res.headers()["x-content-type-options"], "nosniff");
        assert!(res.headers().get("strict-transport-security").is_none());

        let req = Request::builder()
            .uri("/api/map/health")
            .body(Body::empty())
            .unwrap();
        let res = send(&prod_config(""), req).await;
        assert!(res.headers().get("strict-transport-security").is_some());
    }

    #[tokio::test]
    async fn cors_is_permissive_in_development() {
        let req = Request::builder()
            .uri("/api/map/health")
            .header(header::ORIGIN, "https://anywhere.example")
            .body(Body::empty())
            .unwrap();
        let res = send(&dev_config(), req).await;

        assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn cors_uses_allowlist_in_production() {
        let config = prod_config("https://maps.example");

        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/map/load")
            .header(header::ORIGIN, "https://maps.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();
        let res = send(&config, req).await;
        assert_eq!(
            res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://maps.example"
        );

        let req = Request::builder()
            .uri("/api/map/load")
            .header(header::ORIGIN, "https://evil.example")
            .body(Body::empty())
            .unwrap();
        let res = send(&config, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(
            res.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }
}
