//! `GET /health`

use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use photoboost_core::health::{CheckResult, HealthChecker, HealthReport, WritableDirCheck};
use photoboost_telemetry::metrics;
use serde::Serialize;

/// Liveness payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"running"` while the process serves requests
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
    /// Seconds since the server state was built
    pub uptime_secs: u64,
    /// Storage directory probe
    pub storage: HealthReport,
    /// Request counters and timings
    pub metrics: serde_json::Value,
}

/// Report liveness; a failing storage probe is reported but still answers 200
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let root = state.store.root().to_path_buf();
    let storage = tokio::task::spawn_blocking(move || {
        HealthChecker::new()
            .add_check(WritableDirCheck::new("storage", root))
            .run()
    })
    .await
    .unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Storage health check did not complete");
        HealthReport::new(
            vec![CheckResult::unhealthy("storage", e.to_string())],
            std::time::Duration::ZERO,
        )
    });

    Json(HealthResponse {
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.uptime_secs(),
        storage,
        metrics: metrics().export_json(),
    })
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::*;
    use crate::router;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use photoboost_core::config::ConfigSchema;
    use std::time::{Duration, Instant};
    use tower::ServiceExt;

    fn health_request() -> Request<Body> {
        Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_running() {
        let (app, _state, _temp) = test_app().await;

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "running");
        assert_eq!(body["storage"]["status"], "healthy");
        assert!(body["metrics"].is_object());
    }

    #[tokio::test]
    async fn test_health_reports_missing_storage() {
        let (app, state, _temp) = test_app().await;
        std::fs::remove_dir_all(state.store.root()).unwrap();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "running");
        assert_eq!(body["storage"]["status"], "unhealthy");
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let (app, _state, _temp) = test_app().await;

        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_cors_disabled() {
        let mut config = ConfigSchema::default();
        config.server.cors = false;
        let (app, _state, _temp) = test_app_with(config).await;

        let response = app.oneshot(health_request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_uptime_counts_from_state_creation() {
        let (_app, mut state, _temp) = test_app().await;
        state.started_at = Instant::now().checked_sub(Duration::from_secs(3)).unwrap();

        let response = router(state).oneshot(health_request()).await.unwrap();

        let uptime = body_json(response).await["uptime_secs"].as_u64().unwrap();
        assert!(uptime >= 3, "uptime_secs = {uptime}");
    }

    #[tokio::test]
    async fn test_uptime_advances_while_serving() {
        let (app, _state, _temp) = test_app().await;
        tokio::time::sleep(Duration::from_millis(1100)).await;

        let response = app.oneshot(health_request()).await.unwrap();

        let uptime = body_json(response).await["uptime_secs"].as_u64().unwrap();
        assert!(uptime >= 1, "uptime_secs = {uptime}");
    }
}
