//! Attune REST API
//!
//! HTTP API layer for Attune, built with Axum.
//!
//! # Endpoints
//!
//! ## Logs
//! - `POST /api/v1/logs/food` - Log a food entry (text is estimated)
//! - `POST /api/v1/logs/water` - Log water intake
//! - `POST /api/v1/logs/craving` - Log a craving (alternatives attached)
//! - `POST /api/v1/logs/movement` - Log movement (text is estimated)
//! - `POST /api/v1/logs/sleep` - Log a sleep check-in
//! - `POST /api/v1/logs/stress` - Log a stress check-in
//! - `GET /api/v1/logs` - One local day's events
//! - `DELETE /api/v1/logs/:kind/:id` - Delete an event
//!
//! ## Rollups
//! - `GET /api/v1/rollups/daily` - One day's aggregate
//! - `GET /api/v1/rollups/range` - Day-by-day aggregates for a range
//!
//! ## Insights
//! - `POST /api/v1/insights` - Trend insights over a rolling window
//! - `GET /api/v1/snapshot` - Single-day snapshot
//!
//! ## Estimation
//! - `POST /api/v1/estimate/food` - Preview a food estimate
//! - `POST /api/v1/estimate/movement` - Preview a movement estimate
//! - `POST /api/v1/estimate/craving` - Craving alternatives
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use attune::api::{build_router, serve, ApiConfig, AppState};
//! use attune::estimator::KeywordEstimator;
//! use attune::events::store::InMemoryEventStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(InMemoryEventStore::new());
//!     let estimator = Arc::new(KeywordEstimator::new());
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(store, estimator, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.max_body_size;

    let api_routes = Router::new()
        // Log routes
        .route("/logs/food", post(routes::logs::log_food))
        .route("/logs/water", post(routes::logs::log_water))
        .route("/logs/craving", post(routes::logs::log_craving))
        .route("/logs/movement", post(routes::logs::log_movement))
        .route("/logs/sleep", post(routes::logs::log_sleep))
        .route("/logs/stress", post(routes::logs::log_stress))
        .route("/logs", get(routes::logs::get_logs))
        .route("/logs/:kind/:id", delete(routes::logs::delete_log))
        // Rollup routes
        .route("/rollups/daily", get(routes::rollups::daily_rollup))
        .route("/rollups/range", get(routes::rollups::range_rollups))
        // Insight routes
        .route("/insights", post(routes::insights::generate_insights))
        .route("/snapshot", get(routes::insights::daily_snapshot))
        // Estimation routes
        .route("/estimate/food", post(routes::estimate::estimate_food))
        .route("/estimate/movement", post(routes::estimate::estimate_movement))
        .route("/estimate/craving", post(routes::estimate::estimate_craving))
        .layer(DefaultBodyLimit::max(max_body));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Attune API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Attune API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::KeywordEstimator;
    use crate::events::store::InMemoryEventStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let store = Arc::new(InMemoryEventStore::new());
        let estimator = Arc::new(KeywordEstimator::new());
        let state = AppState::new(store, estimator, ApiConfig::default());
        build_router(state)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();
        let response = app.oneshot(get("/health/live")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app();
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["store"], "ok");
        assert_eq!(json["estimator"], "ok");
    }

    #[tokio::test]
    async fn test_log_food_returns_estimate() {
        let app = create_test_app();
        let response = app
            .oneshot(post_json(
                "/api/v1/logs/food",
                r#"{"text": "chicken burrito bowl"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["event"]["calories_min"], 450.0);
        assert_eq!(json["event"]["calories_max"], 650.0);
        assert_eq!(json["event"]["user_id"], "local");
        assert!(json["supportive_note"].is_string());
    }

    #[tokio::test]
    async fn test_log_water_then_daily_rollup() {
        let app = create_test_app();

        for body in [r#"{"ounces": 8.0}"#, r#"{"ounces": 16.0}"#] {
            let response = app
                .clone()
                .oneshot(post_json("/api/v1/logs/water", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app.oneshot(get("/api/v1/rollups/daily")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["water_total"], 24.0);
        assert_eq!(json["water_count"], 2);
    }

    #[tokio::test]
    async fn test_log_water_rejects_negative() {
        let app = create_test_app();
        let response = app
            .oneshot(post_json("/api/v1/logs/water", r#"{"ounces": -4.0}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_log_sleep_rejects_out_of_range_rating() {
        let app = create_test_app();
        let response = app
            .oneshot(post_json("/api/v1/logs/sleep", r#"{"sleep_quality": 9}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_log_craving_attaches_alternatives() {
        let app = create_test_app();
        let response = app
            .oneshot(post_json(
                "/api/v1/logs/craving",
                r#"{"text": "chocolate", "intensity": 4}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["suggestions"]["alternatives"].as_array().unwrap().len(), 4);
        assert!(json["event"]["suggestion"].is_object());
    }

    #[tokio::test]
    async fn test_get_logs_for_today() {
        let app = create_test_app();
        app.clone()
            .oneshot(post_json("/api/v1/logs/water", r#"{"ounces": 12.0}"#))
            .await
            .unwrap();

        let response = app.oneshot(get("/api/v1/logs")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["events"]["water"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_log() {
        let app = create_test_app();
        let created = app
            .clone()
            .oneshot(post_json("/api/v1/logs/water", r#"{"ounces": 12.0}"#))
            .await
            .unwrap();
        let id = body_json(created).await["event"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/v1/logs/water/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // Deleting again is a 404
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/v1/logs/water/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_unknown_kind_is_bad_request() {
        let app = create_test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/v1/logs/naps/{}", uuid::Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_insights_with_no_data() {
        let app = create_test_app();
        let response = app
            .oneshot(post_json("/api/v1/insights", r#"{"days": 30}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(
            json["patterns"][0],
            "Not enough data yet to identify patterns."
        );
        assert_eq!(json["influences"][0], "Keep logging to see insights!");
    }

    #[tokio::test]
    async fn test_insights_rejects_zero_window() {
        let app = create_test_app();
        let response = app
            .oneshot(post_json("/api/v1/insights", r#"{"days": 0}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_insights_cached_per_day() {
        let app = create_test_app();

        let first = app
            .clone()
            .oneshot(post_json("/api/v1/insights", r#"{"days": 7}"#))
            .await
            .unwrap();
        let first_json = body_json(first).await;

        // Logging new data doesn't change the cached result within the day
        app.clone()
            .oneshot(post_json("/api/v1/logs/water", r#"{"ounces": 64.0}"#))
            .await
            .unwrap();

        let second = app
            .oneshot(post_json("/api/v1/insights", r#"{"days": 7}"#))
            .await
            .unwrap();
        assert_eq!(first_json, body_json(second).await);
    }

    #[tokio::test]
    async fn test_insights_cached_per_window_length() {
        let app = create_test_app();

        // Water logged 10-20 days back: outside a 7-day window, inside 30
        for days_ago in 10..=20 {
            let ts = (chrono::Utc::now() - chrono::Duration::days(days_ago)).to_rfc3339();
            let body = format!(r#"{{"ounces": 90.0, "timestamp": "{ts}"}}"#);
            let response = app
                .clone()
                .oneshot(post_json("/api/v1/logs/water", &body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let week = app
            .clone()
            .oneshot(post_json("/api/v1/insights", r#"{"days": 7}"#))
            .await
            .unwrap();
        let week_json = body_json(week).await;
        assert_eq!(
            week_json["patterns"][0],
            "Not enough data yet to identify patterns."
        );

        // The 30-day window must see the data even with the 7-day result cached
        let month = app
            .oneshot(post_json("/api/v1/insights", r#"{"days": 30}"#))
            .await
            .unwrap();
        let month_json = body_json(month).await;
        assert!(month_json["patterns"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("You're doing great with staying hydrated!")));
    }

    #[tokio::test]
    async fn test_snapshot_empty_day() {
        let app = create_test_app();
        let response = app.oneshot(get("/api/v1/snapshot")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["summary_text"], "Nothing logged yet today.");
    }

    #[tokio::test]
    async fn test_snapshot_reflects_logged_day() {
        let app = create_test_app();
        app.clone()
            .oneshot(post_json("/api/v1/logs/water", r#"{"ounces": 90.0}"#))
            .await
            .unwrap();

        let response = app.oneshot(get("/api/v1/snapshot")).await.unwrap();
        let json = body_json(response).await;
        assert!(json["insights"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("You're staying well-hydrated today.")));
    }

    #[tokio::test]
    async fn test_estimate_food_does_not_store() {
        let app = create_test_app();
        let response = app
            .clone()
            .oneshot(post_json("/api/v1/estimate/food", r#"{"text": "pizza"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["calories_min"], 500.0);

        // Nothing was written
        let logs = app.oneshot(get("/api/v1/logs")).await.unwrap();
        let logs_json = body_json(logs).await;
        assert!(logs_json["events"]["food"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_estimate_movement() {
        let app = create_test_app();
        let response = app
            .oneshot(post_json(
                "/api/v1/estimate/movement",
                r#"{"text": "30 min walk", "intensity": "easy"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["activity_type"], "walking");
        assert_eq!(json["duration_min"], 30.0);
    }

    #[tokio::test]
    async fn test_rollup_range_rejects_inverted_range() {
        let app = create_test_app();
        let response = app
            .oneshot(get(
                "/api/v1/rollups/range?start=2024-03-10&end=2024-03-01",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rollup_range_has_no_gaps() {
        let app = create_test_app();
        let response = app
            .oneshot(get(
                "/api/v1/rollups/range?start=2024-03-01&end=2024-03-07",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let days = json.as_array().unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0]["date"], "2024-03-01");
        assert_eq!(days[6]["date"], "2024-03-07");
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let app = create_test_app();
        let response = app
            .oneshot(post_json("/api/v1/logs/food", "not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let app = create_test_app();
        app.clone()
            .oneshot(post_json(
                "/api/v1/logs/water",
                r#"{"user_id": "alice", "ounces": 20.0}"#,
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(get("/api/v1/rollups/daily?user_id=bob"))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["water_total"], 0.0);
    }
}
