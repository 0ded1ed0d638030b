//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::estimator::TextEstimator;
use crate::events::store::EventStore;
use crate::insights::cache::InsightCache;
use crate::insights::generator::InsightGenerator;
use crate::insights::snapshot::SnapshotComposer;
use crate::insights::thresholds::{InsightThresholds, SnapshotThresholds};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Event store backing all log reads and writes
    pub store: Arc<dyn EventStore>,
    /// Estimation backend for free-text logs
    pub estimator: Arc<dyn TextEstimator>,
    /// Trend insight generator
    pub generator: Arc<InsightGenerator>,
    /// Daily snapshot composer
    pub composer: Arc<SnapshotComposer>,
    /// Per-user day-scoped insight cache
    pub cache: Arc<InsightCache>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with default thresholds
    pub fn new(
        store: Arc<dyn EventStore>,
        estimator: Arc<dyn TextEstimator>,
        config: ApiConfig,
    ) -> Self {
        Self::with_thresholds(
            store,
            estimator,
            config,
            InsightThresholds::default(),
            SnapshotThresholds::default(),
        )
    }

    /// Create AppState with configured thresholds
    pub fn with_thresholds(
        store: Arc<dyn EventStore>,
        estimator: Arc<dyn TextEstimator>,
        config: ApiConfig,
        thresholds: InsightThresholds,
        snapshot: SnapshotThresholds,
    ) -> Self {
        Self {
            store,
            estimator,
            generator: Arc::new(InsightGenerator::new(thresholds)),
            composer: Arc::new(SnapshotComposer::new(snapshot)),
            cache: Arc::new(InsightCache::new()),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8088,
            request_timeout_ms: 30_000,
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
