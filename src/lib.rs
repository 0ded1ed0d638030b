//! # Attune
//!
//! Supportive wellness logging engine: free-text event logging, daily
//! rollups, rolling trend statistics, and rule-based narrative insights,
//! with gentle, body-neutral language throughout.
//!
//! ## Features
//!
//! - **Six event types**: food, water, cravings, movement, sleep, stress
//! - **Free-text estimation**: keyword heuristics (or a remote service)
//!   turn "burrito bowl" into a calorie range and macros
//! - **Local-day rollups**: events bucket by the user's calendar day, not UTC
//! - **Rolling trends**: per-metric averages that never count unlogged days
//! - **Narrative insights**: deterministic rule tables produce patterns,
//!   influences, and a suggested experiment
//!
//! ## Modules
//!
//! - [`events`]: Event types and the store seam
//! - [`engine`]: Day windowing, daily rollups, rolling statistics
//! - [`insights`]: Rule-driven trend insights and daily snapshots
//! - [`estimator`]: Free-text estimation backends
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use attune::engine::{compute_daily_rollup, compute_rolling_stats};
//! use attune::events::types::{EventSet, WaterEvent};
//! use attune::insights::InsightGenerator;
//! use chrono::NaiveDate;
//!
//! let mut events = EventSet::new();
//! events.water.push(WaterEvent::new("local", 16.0));
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
//! let rollup = compute_daily_rollup("local", date, &events);
//! let stats = compute_rolling_stats(&[rollup], 7);
//!
//! let insights = InsightGenerator::default().generate(&stats);
//! println!("{}", insights.experiment);
//! ```

pub mod api;
pub mod config;
pub mod engine;
pub mod estimator;
pub mod events;
pub mod insights;

// Re-export top-level types for convenience
pub use events::store::{Event, EventKind, EventStore, InMemoryEventStore, StoreError};
pub use events::types::EventSet;

pub use engine::{
    compute_daily_rollup, compute_rolling_stats, DailyRollup, RollingStats, WindowAverage,
};

pub use insights::{
    DailySnapshot, InsightCache, InsightGenerator, InsightResult, InsightThresholds,
    SnapshotComposer, SnapshotThresholds,
};

pub use estimator::{
    EstimatorError, FoodEstimate, FoodQuery, KeywordEstimator, MovementEstimate, RemoteEstimator,
    TextEstimator,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};
