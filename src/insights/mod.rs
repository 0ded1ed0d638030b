//! Heuristic insight engine
//!
//! Deterministic rule tables over rollup data, in place of a model call:
//! trend insights for a rolling window, daily snapshots for a single day,
//! and a per-user day-scoped cache.

pub mod cache;
pub mod generator;
pub mod rules;
pub mod snapshot;
pub mod thresholds;

pub use cache::{cache_key, InsightCache};
pub use generator::{InsightGenerator, InsightResult};
pub use snapshot::{DailySnapshot, SnapshotComposer};
pub use thresholds::{InsightThresholds, SnapshotThresholds};
