//! Rollup aggregation engine
//!
//! The pure computational core: local-day windowing, daily rollups, and
//! rolling multi-day statistics. Everything here is a synchronous,
//! side-effect-free transformation over in-memory data, safe to call
//! concurrently for different users or ranges with no coordination.
//!
//! - [`window`]: local calendar-day filtering of an `EventSet`
//! - [`rollup`]: one day's events → `DailyRollup`
//! - [`rolling`]: a rollup sequence → `RollingStats`

pub mod rolling;
pub mod rollup;
pub mod window;

pub use rolling::{compute_rolling_stats, RollingStats, WindowAverage};
pub use rollup::{compute_daily_rollup, DailyRollup};
pub use window::{end_of_local_day, local_date, today, DayWindow};
