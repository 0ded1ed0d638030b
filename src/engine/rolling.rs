//! Rolling window statistics
//!
//! Collapses a sequence of `DailyRollup` records (typically 7, 30, or 90
//! days ending today) into per-metric averages. Each metric averages only
//! over the days where its underlying event count is nonzero: a day the
//! user didn't log sleep is absent from the sleep denominator rather than
//! silently counting as 0 and dragging the average down.
//!
//! Every average is a [`WindowAverage`] carrying its own day count, so
//! consumers can tell "averaged 0" apart from "never logged".

use crate::engine::rollup::DailyRollup;
use serde::{Deserialize, Serialize};

/// A per-metric mean plus the number of days that fed it
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct WindowAverage {
    /// Arithmetic mean over contributing days; 0 when `day_count` is 0
    pub mean: f64,
    /// Days in the window with at least one contributing event
    pub day_count: usize,
}

impl WindowAverage {
    fn from_days(values: impl Iterator<Item = f64>) -> Self {
        let mut sum = 0.0;
        let mut day_count = 0;
        for v in values {
            sum += v;
            day_count += 1;
        }
        Self {
            mean: if day_count == 0 { 0.0 } else { sum / day_count as f64 },
            day_count,
        }
    }

    pub fn has_data(&self) -> bool {
        self.day_count > 0
    }

    /// The mean, or `None` when no day contributed
    pub fn value(&self) -> Option<f64> {
        self.has_data().then_some(self.mean)
    }
}

/// Aggregate statistics over an N-day window of daily rollups
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RollingStats {
    /// Window length that was requested (7, 30, 90, ...)
    pub window_days: u32,
    /// Rollups actually present in the input sequence
    pub days_in_window: usize,
    /// Days with at least one event of any type
    pub days_with_data: usize,
    /// True when no day in the window has any data; callers must branch on
    /// this instead of reading all-zero averages as a signal
    pub insufficient_data: bool,

    pub calories_mid: WindowAverage,
    pub protein: WindowAverage,
    pub carbs: WindowAverage,
    pub fat: WindowAverage,
    pub fiber: WindowAverage,
    pub sugar: WindowAverage,
    pub water: WindowAverage,
    pub movement_min: WindowAverage,
    pub burn_mid: WindowAverage,
    /// Cravings per day, over days with at least one craving
    pub cravings_per_day: WindowAverage,
    /// Mean craving intensity, over days with rated cravings
    pub cravings_intensity: WindowAverage,
    pub sleep_quality: WindowAverage,
    pub hours_slept: WindowAverage,
    pub stress_level: WindowAverage,
}

impl RollingStats {
    /// Stats for a window with no data at all
    pub fn insufficient(window_days: u32) -> Self {
        Self {
            window_days,
            days_in_window: 0,
            days_with_data: 0,
            insufficient_data: true,
            calories_mid: WindowAverage::default(),
            protein: WindowAverage::default(),
            carbs: WindowAverage::default(),
            fat: WindowAverage::default(),
            fiber: WindowAverage::default(),
            sugar: WindowAverage::default(),
            water: WindowAverage::default(),
            movement_min: WindowAverage::default(),
            burn_mid: WindowAverage::default(),
            cravings_per_day: WindowAverage::default(),
            cravings_intensity: WindowAverage::default(),
            sleep_quality: WindowAverage::default(),
            hours_slept: WindowAverage::default(),
            stress_level: WindowAverage::default(),
        }
    }
}

/// Average a rollup field over the days where `count_of` is nonzero
fn metric_average(
    rollups: &[DailyRollup],
    count_of: impl Fn(&DailyRollup) -> usize,
    value_of: impl Fn(&DailyRollup) -> f64,
) -> WindowAverage {
    WindowAverage::from_days(
        rollups
            .iter()
            .filter(|r| count_of(r) > 0)
            .map(value_of),
    )
}

/// Compute rolling statistics over a sequence of daily rollups
///
/// `rollups` is the ordered day-by-day output of the rollup calculator for
/// `[today - days + 1, today]`; days the store knows nothing about appear as
/// zero rollups and are excluded per-metric. Pure and idempotent: calling
/// twice on the same input yields identical numeric fields.
pub fn compute_rolling_stats(rollups: &[DailyRollup], days: u32) -> RollingStats {
    let days_with_data = rollups.iter().filter(|r| r.has_any_data()).count();

    if days_with_data == 0 {
        let mut stats = RollingStats::insufficient(days);
        stats.days_in_window = rollups.len();
        return stats;
    }

    RollingStats {
        window_days: days,
        days_in_window: rollups.len(),
        days_with_data,
        insufficient_data: false,

        calories_mid: metric_average(rollups, |r| r.food_count, |r| r.calories_mid()),
        protein: metric_average(rollups, |r| r.food_count, |r| r.protein_total),
        carbs: metric_average(rollups, |r| r.food_count, |r| r.carbs_total),
        fat: metric_average(rollups, |r| r.food_count, |r| r.fat_total),
        fiber: metric_average(rollups, |r| r.food_count, |r| r.fiber_total),
        sugar: metric_average(rollups, |r| r.food_count, |r| r.sugar_total),
        water: metric_average(rollups, |r| r.water_count, |r| r.water_total),
        movement_min: metric_average(rollups, |r| r.movement_count, |r| r.movement_min_total),
        burn_mid: metric_average(
            rollups,
            |r| r.movement_count,
            |r| (r.burn_min_total + r.burn_max_total) / 2.0,
        ),
        cravings_per_day: metric_average(
            rollups,
            |r| r.cravings_count,
            |r| r.cravings_count as f64,
        ),
        cravings_intensity: metric_average(
            rollups,
            |r| r.cravings_rated_count,
            |r| r.cravings_avg_intensity,
        ),
        sleep_quality: metric_average(rollups, |r| r.sleep_count, |r| r.sleep_quality_avg),
        hours_slept: metric_average(rollups, |r| r.hours_slept_count, |r| r.hours_slept_avg),
        stress_level: metric_average(rollups, |r| r.stress_count, |r| r.stress_level_avg),
    }
}
