//! Daily rollup calculation
//!
//! Reduces one local day's events into a single `DailyRollup`: additive
//! totals, event counts, and guarded averages. The rollup is a pure function
//! of its input (recomputed on demand, never the source of truth) and is
//! order-independent over the event arrays.
//!
//! Averages are only taken over events that actually carry the field
//! (a missing `hours_slept` doesn't drag the mean toward zero). A zero
//! average is ambiguous with "no data", so every average travels with the
//! count that fed it; callers check the count, not the value.

use crate::events::types::EventSet;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One user's aggregate for one local calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyRollup {
    pub user_id: String,
    pub date: NaiveDate,

    // Food totals (missing estimates contribute 0)
    pub calories_min_total: f64,
    pub calories_max_total: f64,
    pub protein_total: f64,
    pub carbs_total: f64,
    pub fat_total: f64,
    pub fiber_total: f64,
    pub sugar_total: f64,

    // Water / movement totals
    pub water_total: f64,
    pub movement_min_total: f64,
    pub burn_min_total: f64,
    pub burn_max_total: f64,

    // Cravings
    pub cravings_count: usize,
    /// Mean intensity over cravings that have one; 0 when none do
    pub cravings_avg_intensity: f64,

    // Sleep / stress averages (0 when no contributing events)
    pub sleep_quality_avg: f64,
    pub hours_slept_avg: f64,
    pub stress_level_avg: f64,

    // Event counts, for disambiguating 0-valued averages from "no data"
    pub food_count: usize,
    pub water_count: usize,
    pub movement_count: usize,
    pub sleep_count: usize,
    pub stress_count: usize,
    /// Cravings that carried an intensity rating
    pub cravings_rated_count: usize,
    /// Sleep events that carried hours_slept
    pub hours_slept_count: usize,
}

impl DailyRollup {
    /// An all-zero rollup for a day with no events
    pub fn empty(user_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            date,
            calories_min_total: 0.0,
            calories_max_total: 0.0,
            protein_total: 0.0,
            carbs_total: 0.0,
            fat_total: 0.0,
            fiber_total: 0.0,
            sugar_total: 0.0,
            water_total: 0.0,
            movement_min_total: 0.0,
            burn_min_total: 0.0,
            burn_max_total: 0.0,
            cravings_count: 0,
            cravings_avg_intensity: 0.0,
            sleep_quality_avg: 0.0,
            hours_slept_avg: 0.0,
            stress_level_avg: 0.0,
            food_count: 0,
            water_count: 0,
            movement_count: 0,
            sleep_count: 0,
            stress_count: 0,
            cravings_rated_count: 0,
            hours_slept_count: 0,
        }
    }

    /// Whether any event of any type contributed to this rollup
    pub fn has_any_data(&self) -> bool {
        self.food_count > 0
            || self.water_count > 0
            || self.movement_count > 0
            || self.sleep_count > 0
            || self.stress_count > 0
            || self.cravings_count > 0
    }

    /// Midpoint of the calorie range, the single number trend views use
    pub fn calories_mid(&self) -> f64 {
        (self.calories_min_total + self.calories_max_total) / 2.0
    }
}

/// Mean of `sum` over `count` carriers; 0 when there are none
fn guarded_mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Reduce one day's events into a `DailyRollup`
///
/// `events` must already be filtered to the target day (see
/// [`EventSet::filter_day`](crate::events::EventSet)). Pure and
/// order-independent: shuffling the input vectors yields an identical rollup.
pub fn compute_daily_rollup(
    user_id: &str,
    date: NaiveDate,
    events: &EventSet,
) -> DailyRollup {
    let mut rollup = DailyRollup::empty(user_id, date);

    for food in &events.food {
        rollup.calories_min_total += food.calories_min.unwrap_or(0.0);
        rollup.calories_max_total += food.calories_max.unwrap_or(0.0);
        rollup.protein_total += food.protein_g.unwrap_or(0.0);
        rollup.carbs_total += food.carbs_g.unwrap_or(0.0);
        rollup.fat_total += food.fat_g.unwrap_or(0.0);
        rollup.fiber_total += food.fiber_g.unwrap_or(0.0);
        rollup.sugar_total += food.sugar_g.unwrap_or(0.0);
    }
    rollup.food_count = events.food.len();

    for water in &events.water {
        rollup.water_total += water.ounces;
    }
    rollup.water_count = events.water.len();

    for movement in &events.movement {
        rollup.movement_min_total += movement.duration_min.unwrap_or(0.0);
        rollup.burn_min_total += movement.estimated_burn_min.unwrap_or(0.0);
        rollup.burn_max_total += movement.estimated_burn_max.unwrap_or(0.0);
    }
    rollup.movement_count = events.movement.len();

    rollup.cravings_count = events.cravings.len();
    let mut intensity_sum = 0.0;
    for craving in &events.cravings {
        if let Some(intensity) = craving.intensity {
            intensity_sum += intensity as f64;
            rollup.cravings_rated_count += 1;
        }
    }
    rollup.cravings_avg_intensity = guarded_mean(intensity_sum, rollup.cravings_rated_count);

    rollup.sleep_count = events.sleep.len();
    let quality_sum: f64 = events.sleep.iter().map(|s| s.sleep_quality as f64).sum();
    rollup.sleep_quality_avg = guarded_mean(quality_sum, rollup.sleep_count);

    let mut hours_sum = 0.0;
    for sleep in &events.sleep {
        if let Some(hours) = sleep.hours_slept {
            hours_sum += hours;
            rollup.hours_slept_count += 1;
        }
    }
    rollup.hours_slept_avg = guarded_mean(hours_sum, rollup.hours_slept_count);

    rollup.stress_count = events.stress.len();
    let stress_sum: f64 = events.stress.iter().map(|s| s.stress_level as f64).sum();
    rollup.stress_level_avg = guarded_mean(stress_sum, rollup.stress_count);

    rollup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::{
        CravingEvent, FoodEvent, MovementEvent, SleepEvent, StressEvent, WaterEvent,
    };

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn test_empty_day_is_valid_zero_rollup() {
        let rollup = compute_daily_rollup("u1", day(), &EventSet::new());
        assert!(!rollup.has_any_data());
        assert_eq!(rollup.water_total, 0.0);
        assert_eq!(rollup.sleep_quality_avg, 0.0);
        assert_eq!(rollup.cravings_count, 0);
    }

    #[test]
    fn test_food_totals() {
        // Scenario: one food event with a calorie range and protein
        let mut set = EventSet::new();
        let mut food = FoodEvent::new("u1", "bowl").calories(300.0, 400.0);
        food.protein_g = Some(15.0);
        set.food.push(food);

        let rollup = compute_daily_rollup("u1", day(), &set);
        assert_eq!(rollup.calories_min_total, 300.0);
        assert_eq!(rollup.calories_max_total, 400.0);
        assert_eq!(rollup.protein_total, 15.0);
        assert_eq!(rollup.calories_mid(), 350.0);
        assert_eq!(rollup.food_count, 1);
    }

    #[test]
    fn test_pending_estimate_contributes_zero() {
        let mut set = EventSet::new();
        set.food.push(FoodEvent::new("u1", "estimate pending"));
        set.food
            .push(FoodEvent::new("u1", "estimated").calories(200.0, 250.0));

        let rollup = compute_daily_rollup("u1", day(), &set);
        assert_eq!(rollup.calories_min_total, 200.0);
        assert_eq!(rollup.calories_max_total, 250.0);
        assert_eq!(rollup.food_count, 2);
    }

    #[test]
    fn test_water_sum_invariant() {
        let mut set = EventSet::new();
        for ounces in [8.0, 16.0, 12.5] {
            set.water.push(WaterEvent::new("u1", ounces));
        }

        let rollup = compute_daily_rollup("u1", day(), &set);
        assert_eq!(rollup.water_total, 36.5);
        assert_eq!(rollup.water_count, 3);
    }

    #[test]
    fn test_single_sleep_event_not_diluted() {
        // One quality-4 sleep event must average to exactly 4
        let mut set = EventSet::new();
        set.sleep.push(SleepEvent::new("u1", 4));

        let rollup = compute_daily_rollup("u1", day(), &set);
        assert_eq!(rollup.sleep_quality_avg, 4.0);
        assert_eq!(rollup.sleep_count, 1);
    }

    #[test]
    fn test_hours_average_excludes_missing() {
        let mut set = EventSet::new();
        set.sleep.push(SleepEvent::new("u1", 3).hours(6.0));
        set.sleep.push(SleepEvent::new("u1", 4)); // no hours logged

        let rollup = compute_daily_rollup("u1", day(), &set);
        assert_eq!(rollup.hours_slept_avg, 6.0);
        assert_eq!(rollup.hours_slept_count, 1);
        assert_eq!(rollup.sleep_count, 2);
    }

    #[test]
    fn test_craving_intensity_average_over_rated_only() {
        let mut set = EventSet::new();
        set.cravings.push(CravingEvent::new("u1", "sweet").intensity(4));
        set.cravings.push(CravingEvent::new("u1", "salty").intensity(2));
        set.cravings.push(CravingEvent::new("u1", "unrated"));

        let rollup = compute_daily_rollup("u1", day(), &set);
        assert_eq!(rollup.cravings_count, 3);
        assert_eq!(rollup.cravings_rated_count, 2);
        assert_eq!(rollup.cravings_avg_intensity, 3.0);
    }

    #[test]
    fn test_order_independence() {
        let mut set = EventSet::new();
        set.water.push(WaterEvent::new("u1", 8.0));
        set.water.push(WaterEvent::new("u1", 24.0));
        set.stress.push(StressEvent::new("u1", 2));
        set.stress.push(StressEvent::new("u1", 5));
        set.movement
            .push(MovementEvent::new("u1", "walking").duration(30.0).burn(80.0, 120.0));

        let forward = compute_daily_rollup("u1", day(), &set);

        set.water.reverse();
        set.stress.reverse();
        let shuffled = compute_daily_rollup("u1", day(), &set);

        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_movement_totals() {
        let mut set = EventSet::new();
        set.movement
            .push(MovementEvent::new("u1", "walking").duration(20.0).burn(56.0, 84.0));
        set.movement
            .push(MovementEvent::new("u1", "yoga").duration(40.0));

        let rollup = compute_daily_rollup("u1", day(), &set);
        assert_eq!(rollup.movement_min_total, 60.0);
        assert_eq!(rollup.burn_min_total, 56.0);
        assert_eq!(rollup.burn_max_total, 84.0);
        assert_eq!(rollup.movement_count, 2);
    }

    #[test]
    fn test_stress_average() {
        let mut set = EventSet::new();
        set.stress.push(StressEvent::new("u1", 2));
        set.stress.push(StressEvent::new("u1", 5));

        let rollup = compute_daily_rollup("u1", day(), &set);
        assert_eq!(rollup.stress_level_avg, 3.5);
    }

    #[test]
    fn test_rollup_serializes() {
        let rollup = DailyRollup::empty("u1", day());
        let json = serde_json::to_string(&rollup).unwrap();
        assert!(json.contains("\"water_total\":0.0"));
        let restored: DailyRollup = serde_json::from_str(&json).unwrap();
        assert_eq!(rollup, restored);
    }
}
