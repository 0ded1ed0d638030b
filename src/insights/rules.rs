//! Heuristic rule tables
//!
//! Insights are produced by walking small static tables of rules rather than
//! by branching inline, so the full statement catalog is visible in one place
//! and each rule can be tested on its own. A rule never fires for a metric
//! the user hasn't logged: a missing average is skipped, not treated as zero.

use crate::engine::rolling::RollingStats;
use crate::engine::rollup::DailyRollup;
use crate::insights::thresholds::{InsightThresholds, SnapshotThresholds};

/// One trend rule: a predicate over the rolling window plus the statement
/// it contributes when the predicate holds
pub struct TrendRule {
    pub applies: fn(&RollingStats, &InsightThresholds) -> bool,
    pub statement: &'static str,
}

fn below(avg: crate::engine::rolling::WindowAverage, limit: f64) -> bool {
    avg.value().is_some_and(|v| v < limit)
}

fn above(avg: crate::engine::rolling::WindowAverage, limit: f64) -> bool {
    avg.value().is_some_and(|v| v > limit)
}

/// Observations about individual metrics over the window
pub static PATTERN_RULES: &[TrendRule] = &[
    TrendRule {
        applies: |s, t| below(s.water, t.water_low),
        statement: "Your water intake tends to be on the lower side.",
    },
    TrendRule {
        applies: |s, t| above(s.water, t.water_high),
        statement: "You're doing great with staying hydrated!",
    },
    TrendRule {
        applies: |s, t| above(s.movement_min, t.movement_high),
        statement: "You're consistently making time for movement, which is wonderful.",
    },
    TrendRule {
        applies: |s, t| below(s.movement_min, t.movement_low),
        statement: "Movement has been minimal lately.",
    },
    TrendRule {
        applies: |s, t| above(s.sleep_quality, t.sleep_high),
        statement: "Your sleep quality seems pretty solid overall.",
    },
    TrendRule {
        applies: |s, t| below(s.sleep_quality, t.sleep_low),
        statement: "Sleep quality has been lower than usual.",
    },
    TrendRule {
        applies: |s, t| above(s.stress_level, t.stress_high),
        statement: "Stress levels have been elevated recently.",
    },
    TrendRule {
        applies: |s, t| above(s.cravings_per_day, t.cravings_high),
        statement: "You've been experiencing cravings more frequently.",
    },
];

/// Cross-metric correlations; each needs both metrics present
pub static INFLUENCE_RULES: &[TrendRule] = &[
    TrendRule {
        applies: |s, t| below(s.sleep_quality, t.influence_sleep_low) && above(s.stress_level, t.stress_high),
        statement: "Lower sleep quality might be contributing to higher stress levels.",
    },
    TrendRule {
        applies: |s, t| below(s.sleep_quality, t.influence_sleep_low) && above(s.cravings_per_day, t.cravings_high),
        statement: "Less restful sleep could be influencing more frequent cravings.",
    },
    TrendRule {
        applies: |s, t| below(s.water, t.water_low) && above(s.stress_level, t.stress_high),
        statement: "Dehydration can sometimes amplify feelings of stress.",
    },
    TrendRule {
        applies: |s, t| below(s.movement_min, t.movement_low) && above(s.stress_level, t.stress_high),
        statement: "Regular movement can help manage stress levels.",
    },
];

/// Lines used when no influence rule fires
pub static DEFAULT_INFLUENCES: &[&str] = &[
    "Your habits seem fairly balanced across different areas.",
    "Continue paying attention to what makes you feel your best.",
];

/// Experiment suggestions, first match wins; the last entry always applies
pub static EXPERIMENT_RULES: &[TrendRule] = &[
    TrendRule {
        applies: |s, t| below(s.water, t.experiment_water),
        statement: "Try adding one extra glass of water in the morning and notice how you feel.",
    },
    TrendRule {
        applies: |s, t| below(s.movement_min, t.experiment_movement),
        statement: "Try a 10-minute walk after one meal and see how it affects your energy.",
    },
    TrendRule {
        applies: |s, t| below(s.sleep_quality, t.experiment_sleep),
        statement: "Consider winding down 15 minutes earlier before bed and track your sleep quality.",
    },
    TrendRule {
        applies: |_, _| true,
        statement: "Keep doing what you're doing! Notice which days feel best and what contributes to that.",
    },
];

/// One snapshot rule: inspects a single day's rollup and may contribute an
/// observation. Returns `String` because several lines interpolate the day's
/// totals.
pub struct DayRule {
    pub apply: fn(&DailyRollup, &SnapshotThresholds) -> Option<String>,
}

pub static DAY_OBSERVATION_RULES: &[DayRule] = &[
    DayRule {
        apply: |r, t| {
            (r.water_count > 0 && r.water_total < t.water_low).then(|| {
                "You might be noticing you're drinking less water than usual today.".to_string()
            })
        },
    },
    DayRule {
        apply: |r, t| {
            (r.water_total > t.water_high)
                .then(|| "You're staying well-hydrated today.".to_string())
        },
    },
    DayRule {
        apply: |r, t| {
            (r.protein_total > t.protein_high)
                .then(|| "You're getting solid protein today.".to_string())
        },
    },
    DayRule {
        apply: |r, t| {
            (r.fiber_total > t.fiber_high)
                .then(|| "You're including plenty of fiber-rich foods.".to_string())
        },
    },
    DayRule {
        apply: |r, t| {
            (r.movement_min_total > t.movement_high)
                .then(|| format!("You moved for {} minutes today.", r.movement_min_total.round()))
        },
    },
    DayRule {
        apply: |r, t| {
            (r.sleep_count > 0 && r.sleep_quality_avg < t.sleep_low).then(|| {
                "It looks like sleep was challenging. That can affect everything.".to_string()
            })
        },
    },
    DayRule {
        apply: |r, t| {
            (r.stress_count > 0 && r.stress_level_avg > t.stress_high).then(|| {
                "You logged higher stress today. Be gentle with yourself.".to_string()
            })
        },
    },
    DayRule {
        apply: |r, t| {
            (r.cravings_count > t.cravings_high).then(|| {
                format!(
                    "You logged {} cravings today. That's valuable data.",
                    r.cravings_count
                )
            })
        },
    },
];

/// Day suggestion chain, first match wins; the last entry always applies
pub static DAY_SUGGESTION_RULES: &[DayRule] = &[
    DayRule {
        apply: |r, t| {
            (r.sleep_count > 0
                && r.sleep_quality_avg < t.sleep_low
                && r.stress_level_avg > t.stress_high)
                .then(|| {
                    "If you'd like, try a 5-minute breathing exercise before bed tonight."
                        .to_string()
                })
        },
    },
    DayRule {
        apply: |r, t| {
            (r.water_count > 0 && r.water_total < t.water_low).then(|| {
                "If it feels right, try keeping water nearby tomorrow. It might help.".to_string()
            })
        },
    },
    DayRule {
        apply: |r, _| {
            (r.movement_count == 0)
                .then(|| "If you're up for it, a short walk tomorrow might feel good.".to_string())
        },
    },
    DayRule {
        apply: |r, t| {
            (r.cravings_count > t.cravings_hydration && r.water_total < t.water_hydration).then(
                || "Sometimes staying hydrated can help with cravings. Worth noticing.".to_string(),
            )
        },
    },
    DayRule {
        apply: |_, _| {
            Some("You're building awareness. That's the most important part.".to_string())
        },
    },
];
