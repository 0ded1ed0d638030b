//! Daily snapshot composition
//!
//! Turns a single day's rollup into the "today" card: a summary sentence,
//! per-metric observations, one suggestion, and a supportive closer. Like
//! the trend generator this is rule-table driven, with the RNG injected so
//! the template and line choices can be pinned in tests.

use crate::engine::rollup::DailyRollup;
use crate::insights::rules::{DAY_OBSERVATION_RULES, DAY_SUGGESTION_RULES};
use crate::insights::thresholds::SnapshotThresholds;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The "today" view of one day's data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySnapshot {
    /// One-sentence recap of what was logged
    pub summary_text: String,
    /// Per-metric observations, possibly empty on a quiet day
    pub insights: Vec<String>,
    /// A single gentle suggestion
    pub suggestion: String,
    /// Encouraging closer drawn from a fixed pool
    pub supportive_line: String,
}

static SUPPORTIVE_LINES: &[&str] = &[
    "You're showing up for yourself. That's what matters.",
    "This is progress. You're noticing patterns.",
    "Keep going. You're learning what works for you.",
    "Every day of data helps you understand your body better.",
];

impl DailySnapshot {
    /// The fixed snapshot for a day with no events
    pub fn no_data() -> Self {
        Self {
            summary_text: "Nothing logged yet today.".to_string(),
            insights: Vec::new(),
            suggestion: "Whenever you're ready, log a meal or a glass of water to get started."
                .to_string(),
            supportive_line: "Every small step counts. You're doing great!".to_string(),
        }
    }
}

/// Composes daily snapshots from rollups
#[derive(Debug, Clone, Default)]
pub struct SnapshotComposer {
    thresholds: SnapshotThresholds,
}

impl SnapshotComposer {
    pub fn new(thresholds: SnapshotThresholds) -> Self {
        Self { thresholds }
    }

    pub fn compose(&self, rollup: &DailyRollup) -> DailySnapshot {
        self.compose_with_rng(rollup, &mut rand::thread_rng())
    }

    /// Compose a snapshot with a caller-supplied RNG
    ///
    /// Observations and the suggestion are deterministic; only the summary
    /// template and closing line vary.
    pub fn compose_with_rng<R: Rng>(&self, rollup: &DailyRollup, rng: &mut R) -> DailySnapshot {
        if !rollup.has_any_data() {
            debug!(user_id = %rollup.user_id, date = %rollup.date, "empty day, returning fixed snapshot");
            return DailySnapshot::no_data();
        }

        let t = &self.thresholds;

        let insights: Vec<String> = DAY_OBSERVATION_RULES
            .iter()
            .filter_map(|r| (r.apply)(rollup, t))
            .collect();

        // The suggestion table ends in an always-Some fallback
        let suggestion = DAY_SUGGESTION_RULES
            .iter()
            .find_map(|r| (r.apply)(rollup, t))
            .unwrap_or_default();

        let list = join_naturally(&summary_parts(rollup));
        let summary_templates = [
            format!("You logged {list} today."),
            format!("Today you tracked {list}."),
            format!("You checked in with your body today: {list}."),
        ];
        let summary_text = summary_templates[rng.gen_range(0..summary_templates.len())].clone();
        let supportive_line =
            SUPPORTIVE_LINES[rng.gen_range(0..SUPPORTIVE_LINES.len())].to_string();

        debug!(
            user_id = %rollup.user_id,
            date = %rollup.date,
            insights = insights.len(),
            "composed daily snapshot"
        );

        DailySnapshot {
            summary_text,
            insights,
            suggestion,
            supportive_line,
        }
    }
}

/// Summary fragments for the event types the day actually has
fn summary_parts(rollup: &DailyRollup) -> Vec<String> {
    let mut parts = Vec::new();
    if rollup.food_count > 0 {
        parts.push("food".to_string());
    }
    if rollup.water_count > 0 {
        parts.push(format!("{}oz of water", rollup.water_total.round()));
    }
    if rollup.movement_count > 0 {
        parts.push(format!(
            "{} minutes of movement",
            rollup.movement_min_total.round()
        ));
    }
    if rollup.cravings_count > 0 {
        parts.push(if rollup.cravings_count == 1 {
            "a craving".to_string()
        } else {
            format!("{} cravings", rollup.cravings_count)
        });
    }
    if rollup.sleep_count > 0 {
        parts.push("a sleep check-in".to_string());
    }
    if rollup.stress_count > 0 {
        parts.push("a stress check-in".to_string());
    }
    parts
}

/// "a", "a and b", "a, b, and c"
fn join_naturally(parts: &[String]) -> String {
    match parts {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{a} and {b}"),
        [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
    }
}
