//! Trend insight generation
//!
//! Walks the rule tables in [`rules`](crate::insights::rules) over a
//! [`RollingStats`] window and assembles the four-part insight payload. The
//! only nondeterminism is the supportive line, drawn from a fixed pool; tests
//! inject a seeded RNG to pin it down.

use crate::engine::rolling::RollingStats;
use crate::insights::rules::{
    DEFAULT_INFLUENCES, EXPERIMENT_RULES, INFLUENCE_RULES, PATTERN_RULES,
};
use crate::insights::thresholds::InsightThresholds;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The four-part insight payload for a rolling window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsightResult {
    /// Observations about individual metrics
    pub patterns: Vec<String>,
    /// Cross-metric observations; never empty
    pub influences: Vec<String>,
    /// A single suggested experiment
    pub experiment: String,
    /// An encouraging closer drawn from a fixed pool
    pub supportive_line: String,
}

/// Closing lines for windows with data
pub static SUPPORTIVE_LINES: &[&str] = &[
    "Remember, wellness is about progress, not perfection.",
    "You're showing up for yourself, and that's what matters most.",
    "Every day is a new opportunity to learn about what works for you.",
    "Small, consistent changes add up to big shifts over time.",
    "Your body is always communicating with you. You're learning to listen.",
];

impl InsightResult {
    /// The fixed payload for a window with no logged data at all
    pub fn no_data() -> Self {
        Self {
            patterns: vec!["Not enough data yet to identify patterns.".to_string()],
            influences: vec!["Keep logging to see insights!".to_string()],
            experiment: "Try logging consistently for a week to start seeing patterns."
                .to_string(),
            supportive_line: "Every small step counts. You're doing great!".to_string(),
        }
    }
}

/// Generates trend insights from rolling statistics
#[derive(Debug, Clone, Default)]
pub struct InsightGenerator {
    thresholds: InsightThresholds,
}

impl InsightGenerator {
    pub fn new(thresholds: InsightThresholds) -> Self {
        Self { thresholds }
    }

    /// Generate insights, drawing the supportive line from thread-local RNG
    pub fn generate(&self, stats: &RollingStats) -> InsightResult {
        self.generate_with_rng(stats, &mut rand::thread_rng())
    }

    /// Generate insights with a caller-supplied RNG
    ///
    /// Apart from the supportive line this is deterministic: the same stats
    /// always yield the same patterns, influences, and experiment, in table
    /// order.
    pub fn generate_with_rng<R: Rng>(&self, stats: &RollingStats, rng: &mut R) -> InsightResult {
        if stats.insufficient_data {
            debug!(window_days = stats.window_days, "no data in window, returning fixed insight");
            return InsightResult::no_data();
        }

        let t = &self.thresholds;

        let patterns: Vec<String> = PATTERN_RULES
            .iter()
            .filter(|r| (r.applies)(stats, t))
            .map(|r| r.statement.to_string())
            .collect();

        let mut influences: Vec<String> = INFLUENCE_RULES
            .iter()
            .filter(|r| (r.applies)(stats, t))
            .map(|r| r.statement.to_string())
            .collect();
        if influences.is_empty() {
            influences = DEFAULT_INFLUENCES.iter().map(|s| s.to_string()).collect();
        }

        // The table ends in an always-true fallback, so find() cannot miss
        let experiment = EXPERIMENT_RULES
            .iter()
            .find(|r| (r.applies)(stats, t))
            .map(|r| r.statement.to_string())
            .unwrap_or_default();

        let supportive_line =
            SUPPORTIVE_LINES[rng.gen_range(0..SUPPORTIVE_LINES.len())].to_string();

        debug!(
            patterns = patterns.len(),
            influences = influences.len(),
            days_with_data = stats.days_with_data,
            "generated trend insights"
        );

        InsightResult {
            patterns,
            influences,
            experiment,
            supportive_line,
        }
    }
}
