//! Threshold policy for insight rules
//!
//! Every comparison the rule tables make goes through one of these structs,
//! so the policy can be tuned from configuration without touching the rule
//! traversal. Defaults match the product's shipped behavior.

use serde::{Deserialize, Serialize};

/// Thresholds for rolling-window (trend) insight rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsightThresholds {
    /// Water avg below this reads as "hydration tends low" (oz/day)
    #[serde(default = "default_water_low")]
    pub water_low: f64,

    /// Water avg above this reads as "hydration strong" (oz/day)
    #[serde(default = "default_water_high")]
    pub water_high: f64,

    /// Movement avg above this reads as "consistent movement" (min/day)
    #[serde(default = "default_movement_high")]
    pub movement_high: f64,

    /// Movement avg below this reads as "movement minimal" (min/day)
    #[serde(default = "default_movement_low")]
    pub movement_low: f64,

    /// Sleep quality avg above this reads as "sleep solid" (1-5)
    #[serde(default = "default_sleep_high")]
    pub sleep_high: f64,

    /// Sleep quality avg below this reads as "sleep lower than usual" (1-5)
    #[serde(default = "default_sleep_low")]
    pub sleep_low: f64,

    /// Stress avg above this reads as "stress elevated" (1-5)
    #[serde(default = "default_stress_high")]
    pub stress_high: f64,

    /// Cravings/day avg above this reads as "cravings more frequent"
    #[serde(default = "default_cravings_high")]
    pub cravings_high: f64,

    /// Sleep avg below this participates in influence conjunctions (1-5)
    #[serde(default = "default_influence_sleep_low")]
    pub influence_sleep_low: f64,

    /// Water avg below this triggers the hydration experiment (oz/day)
    #[serde(default = "default_experiment_water")]
    pub experiment_water: f64,

    /// Movement avg below this triggers the walk experiment (min/day)
    #[serde(default = "default_experiment_movement")]
    pub experiment_movement: f64,

    /// Sleep avg below this triggers the wind-down experiment (1-5)
    #[serde(default = "default_experiment_sleep")]
    pub experiment_sleep: f64,
}

fn default_water_low() -> f64 {
    50.0
}

fn default_water_high() -> f64 {
    80.0
}

fn default_movement_high() -> f64 {
    30.0
}

fn default_movement_low() -> f64 {
    15.0
}

fn default_sleep_high() -> f64 {
    3.5
}

fn default_sleep_low() -> f64 {
    2.5
}

fn default_stress_high() -> f64 {
    3.0
}

fn default_cravings_high() -> f64 {
    2.0
}

fn default_influence_sleep_low() -> f64 {
    3.0
}

fn default_experiment_water() -> f64 {
    60.0
}

fn default_experiment_movement() -> f64 {
    20.0
}

fn default_experiment_sleep() -> f64 {
    3.0
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            water_low: default_water_low(),
            water_high: default_water_high(),
            movement_high: default_movement_high(),
            movement_low: default_movement_low(),
            sleep_high: default_sleep_high(),
            sleep_low: default_sleep_low(),
            stress_high: default_stress_high(),
            cravings_high: default_cravings_high(),
            influence_sleep_low: default_influence_sleep_low(),
            experiment_water: default_experiment_water(),
            experiment_movement: default_experiment_movement(),
            experiment_sleep: default_experiment_sleep(),
        }
    }
}

/// Thresholds for single-day (snapshot) rules
///
/// Same shape of policy but compared against one day's totals instead of a
/// rolling average, so the numbers differ (e.g. 40oz today vs 50oz/day
/// trend).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotThresholds {
    /// Water total below this today reads as "drinking less than usual" (oz)
    #[serde(default = "default_day_water_low")]
    pub water_low: f64,

    /// Water total above this today reads as "well-hydrated" (oz)
    #[serde(default = "default_day_water_high")]
    pub water_high: f64,

    /// Protein total above this today is worth a mention (g)
    #[serde(default = "default_day_protein_high")]
    pub protein_high: f64,

    /// Fiber total above this today is worth a mention (g)
    #[serde(default = "default_day_fiber_high")]
    pub fiber_high: f64,

    /// Movement total above this today is worth a mention (min)
    #[serde(default = "default_day_movement_high")]
    pub movement_high: f64,

    /// Sleep quality avg below this today reads as challenging (1-5)
    #[serde(default = "default_day_sleep_low")]
    pub sleep_low: f64,

    /// Stress avg above this today reads as elevated (1-5)
    #[serde(default = "default_day_stress_high")]
    pub stress_high: f64,

    /// Craving count above this today is worth a mention
    #[serde(default = "default_day_cravings_high")]
    pub cravings_high: usize,

    /// Craving count above this pairs with low water in the suggestion chain
    #[serde(default = "default_day_cravings_hydration")]
    pub cravings_hydration: usize,

    /// Water total below this pairs with cravings in the suggestion chain (oz)
    #[serde(default = "default_day_water_hydration")]
    pub water_hydration: f64,
}

fn default_day_water_low() -> f64 {
    40.0
}

fn default_day_water_high() -> f64 {
    80.0
}

fn default_day_protein_high() -> f64 {
    60.0
}

fn default_day_fiber_high() -> f64 {
    25.0
}

fn default_day_movement_high() -> f64 {
    30.0
}

fn default_day_sleep_low() -> f64 {
    3.0
}

fn default_day_stress_high() -> f64 {
    3.0
}

fn default_day_cravings_high() -> usize {
    3
}

fn default_day_cravings_hydration() -> usize {
    2
}

fn default_day_water_hydration() -> f64 {
    50.0
}

impl Default for SnapshotThresholds {
    fn default() -> Self {
        Self {
            water_low: default_day_water_low(),
            water_high: default_day_water_high(),
            protein_high: default_day_protein_high(),
            fiber_high: default_day_fiber_high(),
            movement_high: default_day_movement_high(),
            sleep_low: default_day_sleep_low(),
            stress_high: default_day_stress_high(),
            cravings_high: default_day_cravings_high(),
            cravings_hydration: default_day_cravings_hydration(),
            water_hydration: default_day_water_hydration(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_policy() {
        let t = InsightThresholds::default();
        assert_eq!(t.water_low, 50.0);
        assert_eq!(t.water_high, 80.0);
        assert_eq!(t.sleep_high, 3.5);
        assert_eq!(t.cravings_high, 2.0);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let t: InsightThresholds = toml::from_str("water_low = 55.0").unwrap();
        assert_eq!(t.water_low, 55.0);
        assert_eq!(t.water_high, 80.0);
    }

    #[test]
    fn test_snapshot_defaults() {
        let t = SnapshotThresholds::default();
        assert_eq!(t.water_low, 40.0);
        assert_eq!(t.cravings_high, 3);
    }
}
