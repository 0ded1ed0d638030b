//! Core event types for the Attune wellness engine
//!
//! This module defines the six immutable event records a user can log:
//! - `FoodEvent`: free-text food entry plus estimated nutrition ranges
//! - `WaterEvent`: ounces of water
//! - `CravingEvent`: a craving with optional intensity and category
//! - `MovementEvent`: an activity with duration and estimated burn range
//! - `SleepEvent`: sleep quality rating with optional hours
//! - `StressEvent`: stress level rating
//!
//! Numeric nutrition/duration fields are `Option` until the text-estimation
//! service populates them; the rollup layer treats `None` as contributing 0.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Anything with a wall-clock timestamp that can be bucketed into a day
pub trait Timestamped {
    /// When the event happened (stored UTC, bucketed in local time)
    fn timestamp(&self) -> DateTime<Utc>;
}

macro_rules! impl_timestamped {
    ($($ty:ty),+) => {
        $(impl Timestamped for $ty {
            fn timestamp(&self) -> DateTime<Utc> {
                self.timestamp
            }
        })+
    };
}

/// Confidence of an external nutrition/burn estimate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Meal slot tag for a food event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MealTag {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// Perceived effort of a movement event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MovementIntensity {
    Easy,
    Moderate,
    Hard,
}

/// A logged food entry
///
/// Nutrition fields stay `None` until an estimate arrives (or if estimation
/// failed); they then hold non-negative values with `calories_min <= calories_max`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodEvent {
    pub id: Uuid,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    /// The free text the user typed ("burrito bowl with chicken")
    pub text: String,
    #[serde(default)]
    pub meal_tag: Option<MealTag>,
    #[serde(default)]
    pub calories_min: Option<f64>,
    #[serde(default)]
    pub calories_max: Option<f64>,
    #[serde(default)]
    pub protein_g: Option<f64>,
    #[serde(default)]
    pub carbs_g: Option<f64>,
    #[serde(default)]
    pub fat_g: Option<f64>,
    #[serde(default)]
    pub fiber_g: Option<f64>,
    #[serde(default)]
    pub sugar_g: Option<f64>,
    #[serde(default)]
    pub confidence: Option<Confidence>,
}

impl FoodEvent {
    /// Create a food event with no estimate yet, timestamped now
    pub fn new(user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            timestamp: Utc::now(),
            text: text.into(),
            meal_tag: None,
            calories_min: None,
            calories_max: None,
            protein_g: None,
            carbs_g: None,
            fat_g: None,
            fiber_g: None,
            sugar_g: None,
            confidence: None,
        }
    }

    /// Builder: set timestamp
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Builder: set meal tag
    pub fn meal(mut self, tag: MealTag) -> Self {
        self.meal_tag = Some(tag);
        self
    }

    /// Builder: set calorie range
    pub fn calories(mut self, min: f64, max: f64) -> Self {
        self.calories_min = Some(min);
        self.calories_max = Some(max);
        self
    }

    /// Builder: set macronutrients
    pub fn macros(mut self, protein: f64, carbs: f64, fat: f64, fiber: f64) -> Self {
        self.protein_g = Some(protein);
        self.carbs_g = Some(carbs);
        self.fat_g = Some(fat);
        self.fiber_g = Some(fiber);
        self
    }

    /// Whether an estimate has been attached yet
    pub fn has_estimate(&self) -> bool {
        self.calories_min.is_some()
    }
}

/// A logged water entry (ounces > 0)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaterEvent {
    pub id: Uuid,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub ounces: f64,
}

impl WaterEvent {
    pub fn new(user_id: impl Into<String>, ounces: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            timestamp: Utc::now(),
            ounces,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// A logged craving
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CravingEvent {
    pub id: Uuid,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    /// What the user said they were craving
    pub text: String,
    /// 1-5 scale, optional
    #[serde(default)]
    pub intensity: Option<u8>,
    /// Loose category string ("sweet", "salty", ...)
    #[serde(default)]
    pub category: Option<String>,
    /// Alternatives payload from the estimation service, stored verbatim
    #[serde(default)]
    pub suggestion: Option<serde_json::Value>,
}

impl CravingEvent {
    pub fn new(user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            timestamp: Utc::now(),
            text: text.into(),
            intensity: None,
            category: None,
            suggestion: None,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn intensity(mut self, intensity: u8) -> Self {
        self.intensity = Some(intensity);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// A logged movement/activity entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovementEvent {
    pub id: Uuid,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    /// Activity label ("walking", "strength training", ...)
    pub activity_type: String,
    #[serde(default)]
    pub duration_min: Option<f64>,
    #[serde(default)]
    pub intensity: Option<MovementIntensity>,
    #[serde(default)]
    pub estimated_burn_min: Option<f64>,
    #[serde(default)]
    pub estimated_burn_max: Option<f64>,
}

impl MovementEvent {
    pub fn new(user_id: impl Into<String>, activity_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            timestamp: Utc::now(),
            activity_type: activity_type.into(),
            duration_min: None,
            intensity: None,
            estimated_burn_min: None,
            estimated_burn_max: None,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn duration(mut self, minutes: f64) -> Self {
        self.duration_min = Some(minutes);
        self
    }

    pub fn burn(mut self, min: f64, max: f64) -> Self {
        self.estimated_burn_min = Some(min);
        self.estimated_burn_max = Some(max);
        self
    }

    pub fn intensity(mut self, intensity: MovementIntensity) -> Self {
        self.intensity = Some(intensity);
        self
    }
}

/// A logged sleep check-in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SleepEvent {
    pub id: Uuid,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    /// 1-5 quality rating
    pub sleep_quality: u8,
    /// Optional hours slept (0-24)
    #[serde(default)]
    pub hours_slept: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl SleepEvent {
    pub fn new(user_id: impl Into<String>, sleep_quality: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            timestamp: Utc::now(),
            sleep_quality,
            hours_slept: None,
            notes: None,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn hours(mut self, hours: f64) -> Self {
        self.hours_slept = Some(hours);
        self
    }
}

/// A logged stress check-in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StressEvent {
    pub id: Uuid,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    /// 1-5 stress rating
    pub stress_level: u8,
    #[serde(default)]
    pub notes: Option<String>,
}

impl StressEvent {
    pub fn new(user_id: impl Into<String>, stress_level: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            timestamp: Utc::now(),
            stress_level,
            notes: None,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl_timestamped!(
    FoodEvent,
    WaterEvent,
    CravingEvent,
    MovementEvent,
    SleepEvent,
    StressEvent
);

/// The six typed collections of one user's events
///
/// This is what the event store hands the engine; the engine only ever
/// filters and reduces it, never mutates individual records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EventSet {
    #[serde(default)]
    pub food: Vec<FoodEvent>,
    #[serde(default)]
    pub water: Vec<WaterEvent>,
    #[serde(default)]
    pub cravings: Vec<CravingEvent>,
    #[serde(default)]
    pub movement: Vec<MovementEvent>,
    #[serde(default)]
    pub sleep: Vec<SleepEvent>,
    #[serde(default)]
    pub stress: Vec<StressEvent>,
}

impl EventSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of events across all six types
    pub fn len(&self) -> usize {
        self.food.len()
            + self.water.len()
            + self.cravings.len()
            + self.movement.len()
            + self.sleep.len()
            + self.stress.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_event_builder() {
        let event = FoodEvent::new("u1", "burrito bowl")
            .meal(MealTag::Lunch)
            .calories(450.0, 650.0)
            .macros(25.0, 60.0, 18.0, 12.0);

        assert_eq!(event.user_id, "u1");
        assert_eq!(event.meal_tag, Some(MealTag::Lunch));
        assert_eq!(event.calories_min, Some(450.0));
        assert_eq!(event.calories_max, Some(650.0));
        assert!(event.has_estimate());
    }

    #[test]
    fn test_food_event_without_estimate() {
        let event = FoodEvent::new("u1", "mystery casserole");
        assert!(!event.has_estimate());
        assert_eq!(event.protein_g, None);
    }

    #[test]
    fn test_event_serialization_roundtrip() {
        let event = SleepEvent::new("u1", 4).hours(7.5);
        let json = serde_json::to_string(&event).unwrap();
        let restored: SleepEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, restored);
    }

    #[test]
    fn test_confidence_serializes_lowercase() {
        let json = serde_json::to_string(&Confidence::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }

    #[test]
    fn test_event_set_len() {
        let mut set = EventSet::new();
        assert!(set.is_empty());

        set.water.push(WaterEvent::new("u1", 12.0));
        set.stress.push(StressEvent::new("u1", 3));
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_movement_intensity_deserializes() {
        let intensity: MovementIntensity = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(intensity, MovementIntensity::Hard);
    }
}
