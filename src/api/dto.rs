//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON. Every log request
//! takes an optional `user_id` (defaulting to "local" for the single-user
//! case) and an optional timestamp (defaulting to now).

use crate::estimator::CravingSuggestions;
use crate::events::types::{
    CravingEvent, EventSet, FoodEvent, MealTag, MovementEvent, MovementIntensity, SleepEvent,
    StressEvent, WaterEvent,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub(crate) fn default_user_id() -> String {
    "local".to_string()
}

// ============================================
// Log requests
// ============================================

/// POST /api/v1/logs/food
#[derive(Debug, Deserialize)]
pub struct LogFoodRequest {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    pub text: String,
    #[serde(default)]
    pub meal_tag: Option<MealTag>,
    #[serde(default)]
    pub is_restaurant: bool,
    #[serde(default)]
    pub unsure_portions: bool,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// POST /api/v1/logs/water
#[derive(Debug, Deserialize)]
pub struct LogWaterRequest {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    pub ounces: f64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// POST /api/v1/logs/craving
#[derive(Debug, Deserialize)]
pub struct LogCravingRequest {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    pub text: String,
    #[serde(default)]
    pub intensity: Option<u8>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// POST /api/v1/logs/movement
#[derive(Debug, Deserialize)]
pub struct LogMovementRequest {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    pub text: String,
    #[serde(default)]
    pub intensity: Option<MovementIntensity>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// POST /api/v1/logs/sleep
#[derive(Debug, Deserialize)]
pub struct LogSleepRequest {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Quality rating, 1-5
    pub sleep_quality: u8,
    #[serde(default)]
    pub hours_slept: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// POST /api/v1/logs/stress
#[derive(Debug, Deserialize)]
pub struct LogStressRequest {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Stress rating, 1-5
    pub stress_level: u8,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

// ============================================
// Log responses
// ============================================

/// Response for a logged food entry, with the estimate already applied
#[derive(Debug, Serialize)]
pub struct FoodLogResponse {
    pub event: FoodEvent,
    pub supportive_note: String,
}

/// Response for a logged water entry
#[derive(Debug, Serialize)]
pub struct WaterLogResponse {
    pub event: WaterEvent,
}

/// Response for a logged craving, with alternatives attached
#[derive(Debug, Serialize)]
pub struct CravingLogResponse {
    pub event: CravingEvent,
    pub suggestions: CravingSuggestions,
}

/// Response for a logged movement entry, with the estimate applied
#[derive(Debug, Serialize)]
pub struct MovementLogResponse {
    pub event: MovementEvent,
    pub supportive_note: String,
}

/// Response for a logged sleep check-in
#[derive(Debug, Serialize)]
pub struct SleepLogResponse {
    pub event: SleepEvent,
}

/// Response for a logged stress check-in
#[derive(Debug, Serialize)]
pub struct StressLogResponse {
    pub event: StressEvent,
}

/// GET /api/v1/logs response
#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub user_id: String,
    pub date: NaiveDate,
    pub events: EventSet,
}

// ============================================
// Query parameters
// ============================================

/// Query parameters for day-scoped endpoints
#[derive(Debug, Deserialize)]
pub struct DayQuery {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Local calendar date; defaults to today
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Query parameters for range-scoped endpoints
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Query parameters for deletes
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

// ============================================
// Insights
// ============================================

/// POST /api/v1/insights
#[derive(Debug, Deserialize)]
pub struct InsightRequest {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Rolling window length in days
    #[serde(default = "default_insight_days")]
    pub days: u32,
}

fn default_insight_days() -> u32 {
    30
}

// ============================================
// Estimation
// ============================================

/// POST /api/v1/estimate/movement
#[derive(Debug, Deserialize)]
pub struct EstimateMovementRequest {
    pub text: String,
    #[serde(default)]
    pub intensity: Option<MovementIntensity>,
}

/// POST /api/v1/estimate/craving
#[derive(Debug, Deserialize)]
pub struct EstimateCravingRequest {
    pub text: String,
}

// ============================================
// Health
// ============================================

/// GET /health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
    pub estimator: String,
    pub uptime_seconds: u64,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_request_defaults() {
        let req: LogWaterRequest = serde_json::from_str(r#"{"ounces": 12.0}"#).unwrap();
        assert_eq!(req.user_id, "local");
        assert!(req.timestamp.is_none());
    }

    #[test]
    fn test_insight_request_defaults_to_30_days() {
        let req: InsightRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.user_id, "local");
        assert_eq!(req.days, 30);
    }

    #[test]
    fn test_day_query_optional_date() {
        let q: DayQuery = serde_json::from_str(r#"{"date": "2024-03-10"}"#).unwrap();
        assert_eq!(q.date, NaiveDate::from_ymd_opt(2024, 3, 10));
    }
}
