//! Free-text estimation
//!
//! Turns free-text descriptions ("chicken burrito bowl", "45 min run") into
//! structured nutrition, movement, and craving-response estimates. The
//! [`TextEstimator`] trait is the seam: [`keyword::KeywordEstimator`] is the
//! built-in heuristic backend, [`remote::RemoteEstimator`] delegates to an
//! external estimation service over HTTP.

pub mod keyword;
pub mod remote;

use crate::events::types::{Confidence, MealTag, MovementIntensity};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use keyword::KeywordEstimator;
pub use remote::{RemoteEstimator, RemoteEstimatorConfig};

/// A food description to estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodQuery {
    pub text: String,
    #[serde(default)]
    pub meal_tag: Option<MealTag>,
    /// Restaurant portions run larger; widens and raises the range
    #[serde(default)]
    pub is_restaurant: bool,
    /// The user flagged portion uncertainty; widens the range
    #[serde(default)]
    pub unsure_portions: bool,
}

impl FoodQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            meal_tag: None,
            is_restaurant: false,
            unsure_portions: false,
        }
    }
}

/// Estimated nutrition for a food description
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodEstimate {
    pub calories_min: f64,
    pub calories_max: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
    pub sugar_g: f64,
    pub confidence: Confidence,
    pub supportive_note: String,
}

/// Estimated burn for a movement description
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovementEstimate {
    pub activity_type: String,
    pub duration_min: f64,
    pub estimated_burn_min: f64,
    pub estimated_burn_max: f64,
    pub supportive_note: String,
}

/// Alternatives and framing for a logged craving
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CravingSuggestions {
    /// Options that might satisfy the same need
    pub alternatives: Vec<String>,
    /// A way to honor the craving directly
    pub honor_option: String,
    pub supportive_suggestion: String,
}

/// Errors from an estimation backend
#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("estimator unavailable")]
    Unavailable,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("estimator error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("request timeout")]
    Timeout,

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Backend that estimates structured data from free text
#[async_trait]
pub trait TextEstimator: Send + Sync {
    async fn estimate_food(&self, query: &FoodQuery) -> Result<FoodEstimate, EstimatorError>;

    async fn estimate_movement(
        &self,
        text: &str,
        intensity: Option<MovementIntensity>,
    ) -> Result<MovementEstimate, EstimatorError>;

    async fn craving_suggestions(
        &self,
        text: &str,
    ) -> Result<CravingSuggestions, EstimatorError>;
}
