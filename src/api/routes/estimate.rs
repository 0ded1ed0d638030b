//! Estimation Routes
//!
//! Stateless estimation endpoints: run text through the estimation backend
//! without storing anything. Useful for previewing an estimate before
//! logging, and for clients that store events themselves.
//!
//! - POST /api/v1/estimate/food
//! - POST /api/v1/estimate/movement
//! - POST /api/v1/estimate/craving

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{EstimateCravingRequest, EstimateMovementRequest};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::estimator::{CravingSuggestions, FoodEstimate, FoodQuery, MovementEstimate};

/// POST /api/v1/estimate/food
pub async fn estimate_food(
    State(state): State<Arc<AppState>>,
    Json(query): Json<FoodQuery>,
) -> ApiResult<Json<FoodEstimate>> {
    if query.text.trim().is_empty() {
        return Err(ApiError::Validation("Food text cannot be empty".to_string()));
    }

    Ok(Json(state.estimator.estimate_food(&query).await?))
}

/// POST /api/v1/estimate/movement
pub async fn estimate_movement(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EstimateMovementRequest>,
) -> ApiResult<Json<MovementEstimate>> {
    if req.text.trim().is_empty() {
        return Err(ApiError::Validation(
            "Movement text cannot be empty".to_string(),
        ));
    }

    Ok(Json(
        state
            .estimator
            .estimate_movement(&req.text, req.intensity)
            .await?,
    ))
}

/// POST /api/v1/estimate/craving
pub async fn estimate_craving(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EstimateCravingRequest>,
) -> ApiResult<Json<CravingSuggestions>> {
    if req.text.trim().is_empty() {
        return Err(ApiError::Validation(
            "Craving text cannot be empty".to_string(),
        ));
    }

    Ok(Json(state.estimator.craving_suggestions(&req.text).await?))
}
