//! Log Routes
//!
//! Endpoints for logging wellness events. Food, movement, and craving logs
//! run the free text through the estimation backend before storing, so the
//! stored event already carries structured numbers.
//!
//! - POST /api/v1/logs/food
//! - POST /api/v1/logs/water
//! - POST /api/v1/logs/craving
//! - POST /api/v1/logs/movement
//! - POST /api/v1/logs/sleep
//! - POST /api/v1/logs/stress
//! - GET /api/v1/logs - One local day's events
//! - DELETE /api/v1/logs/:kind/:id

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::dto::{
    CravingLogResponse, DayQuery, FoodLogResponse, LogCravingRequest, LogFoodRequest,
    LogMovementRequest, LogSleepRequest, LogStressRequest, LogWaterRequest, LogsResponse,
    MovementLogResponse, SleepLogResponse, StressLogResponse, UserQuery, WaterLogResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::engine::window::today;
use crate::estimator::FoodQuery;
use crate::events::store::{Event, EventKind};
use crate::events::types::{
    CravingEvent, FoodEvent, MovementEvent, SleepEvent, StressEvent, WaterEvent,
};

/// POST /api/v1/logs/food
///
/// Log a food entry. The text is estimated before storing, so the response
/// carries the full nutrient range.
pub async fn log_food(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LogFoodRequest>,
) -> ApiResult<(StatusCode, Json<FoodLogResponse>)> {
    if req.text.trim().is_empty() {
        return Err(ApiError::Validation("Food text cannot be empty".to_string()));
    }

    let query = FoodQuery {
        text: req.text.clone(),
        meal_tag: req.meal_tag,
        is_restaurant: req.is_restaurant,
        unsure_portions: req.unsure_portions,
    };
    let estimate = state.estimator.estimate_food(&query).await?;

    let mut event = FoodEvent::new(&req.user_id, &req.text);
    if let Some(ts) = req.timestamp {
        event = event.at(ts);
    }
    event.meal_tag = req.meal_tag;
    event.calories_min = Some(estimate.calories_min);
    event.calories_max = Some(estimate.calories_max);
    event.protein_g = Some(estimate.protein_g);
    event.carbs_g = Some(estimate.carbs_g);
    event.fat_g = Some(estimate.fat_g);
    event.fiber_g = Some(estimate.fiber_g);
    event.sugar_g = Some(estimate.sugar_g);
    event.confidence = Some(estimate.confidence);

    state.store.insert(Event::Food(event.clone())).await?;

    Ok((
        StatusCode::CREATED,
        Json(FoodLogResponse {
            event,
            supportive_note: estimate.supportive_note,
        }),
    ))
}

/// POST /api/v1/logs/water
pub async fn log_water(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LogWaterRequest>,
) -> ApiResult<(StatusCode, Json<WaterLogResponse>)> {
    if req.ounces <= 0.0 || !req.ounces.is_finite() {
        return Err(ApiError::Validation(
            "Water ounces must be a positive number".to_string(),
        ));
    }

    let mut event = WaterEvent::new(&req.user_id, req.ounces);
    if let Some(ts) = req.timestamp {
        event = event.at(ts);
    }

    state.store.insert(Event::Water(event.clone())).await?;

    Ok((StatusCode::CREATED, Json(WaterLogResponse { event })))
}

/// POST /api/v1/logs/craving
///
/// Log a craving. Alternatives from the estimation backend are attached to
/// the stored event and returned.
pub async fn log_craving(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LogCravingRequest>,
) -> ApiResult<(StatusCode, Json<CravingLogResponse>)> {
    if req.text.trim().is_empty() {
        return Err(ApiError::Validation("Craving text cannot be empty".to_string()));
    }
    if let Some(intensity) = req.intensity {
        validate_rating("Craving intensity", intensity)?;
    }

    let suggestions = state.estimator.craving_suggestions(&req.text).await?;

    let mut event = CravingEvent::new(&req.user_id, &req.text);
    if let Some(ts) = req.timestamp {
        event = event.at(ts);
    }
    event.intensity = req.intensity;
    event.category = req.category;
    event.suggestion = serde_json::to_value(&suggestions).ok();

    state.store.insert(Event::Craving(event.clone())).await?;

    Ok((
        StatusCode::CREATED,
        Json(CravingLogResponse { event, suggestions }),
    ))
}

/// POST /api/v1/logs/movement
///
/// Log movement from free text. Activity type, duration, and burn range come
/// from the estimation backend.
pub async fn log_movement(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LogMovementRequest>,
) -> ApiResult<(StatusCode, Json<MovementLogResponse>)> {
    if req.text.trim().is_empty() {
        return Err(ApiError::Validation("Movement text cannot be empty".to_string()));
    }

    let estimate = state
        .estimator
        .estimate_movement(&req.text, req.intensity)
        .await?;

    let mut event = MovementEvent::new(&req.user_id, &estimate.activity_type)
        .duration(estimate.duration_min)
        .burn(estimate.estimated_burn_min, estimate.estimated_burn_max);
    if let Some(intensity) = req.intensity {
        event = event.intensity(intensity);
    }
    if let Some(ts) = req.timestamp {
        event = event.at(ts);
    }

    state.store.insert(Event::Movement(event.clone())).await?;

    Ok((
        StatusCode::CREATED,
        Json(MovementLogResponse {
            event,
            supportive_note: estimate.supportive_note,
        }),
    ))
}

/// POST /api/v1/logs/sleep
pub async fn log_sleep(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LogSleepRequest>,
) -> ApiResult<(StatusCode, Json<SleepLogResponse>)> {
    validate_rating("Sleep quality", req.sleep_quality)?;
    if let Some(hours) = req.hours_slept {
        if !(0.0..=24.0).contains(&hours) {
            return Err(ApiError::Validation(
                "Hours slept must be between 0 and 24".to_string(),
            ));
        }
    }

    let mut event = SleepEvent::new(&req.user_id, req.sleep_quality);
    if let Some(hours) = req.hours_slept {
        event = event.hours(hours);
    }
    event.notes = req.notes;
    if let Some(ts) = req.timestamp {
        event = event.at(ts);
    }

    state.store.insert(Event::Sleep(event.clone())).await?;

    Ok((StatusCode::CREATED, Json(SleepLogResponse { event })))
}

/// POST /api/v1/logs/stress
pub async fn log_stress(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LogStressRequest>,
) -> ApiResult<(StatusCode, Json<StressLogResponse>)> {
    validate_rating("Stress level", req.stress_level)?;

    let mut event = StressEvent::new(&req.user_id, req.stress_level);
    event.notes = req.notes;
    if let Some(ts) = req.timestamp {
        event = event.at(ts);
    }

    state.store.insert(Event::Stress(event.clone())).await?;

    Ok((StatusCode::CREATED, Json(StressLogResponse { event })))
}

/// GET /api/v1/logs
///
/// All of one user's events for a local calendar day (default today).
pub async fn get_logs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DayQuery>,
) -> ApiResult<Json<LogsResponse>> {
    let date = query.date.unwrap_or_else(|| today(&Local));
    let events = state.store.events(&query.user_id).await?;

    Ok(Json(LogsResponse {
        user_id: query.user_id,
        date,
        events: events.filter_day(date, &Local),
    }))
}

/// DELETE /api/v1/logs/:kind/:id
pub async fn delete_log(
    State(state): State<Arc<AppState>>,
    Path((kind, id)): Path<(String, Uuid)>,
    Query(query): Query<UserQuery>,
) -> ApiResult<StatusCode> {
    let kind = EventKind::from_str(&kind)?;
    state.store.delete(&query.user_id, kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Validate a 1-5 rating field
fn validate_rating(field: &str, value: u8) -> ApiResult<()> {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "{field} must be between 1 and 5"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rating_bounds() {
        assert!(validate_rating("Sleep quality", 1).is_ok());
        assert!(validate_rating("Sleep quality", 5).is_ok());
        assert!(validate_rating("Sleep quality", 0).is_err());
        assert!(validate_rating("Sleep quality", 6).is_err());
    }
}
