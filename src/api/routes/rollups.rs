//! Rollup Routes
//!
//! Endpoints for daily aggregates. Rollups are computed on demand from the
//! event store; nothing is materialized.
//!
//! - GET /api/v1/rollups/daily - One day's rollup
//! - GET /api/v1/rollups/range - A day-by-day sequence

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Local;
use std::sync::Arc;

use crate::api::dto::{DayQuery, RangeQuery};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::engine::rollup::{compute_daily_rollup, DailyRollup};
use crate::engine::window::today;

/// Longest permitted range request, in days
const MAX_RANGE_DAYS: i64 = 366;

/// GET /api/v1/rollups/daily
///
/// The rollup for one local calendar day (default today). A day with no
/// events returns an all-zero rollup, not an error.
pub async fn daily_rollup(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DayQuery>,
) -> ApiResult<Json<DailyRollup>> {
    let date = query.date.unwrap_or_else(|| today(&Local));
    let events = state.store.events(&query.user_id).await?;
    let day_events = events.filter_day(date, &Local);

    Ok(Json(compute_daily_rollup(&query.user_id, date, &day_events)))
}

/// GET /api/v1/rollups/range
///
/// Rollups for each day in `[start, end]` inclusive, in date order. Days
/// without events appear as zero rollups so the sequence has no gaps.
pub async fn range_rollups(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<Vec<DailyRollup>>> {
    if query.end < query.start {
        return Err(ApiError::Validation(
            "Range end must not be before start".to_string(),
        ));
    }
    let span = (query.end - query.start).num_days() + 1;
    if span > MAX_RANGE_DAYS {
        return Err(ApiError::Validation(format!(
            "Range exceeds maximum of {MAX_RANGE_DAYS} days"
        )));
    }

    let events = state.store.events(&query.user_id).await?;

    let mut rollups = Vec::with_capacity(span as usize);
    let mut date = query.start;
    while date <= query.end {
        let day_events = events.filter_day(date, &Local);
        rollups.push(compute_daily_rollup(&query.user_id, date, &day_events));
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    Ok(Json(rollups))
}
