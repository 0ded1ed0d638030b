//! Insight Routes
//!
//! Endpoints for generated insights.
//!
//! - POST /api/v1/insights - Trend insights over a rolling window (cached
//!   per user and window length until the end of the local day)
//! - GET /api/v1/snapshot - Single-day snapshot (never cached; the day is
//!   still in progress)

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, Local};
use std::sync::Arc;
use tracing::info;

use crate::api::dto::{DayQuery, InsightRequest};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::engine::rolling::compute_rolling_stats;
use crate::engine::rollup::compute_daily_rollup;
use crate::engine::window::{end_of_local_day, today};
use crate::insights::generator::InsightResult;
use crate::insights::snapshot::DailySnapshot;

/// Longest permitted insight window, in days
const MAX_WINDOW_DAYS: u32 = 365;

/// POST /api/v1/insights
///
/// Trend insights over the last `days` days ending today. Results are cached
/// per user and invalidated at local midnight, when the window shifts.
pub async fn generate_insights(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InsightRequest>,
) -> ApiResult<Json<InsightResult>> {
    if req.days == 0 || req.days > MAX_WINDOW_DAYS {
        return Err(ApiError::Validation(format!(
            "Window must be between 1 and {MAX_WINDOW_DAYS} days"
        )));
    }

    let end = today(&Local);
    if let Some(cached) = state.cache.get(&req.user_id, end, req.days).await {
        return Ok(Json(cached));
    }

    let events = state.store.events(&req.user_id).await?;
    let start = end - Duration::days(req.days as i64 - 1);

    let mut rollups = Vec::with_capacity(req.days as usize);
    let mut date = start;
    while date <= end {
        let day_events = events.filter_day(date, &Local);
        rollups.push(compute_daily_rollup(&req.user_id, date, &day_events));
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    let stats = compute_rolling_stats(&rollups, req.days);
    let result = state.generator.generate(&stats);

    info!(
        user_id = %req.user_id,
        days = req.days,
        days_with_data = stats.days_with_data,
        "generated trend insights"
    );

    state
        .cache
        .put(
            &req.user_id,
            end,
            req.days,
            result.clone(),
            end_of_local_day(end, &Local),
        )
        .await;

    Ok(Json(result))
}

/// GET /api/v1/snapshot
///
/// The snapshot for one local calendar day (default today).
pub async fn daily_snapshot(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DayQuery>,
) -> ApiResult<Json<DailySnapshot>> {
    let date = query.date.unwrap_or_else(|| today(&Local));
    let events = state.store.events(&query.user_id).await?;
    let day_events = events.filter_day(date, &Local);
    let rollup = compute_daily_rollup(&query.user_id, date, &day_events);

    Ok(Json(state.composer.compose(&rollup)))
}
