//! Status API (`GET /`)

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};

use super::error::AppError;
use crate::types::StatusResponse;
use crate::AppState;

/// Whole seconds elapsed from `completed_at` to `now`, rounded down.
///
/// Negative when the record is stamped in the future (clock skew between hosts).
pub fn time_diff_secs(completed_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - completed_at).num_milliseconds().div_euclid(1000)
}

/// GET /
///
/// Re-reads the record on every request.
pub async fn get_status(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, AppError> {
    let result = state.store.load().await?;
    let time_diff = time_diff_secs(result.completed_at, Utc::now());

    Ok(Json(StatusResponse { result, time_diff }))
}
