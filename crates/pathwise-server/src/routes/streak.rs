use axum::extract::{Query, State};
use axum::Json;
use pathwise_core::config::Config;
use pathwise_core::store::FileStore;
use pathwise_core::streak::{parse_date, StreakTracker};
use pathwise_core::PathwiseError;
use serde::Deserialize;
use std::path::Path;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize, Default)]
pub struct DateParam {
    #[serde(default)]
    date: Option<String>,
}

pub(crate) fn open_store(root: &Path) -> Result<FileStore, PathwiseError> {
    let config = Config::load_or_default(root)?;
    FileStore::open(config.store_path(root))
}

pub(crate) fn day_or_today(date: Option<&str>) -> Result<chrono::NaiveDate, PathwiseError> {
    match date {
        Some(d) => parse_date(d),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// GET /api/streak: current and longest streak.
pub async fn get_streak(
    State(app): State<AppState>,
    Query(query): Query<DateParam>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let today = day_or_today(query.date.as_deref())?;
        let status = StreakTracker::new(open_store(&root)?).status(today)?;
        Ok::<_, PathwiseError>(serde_json::to_value(status)?)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// POST /api/streak/check-in: record activity for a day (default today).
pub async fn check_in(
    State(app): State<AppState>,
    body: axum::body::Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let date = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        serde_json::from_slice::<DateParam>(&body)
            .map_err(|e| AppError::bad_request(format!("invalid body: {e}")))?
            .date
    };
    let guard = app.lock_store().await;
    let result = tokio::task::spawn_blocking(move || {
        let _guard = guard;
        let today = day_or_today(date.as_deref())?;
        let status = StreakTracker::new(open_store(&root)?).check_in(today)?;
        Ok::<_, PathwiseError>(serde_json::to_value(status)?)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
