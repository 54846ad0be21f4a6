use axum::extract::{Path, State};
use axum::Json;
use pathwise_core::streak::{GoalTracker, StreakTracker};
use pathwise_core::PathwiseError;
use serde::Deserialize;

use crate::error::AppError;
use crate::routes::streak::{day_or_today, open_store};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AddGoalBody {
    title: String,
    target_days: u32,
}

/// GET /api/goals: goals with progress against the current streak.
pub async fn list_goals(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut store = open_store(&root)?;
        let today = day_or_today(None)?;
        let streak = StreakTracker::new(&mut store).status(today)?;
        let progress = GoalTracker::new(&mut store).progress_all(&streak)?;
        Ok::<_, PathwiseError>(serde_json::to_value(progress)?)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// POST /api/goals: add a goal.
pub async fn add_goal(
    State(app): State<AppState>,
    Json(body): Json<AddGoalBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let guard = app.lock_store().await;
    let result = tokio::task::spawn_blocking(move || {
        let _guard = guard;
        let today = day_or_today(None)?;
        let goal = GoalTracker::new(open_store(&root)?).add(&body.title, body.target_days, today)?;
        Ok::<_, PathwiseError>(serde_json::to_value(goal)?)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// POST /api/goals/{id}/complete: mark a goal done.
pub async fn complete_goal(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let guard = app.lock_store().await;
    let result = tokio::task::spawn_blocking(move || {
        let _guard = guard;
        let today = day_or_today(None)?;
        let goal = GoalTracker::new(open_store(&root)?).complete(&id, today)?;
        Ok::<_, PathwiseError>(serde_json::to_value(goal)?)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// DELETE /api/goals/{id}: delete a goal.
pub async fn remove_goal(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let guard = app.lock_store().await;
    let result = tokio::task::spawn_blocking(move || {
        let _guard = guard;
        GoalTracker::new(open_store(&root)?).remove(&id)?;
        Ok::<_, PathwiseError>(serde_json::json!({ "removed": id }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
