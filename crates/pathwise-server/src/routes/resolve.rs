use axum::extract::{Query, State};
use axum::Json;
use pathwise_core::client::{BackendClient, ProgressSource};
use pathwise_core::config::Config;
use pathwise_core::policy::Report;
use pathwise_core::{ResolveContext, UserProgress};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ResolveBody {
    #[serde(default)]
    progress: serde_json::Value,
    #[serde(default)]
    context: Option<String>,
    #[serde(default)]
    current: Option<String>,
}

#[derive(Deserialize)]
pub struct NextQuery {
    #[serde(default)]
    context: Option<String>,
    #[serde(default)]
    current: Option<String>,
}

fn parse_context(raw: Option<&str>) -> Result<ResolveContext, pathwise_core::PathwiseError> {
    raw.map(str::parse::<ResolveContext>).transpose().map(Option::unwrap_or_default)
}

/// POST /api/resolve: resolve a snapshot supplied by the caller.
pub async fn resolve_progress(
    State(app): State<AppState>,
    Json(body): Json<ResolveBody>,
) -> Result<Json<Report>, AppError> {
    let context = parse_context(body.context.as_deref())?;
    let progress = if body.progress.is_null() {
        UserProgress::default()
    } else {
        UserProgress::from_value(body.progress)
            .map_err(|e| AppError::bad_request(format!("invalid progress snapshot: {e}")))?
    };

    let root = app.root.clone();
    let routes = tokio::task::spawn_blocking(move || {
        Config::load_or_default(&root).map(|c| c.routes)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(Report::build(
        &progress,
        context,
        body.current.as_deref(),
        &routes,
    )))
}

/// GET /api/next: fetch the learner's snapshot from the configured backend
/// and resolve it.
pub async fn next_for_learner(
    State(app): State<AppState>,
    Query(query): Query<NextQuery>,
) -> Result<Json<Report>, AppError> {
    let context = parse_context(query.context.as_deref())?;
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = Config::load(&root)?;
        let client = BackendClient::from_config(&config.backend)?;
        let progress = client.fetch_progress()?;
        Ok::<_, pathwise_core::PathwiseError>(Report::build(
            &progress,
            context,
            query.current.as_deref(),
            &config.routes,
        ))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
