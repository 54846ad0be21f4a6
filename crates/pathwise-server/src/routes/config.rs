use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/config: the effective configuration, defaults included, plus
/// validation warnings.
pub async fn get_config(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = pathwise_core::config::Config::load_or_default(&root)?;
        let warnings = config.validate();
        Ok::<_, pathwise_core::PathwiseError>(serde_json::json!({
            "config": config,
            "warnings": warnings,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;

    #[tokio::test]
    async fn get_config_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = AppState::new(dir.path().to_path_buf());
        let json = get_config(State(app)).await.unwrap().0;
        assert_eq!(json["config"]["version"], 1);
        assert_eq!(json["config"]["routes"]["dashboard"], "/my-learning");
        assert_eq!(json["warnings"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn get_config_reads_saved_file() {
        let dir = tempfile::TempDir::new().unwrap();
        pathwise_core::config::Config::new()
            .with_backend_url("https://api.example.com")
            .save(dir.path())
            .unwrap();

        let app = AppState::new(dir.path().to_path_buf());
        let json = get_config(State(app)).await.unwrap().0;
        assert_eq!(json["config"]["backend"]["base_url"], "https://api.example.com");
    }
}
