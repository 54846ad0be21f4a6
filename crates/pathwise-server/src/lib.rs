pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{delete, get, post};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(root: PathBuf) -> Router {
    let app_state = state::AppState::new(root);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Resolution
        .route("/api/resolve", post(routes::resolve::resolve_progress))
        .route("/api/next", get(routes::resolve::next_for_learner))
        .route("/api/rules", get(routes::rules::list_rules))
        // Config
        .route("/api/config", get(routes::config::get_config))
        // Streak
        .route("/api/streak", get(routes::streak::get_streak))
        .route("/api/streak/check-in", post(routes::streak::check_in))
        // Goals
        .route("/api/goals", get(routes::goals::list_goals))
        .route("/api/goals", post(routes::goals::add_goal))
        .route(
            "/api/goals/{id}/complete",
            post(routes::goals::complete_goal),
        )
        .route("/api/goals/{id}", delete(routes::goals::remove_goal))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the API server.
pub async fn serve(root: PathBuf, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(root, listener, open_browser).await
}

/// Start the API server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(
    root: PathBuf,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(root);

    tracing::info!("pathwise API listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}/api/rules");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
