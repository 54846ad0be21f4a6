use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pathwise_core::error::PathwiseError;

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequest(msg.into()).into())
    }
}

/// Sentinel carrying an explicit 400 through the `anyhow::Error` chain.
#[derive(Debug)]
struct BadRequest(String);

impl std::fmt::Display for BadRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequest {}

fn status_for(e: &PathwiseError) -> StatusCode {
    match e {
        PathwiseError::GoalNotFound(_) => StatusCode::NOT_FOUND,
        PathwiseError::InvalidStep(_)
        | PathwiseError::InvalidContext(_)
        | PathwiseError::InvalidDate(_)
        | PathwiseError::InvalidGoal(_)
        | PathwiseError::InvalidSkill(_) => StatusCode::BAD_REQUEST,
        PathwiseError::NotInitialized => StatusCode::BAD_REQUEST,
        PathwiseError::Backend { .. } | PathwiseError::Http(_) => StatusCode::BAD_GATEWAY,
        PathwiseError::Io(_) | PathwiseError::Yaml(_) | PathwiseError::Json(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if self.0.downcast_ref::<BadRequest>().is_some() {
            StatusCode::BAD_REQUEST
        } else if let Some(e) = self.0.downcast_ref::<PathwiseError>() {
            status_for(e)
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!(%status, error = %self.0, "request failed");
        }

        let body = serde_json::json!({ "error": format!("{:#}", self.0) });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
