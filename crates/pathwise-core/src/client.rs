use crate::config::BackendConfig;
use crate::error::{PathwiseError, Result};
use crate::progress::UserProgress;
use reqwest::blocking::{Client, RequestBuilder, Response};
use std::time::Duration;

pub const CURRENT_USER_PATH: &str = "/users/me";
pub const CLEAR_SKILLS_PATH: &str = "/users/me/clear-skills";
pub const PICKED_SKILL_PATH: &str = "/users/me/picked-skill";

// ---------------------------------------------------------------------------
// ProgressSource
// ---------------------------------------------------------------------------

/// The backend as seen by the onboarding gate: it owns the learner's profile
/// and accepts the writes that change it.
pub trait ProgressSource {
    fn fetch_progress(&self) -> Result<UserProgress>;
    fn clear_skills(&self) -> Result<()>;
    fn pick_skill(&self, skill: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// BackendClient
// ---------------------------------------------------------------------------

pub struct BackendClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            config.token(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn send(&self, req: RequestBuilder, what: &str) -> Result<Response> {
        let res = self.authorize(req).send().map_err(|e| {
            tracing::warn!(error = %e, what, "backend request failed");
            PathwiseError::Http(e)
        })?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let body = res.text().unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        tracing::warn!(status = status.as_u16(), %message, what, "backend rejected request");
        Err(PathwiseError::Backend {
            status: status.as_u16(),
            message,
        })
    }
}

impl ProgressSource for BackendClient {
    fn fetch_progress(&self) -> Result<UserProgress> {
        let res = self.send(self.http.get(self.url(CURRENT_USER_PATH)), "fetch progress")?;
        let body = res.text()?;
        UserProgress::from_json(&body)
    }

    fn clear_skills(&self) -> Result<()> {
        self.send(self.http.post(self.url(CLEAR_SKILLS_PATH)), "clear skills")?;
        Ok(())
    }

    fn pick_skill(&self, skill: &str) -> Result<()> {
        let skill = skill.trim();
        if skill.is_empty() {
            return Err(PathwiseError::InvalidSkill(
                "skill name must not be empty".to_string(),
            ));
        }
        let body = serde_json::json!({ "pickedSkill": skill });
        self.send(
            self.http.post(self.url(PICKED_SKILL_PATH)).json(&body),
            "pick skill",
        )?;
        Ok(())
    }
}

/// Pull a human message out of an error body: JSON `message` or `error`
/// field, else the trimmed text.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["message", "error"] {
            if let Some(s) = value.get(key).and_then(|v| v.as_str()) {
                return Some(s.to_string());
            }
        }
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client(server: &Server, token: Option<&str>) -> BackendClient {
        BackendClient::new(
            server.url(),
            token.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn fetch_progress_parses_envelope_and_sends_token() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/users/me")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"user": {"pickedSkill": "UX Design", "learningPath": null}}"#)
            .create();

        let progress = client(&server, Some("secret")).fetch_progress().unwrap();
        mock.assert();
        assert_eq!(progress.picked_skill(), Some("UX Design"));
        assert!(progress.learning_path.is_empty());
    }

    #[test]
    fn fetch_without_token_sends_no_authorization() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/users/me")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body("{}")
            .create();

        let progress = client(&server, None).fetch_progress().unwrap();
        mock.assert();
        assert_eq!(progress, UserProgress::default());
    }

    #[test]
    fn error_status_maps_to_backend_error() {
        let mut server = Server::new();
        server
            .mock("GET", "/users/me")
            .with_status(401)
            .with_body(r#"{"message": "token expired"}"#)
            .create();

        let err = client(&server, Some("old")).fetch_progress().unwrap_err();
        match err {
            PathwiseError::Backend { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "token expired");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn error_without_body_uses_reason_phrase() {
        let mut server = Server::new();
        server.mock("POST", "/users/me/clear-skills").with_status(503).create();

        let err = client(&server, None).clear_skills().unwrap_err();
        assert!(matches!(
            err,
            PathwiseError::Backend { status: 503, ref message } if message == "Service Unavailable"
        ));
    }

    #[test]
    fn clear_skills_posts() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/users/me/clear-skills")
            .with_status(204)
            .create();
        client(&server, None).clear_skills().unwrap();
        mock.assert();
    }

    #[test]
    fn pick_skill_sends_json_body() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/users/me/picked-skill")
            .match_body(Matcher::Json(serde_json::json!({"pickedSkill": "Data Science"})))
            .with_status(200)
            .create();
        client(&server, None).pick_skill("  Data Science ").unwrap();
        mock.assert();
    }

    #[test]
    fn pick_skill_rejects_blank_without_request() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/users/me/picked-skill")
            .expect(0)
            .create();
        let err = client(&server, None).pick_skill("   ").unwrap_err();
        assert!(matches!(err, PathwiseError::InvalidSkill(_)));
        mock.assert();
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let c = BackendClient::new("https://api.example.com/v1/", None, Duration::from_secs(1))
            .unwrap();
        assert_eq!(c.base_url(), "https://api.example.com/v1");
        assert_eq!(c.url(CURRENT_USER_PATH), "https://api.example.com/v1/users/me");
    }

    #[test]
    fn error_message_prefers_json_fields() {
        assert_eq!(error_message(r#"{"error": "nope"}"#).as_deref(), Some("nope"));
        assert_eq!(error_message("plain text ").as_deref(), Some("plain text"));
        assert_eq!(error_message("  "), None);
    }
}
