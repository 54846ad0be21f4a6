use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathwiseError {
    #[error("not initialized: run 'pathwise init'")]
    NotInitialized,

    #[error("invalid onboarding step '{0}': expected one, two, three or four")]
    InvalidStep(String),

    #[error("invalid context '{0}': expected onboarding, login, signup or roadmap")]
    InvalidContext(String),

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid goal: {0}")]
    InvalidGoal(String),

    #[error("goal not found: {0}")]
    GoalNotFound(String),

    #[error("invalid skill: {0}")]
    InvalidSkill(String),

    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PathwiseError>;
