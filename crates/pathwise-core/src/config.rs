use crate::error::{PathwiseError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// BackendConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Name of the environment variable holding the bearer token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_token_env() -> String {
    "PATHWISE_TOKEN".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_env: default_token_env(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl BackendConfig {
    /// Read the bearer token from the configured environment variable.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

// ---------------------------------------------------------------------------
// RouteConfig
// ---------------------------------------------------------------------------

/// Client-side paths each decision maps to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default = "default_onboarding")]
    pub onboarding: String,
    #[serde(default = "default_roadmap")]
    pub roadmap: String,
    #[serde(default = "default_verify_email")]
    pub verify_email: String,
    #[serde(default = "default_dashboard")]
    pub dashboard: String,
}

fn default_onboarding() -> String {
    "/onboarding".to_string()
}

fn default_roadmap() -> String {
    "/roadmap".to_string()
}

fn default_verify_email() -> String {
    "/verify-email".to_string()
}

fn default_dashboard() -> String {
    "/my-learning".to_string()
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            onboarding: default_onboarding(),
            roadmap: default_roadmap(),
            verify_email: default_verify_email(),
            dashboard: default_dashboard(),
        }
    }
}

// ---------------------------------------------------------------------------
// StoreConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Local store file; relative to the project root. Defaults to
    /// `.pathwise/local-store.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub routes: RouteConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            version: 1,
            backend: BackendConfig::default(),
            routes: RouteConfig::default(),
            store: StoreConfig::default(),
        }
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend.base_url = url.into();
        self
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(PathwiseError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Load the config, or fall back to defaults when the project has not
    /// been initialized. Parse errors still propagate.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Ok(cfg) => Ok(cfg),
            Err(PathwiseError::NotInitialized) => Ok(Self::new()),
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn store_path(&self, root: &Path) -> std::path::PathBuf {
        paths::store_path(root, self.store.path.as_deref())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let url = self.backend.base_url.trim();
        if url.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "backend.base_url is empty".to_string(),
            });
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("backend.base_url '{url}' must start with http:// or https://"),
            });
        }

        if self.backend.timeout_seconds == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "backend.timeout_seconds is 0; requests will fail immediately"
                    .to_string(),
            });
        }

        let routes = [
            ("onboarding", &self.routes.onboarding),
            ("roadmap", &self.routes.roadmap),
            ("verify_email", &self.routes.verify_email),
            ("dashboard", &self.routes.dashboard),
        ];
        for (name, route) in routes {
            if !route.starts_with('/') {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("routes.{name} '{route}' should start with '/'"),
                });
            }
            if route.contains('?') {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("routes.{name} '{route}' must not carry a query string"),
                });
            }
        }

        warnings
    }
}
