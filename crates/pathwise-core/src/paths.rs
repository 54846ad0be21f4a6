use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const PATHWISE_DIR: &str = ".pathwise";
pub const CONFIG_FILE: &str = ".pathwise/config.yaml";
pub const STORE_FILE: &str = ".pathwise/local-store.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn pathwise_dir(root: &Path) -> PathBuf {
    root.join(PATHWISE_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Resolve the local store file. Relative paths are taken from `root`.
pub fn store_path(root: &Path, configured: Option<&str>) -> PathBuf {
    match configured {
        Some(p) if Path::new(p).is_absolute() => PathBuf::from(p),
        Some(p) => root.join(p),
        None => root.join(STORE_FILE),
    }
}
