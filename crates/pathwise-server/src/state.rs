use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    /// Serializes read-modify-write cycles on the local store file.
    store_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            store_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Hold the returned guard from opening the store until it is flushed.
    pub async fn lock_store(&self) -> OwnedMutexGuard<()> {
        self.store_lock.clone().lock_owned().await
    }
}
