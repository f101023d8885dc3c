use std::path::PathBuf;
use std::sync::Arc;

use crate::llm::ChatBackend;

/// Shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    backend: Arc<dyn ChatBackend>,
    static_dir: PathBuf,
}

impl AppState {
    pub fn new(backend: Arc<dyn ChatBackend>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                backend,
                static_dir: static_dir.into(),
            }),
        }
    }

    pub fn backend(&self) -> Arc<dyn ChatBackend> {
        self.inner.backend.clone()
    }

    pub fn static_dir(&self) -> &PathBuf {
        &self.inner.static_dir
    }
}
