use std::sync::Arc;

use tokio::sync::RwLock;

use super::MediaStore;

/// Shared state of the stub API server
#[derive(Clone, Default)]
pub struct StubState {
    pub inner: Arc<RwLock<MediaStore>>,
}

impl StubState {
    /// Creates a stub with no records
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stub pre-loaded with `store`
    pub fn with_store(store: MediaStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }
}
