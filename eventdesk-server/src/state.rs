use std::sync::Arc;

use eventdesk_core::memory::MemoryCollection;
use tokio::sync::RwLock;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    collection: Arc<RwLock<MemoryCollection>>,
}

impl AppState {
    pub fn new(collection: MemoryCollection) -> Self {
        AppState {
            collection: Arc::new(RwLock::new(collection)),
        }
    }

    pub fn collection(&self) -> &RwLock<MemoryCollection> {
        &self.collection
    }
}
