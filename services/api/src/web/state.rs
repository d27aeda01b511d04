//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Arc;
use study_pack_core::{BlobStore, PackGenerationService, PackStore};

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PackStore>,
}

impl AppState {
    /// Opens the pack store over the given adapters.
    pub async fn open(
        blobs: Arc<dyn BlobStore>,
        generator: Arc<dyn PackGenerationService>,
        storage_key: &str,
    ) -> Self {
        let store = PackStore::open(blobs, generator, storage_key).await;
        Self {
            store: Arc::new(store),
        }
    }
}
