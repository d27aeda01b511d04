//! crates/study_pack_core/src/store.rs
//!
//! The pack store: owns the in-memory collection of packs and mirrors it into a
//! `BlobStore` after every mutation.
//!
//! Every mutation holds the collection lock across the persist call, so the blob is
//! always written with exactly the state that mutation produced. A failed write is
//! logged and the in-memory state stays authoritative.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{Artifact, Pack};
use crate::ports::{BlobStore, PackGenerationService};

pub const MANUAL_SUMMARY: &str =
    "Manual pack (no auto summary). You can later regenerate this topic with the generator.";

/// Errors surfaced to callers of the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A required text field was empty. No state was changed.
    #[error("{0}")]
    Validation(String),
    /// The generator failed. No pack was added.
    #[error("Something went wrong generating the pack: {0}")]
    Generation(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub struct PackStore {
    blobs: Arc<dyn BlobStore>,
    generator: Arc<dyn PackGenerationService>,
    key: String,
    packs: Mutex<Vec<Pack>>,
}

impl PackStore {
    /// Opens the store, loading whatever is persisted under `key`.
    pub async fn open(
        blobs: Arc<dyn BlobStore>,
        generator: Arc<dyn PackGenerationService>,
        key: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let packs = load_packs(blobs.as_ref(), &key).await;
        info!("Loaded {} pack(s) from blob '{}'", packs.len(), key);
        Self {
            blobs,
            generator,
            key,
            packs: Mutex::new(packs),
        }
    }

    /// Reads the persisted collection. Never fails: missing or corrupt data is empty.
    pub async fn load_all(&self) -> Vec<Pack> {
        load_packs(self.blobs.as_ref(), &self.key).await
    }

    /// Creates a pack without running the extractor.
    pub async fn create_manual(&self, title: &str, notes: &str) -> StoreResult<Pack> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::Validation("Title is required.".to_string()));
        }

        let mut packs = self.packs.lock().await;
        let pack = Pack {
            id: fresh_id(&packs),
            title: title.to_string(),
            notes: notes.trim().to_string(),
            summary: MANUAL_SUMMARY.to_string(),
            key_points: Vec::new(),
            flashcards: Vec::new(),
            quiz_questions: Vec::new(),
            created_at: Utc::now(),
        };
        packs.push(pack.clone());
        info!("Created manual pack {} ('{}')", pack.id, pack.title);
        self.persist(&packs).await;
        Ok(pack)
    }

    /// Creates a pack whose summary, key points, flashcards and quiz are derived from `notes`.
    pub async fn create_generated(&self, title: &str, notes: &str) -> StoreResult<Pack> {
        let title = title.trim();
        let notes = notes.trim();
        if title.is_empty() || notes.is_empty() {
            return Err(StoreError::Validation(
                "Title and notes are required for generation.".to_string(),
            ));
        }

        let artifact: Artifact = self.generator.generate(title, notes).await.map_err(|e| {
            error!("Failed to generate pack '{}': {:?}", title, e);
            StoreError::Generation(e.to_string())
        })?;

        let mut packs = self.packs.lock().await;
        let pack = Pack::from_artifact(fresh_id(&packs), title.to_string(), notes.to_string(), artifact);
        packs.push(pack.clone());
        info!(
            "Generated pack {} ('{}'): {} key points, {} flashcards, {} quiz questions",
            pack.id,
            pack.title,
            pack.key_points.len(),
            pack.flashcards.len(),
            pack.quiz_questions.len()
        );
        self.persist(&packs).await;
        Ok(pack)
    }

    /// Removes the pack with `id`. Returns whether a pack was removed; absence is not an error.
    pub async fn delete_one(&self, id: &str) -> bool {
        let mut packs = self.packs.lock().await;
        let before = packs.len();
        packs.retain(|p| p.id != id);
        let removed = packs.len() != before;
        if removed {
            info!("Deleted pack {}", id);
        }
        self.persist(&packs).await;
        removed
    }

    pub async fn delete_all(&self) {
        let mut packs = self.packs.lock().await;
        if packs.is_empty() {
            return;
        }
        info!("Deleting all {} pack(s)", packs.len());
        packs.clear();
        self.persist(&packs).await;
    }

    /// All packs, newest first. Packs with equal timestamps keep insertion order.
    pub async fn list_for_display(&self) -> Vec<Pack> {
        let mut sorted = self.packs.lock().await.clone();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted
    }

    pub async fn get(&self, id: &str) -> Option<Pack> {
        self.packs.lock().await.iter().find(|p| p.id == id).cloned()
    }

    /// Packs in insertion order, as currently held in memory. An inspection helper;
    /// `list_for_display` is the ordering meant for presentation.
    pub async fn snapshot(&self) -> Vec<Pack> {
        self.packs.lock().await.clone()
    }

    async fn persist(&self, packs: &[Pack]) {
        let json = match serde_json::to_string(packs) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize packs: {:?}", e);
                return;
            }
        };
        if let Err(e) = self.blobs.write(&self.key, &json).await {
            error!("Failed to save packs to blob '{}': {:?}", self.key, e);
        }
    }
}

async fn load_packs(blobs: &dyn BlobStore, key: &str) -> Vec<Pack> {
    let raw = match blobs.read(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("Could not read blob '{}', starting empty: {:?}", key, e);
            return Vec::new();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!("Blob '{}' is not a pack collection, starting empty: {}", key, e);
        Vec::new()
    })
}

/// A v4 id not held by any pack in `packs`.
fn fresh_id(packs: &[Pack]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !packs.iter().any(|p| p.id == id) {
            return id;
        }
    }
}
