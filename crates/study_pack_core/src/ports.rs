//! crates/study_pack_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of where packs are persisted and how artifacts are derived.

use async_trait::async_trait;

use crate::domain::Artifact;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., filesystem, database).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// A key-value store of UTF-8 text blobs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Reads the blob stored under `key`. `Ok(None)` means nothing has been written yet.
    async fn read(&self, key: &str) -> PortResult<Option<String>>;

    /// Replaces the blob stored under `key`.
    async fn write(&self, key: &str, value: &str) -> PortResult<()>;
}

#[async_trait]
pub trait PackGenerationService: Send + Sync {
    /// Derives a study artifact from a titled block of notes.
    async fn generate(&self, title: &str, notes: &str) -> PortResult<Artifact>;
}
