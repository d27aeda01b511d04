pub mod domain;
pub mod extractor;
pub mod memory;
pub mod ports;
pub mod store;

pub use domain::{Artifact, Flashcard, Pack, QuizQuestion};
pub use extractor::HeuristicGenerator;
pub use memory::MemoryBlobStore;
pub use ports::{BlobStore, PackGenerationService, PortError, PortResult};
pub use store::{PackStore, StoreError, StoreResult, MANUAL_SUMMARY};
