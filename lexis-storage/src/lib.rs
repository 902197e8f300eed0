//! Lexis Storage - Store Traits and In-Memory Implementations
//!
//! Defines the persistence abstraction for Lexis documents and registered
//! users. In-memory implementations backed by tokio locks live in [`memory`];
//! the metric result cache lives in [`cache`].

pub mod cache;
pub mod memory;

pub use memory::{MemoryDocumentStore, MemoryPrincipalStore};

// Re-export cache types for service integration
pub use cache::{CacheAside, CacheConfig, CacheStats, MemoryCacheBackend, MetricCache, MetricKey};

use async_trait::async_trait;
use lexis_core::{Document, DocumentId, LexisResult, UserId};

// ============================================================================
// DOCUMENT STORE TRAIT
// ============================================================================

/// Persistence operations for documents.
///
/// Implementations answer exactly what they are asked: lookups are scoped by
/// the identifiers given, and ownership decisions happen above this trait.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Get a document by id. Returns `None` when no such document exists.
    async fn find_by_id(&self, id: DocumentId) -> LexisResult<Option<Document>>;

    /// List all documents owned by `owner_id`, ordered by creation time,
    /// then by document id for rows created in the same instant.
    async fn find_all_by_owner(&self, owner_id: UserId) -> LexisResult<Vec<Document>>;

    /// Insert or replace a document, returning the stored row.
    async fn save(&self, document: &Document) -> LexisResult<Document>;

    /// Delete a document only when both id and owner match.
    /// Returns the number of rows removed (0 or 1).
    async fn delete_by_id_and_owner(&self, id: DocumentId, owner_id: UserId)
        -> LexisResult<u64>;
}

// ============================================================================
// PRINCIPAL STORE TRAIT
// ============================================================================

/// Lookup for registered users.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Whether a user with this id is registered.
    async fn exists(&self, id: UserId) -> LexisResult<bool>;
}
