//! Lexis Test Utilities
//!
//! Centralized test infrastructure for the Lexis workspace:
//! - Proptest generators for documents, users, and metric descriptors
//! - Failing and counting test doubles for stores and cache backends
//! - Test fixtures for common document scenarios
//! - Custom assertions for access control and report validation

// Re-export in-memory implementations and traits from their source crate
pub use lexis_storage::{
    CacheAside, CacheConfig, CacheStats, DocumentStore, MemoryCacheBackend, MemoryDocumentStore,
    MemoryPrincipalStore, MetricCache, MetricKey, PrincipalStore,
};

// Re-export core types for convenience
pub use lexis_core::{
    new_document_id, new_user_id, AccessError, CacheError, Document, DocumentId, LexisError,
    LexisResult, Metric, MetricValue, Report, ReportEntry, StorageError, Timestamp, UserId,
};

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

// ============================================================================
// TEST DOUBLES
// ============================================================================

/// Document store that fails every call with a backend error.
#[derive(Debug, Clone)]
pub struct FailingDocumentStore {
    reason: String,
}

impl FailingDocumentStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn backend_error(&self) -> LexisError {
        StorageError::Backend {
            reason: self.reason.clone(),
        }
        .into()
    }
}

#[async_trait]
impl DocumentStore for FailingDocumentStore {
    async fn find_by_id(&self, _id: DocumentId) -> LexisResult<Option<Document>> {
        Err(self.backend_error())
    }

    async fn find_all_by_owner(&self, _owner_id: UserId) -> LexisResult<Vec<Document>> {
        Err(self.backend_error())
    }

    async fn save(&self, _document: &Document) -> LexisResult<Document> {
        Err(self.backend_error())
    }

    async fn delete_by_id_and_owner(
        &self,
        _id: DocumentId,
        _owner_id: UserId,
    ) -> LexisResult<u64> {
        Err(self.backend_error())
    }
}

/// Cache backend that stores values in a plain map and counts traffic.
///
/// `get_calls` and `set_calls` let a test prove that a second computation
/// was answered from the cache instead of recomputed.
#[derive(Debug, Default)]
pub struct CountingCacheBackend {
    entries: RwLock<HashMap<String, MetricValue>>,
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
}

impl CountingCacheBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total lookups, hit or miss.
    pub fn get_calls(&self) -> u64 {
        self.hits.load(Ordering::SeqCst) + self.misses.load(Ordering::SeqCst)
    }

    /// Total stores.
    pub fn set_calls(&self) -> u64 {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetricCache for CountingCacheBackend {
    async fn get(&self, key: &MetricKey) -> LexisResult<Option<MetricValue>> {
        let found = self.entries.read().unwrap().get(key.as_str()).cloned();
        match found {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::SeqCst);
                Ok(Some(value))
            }
            None => {
                self.misses.fetch_add(1, Ordering::SeqCst);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &MetricKey, value: &MetricValue) -> LexisResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.entries
            .write()
            .unwrap()
            .insert(key.as_str().to_string(), value.clone());
        Ok(())
    }

    async fn stats(&self) -> LexisResult<CacheStats> {
        Ok(CacheStats {
            hits: self.hits.load(Ordering::SeqCst),
            misses: self.misses.load(Ordering::SeqCst),
            entry_count: self.entries.read().unwrap().len() as u64,
            evictions: 0,
        })
    }
}

/// Which side of the cache conversation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheFailure {
    /// Lookups fail; stores succeed into the void.
    Read,
    /// Lookups miss; stores fail.
    Write,
    /// Both sides fail.
    ReadAndWrite,
    /// Lookups time out; stores succeed.
    Timeout,
}

/// Cache backend that fails on command, for degraded-path tests.
#[derive(Debug, Clone)]
pub struct FailingCacheBackend {
    failure: CacheFailure,
}

impl FailingCacheBackend {
    pub fn new(failure: CacheFailure) -> Self {
        Self { failure }
    }
}

#[async_trait]
impl MetricCache for FailingCacheBackend {
    async fn get(&self, _key: &MetricKey) -> LexisResult<Option<MetricValue>> {
        match self.failure {
            CacheFailure::Read | CacheFailure::ReadAndWrite => Err(CacheError::ReadFailed {
                reason: "injected read failure".to_string(),
            }
            .into()),
            CacheFailure::Timeout => Err(CacheError::Timeout { timeout_ms: 10 }.into()),
            CacheFailure::Write => Ok(None),
        }
    }

    async fn set(&self, _key: &MetricKey, _value: &MetricValue) -> LexisResult<()> {
        match self.failure {
            CacheFailure::Write | CacheFailure::ReadAndWrite => Err(CacheError::WriteFailed {
                reason: "injected write failure".to_string(),
            }
            .into()),
            _ => Ok(()),
        }
    }

    async fn stats(&self) -> LexisResult<CacheStats> {
        Ok(CacheStats::default())
    }
}

use chrono::Utc;
use uuid::Uuid;

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating Lexis entity types.

    use super::*;
    use proptest::prelude::*;

    /// Generate a random UUID.
    pub fn arb_uuid() -> impl Strategy<Value = Uuid> {
        any::<[u8; 16]>().prop_map(Uuid::from_bytes)
    }

    /// Generate a random DocumentId.
    pub fn arb_document_id() -> impl Strategy<Value = DocumentId> {
        arb_uuid()
    }

    /// Generate a random UserId.
    pub fn arb_user_id() -> impl Strategy<Value = UserId> {
        arb_uuid()
    }

    /// Generate a Timestamp (DateTime<Utc>).
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        // Generate timestamps within a reasonable range (2020-2030)
        (1577836800i64..1893456000i64)
            .prop_map(|secs| chrono::DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now))
    }

    /// Generate a metric descriptor, both character-count flags included.
    pub fn arb_metric() -> impl Strategy<Value = Metric> {
        prop_oneof![
            Just(Metric::WordCount),
            Just(Metric::CharacterCount {
                exclude_punctuation: false,
            }),
            Just(Metric::CharacterCount {
                exclude_punctuation: true,
            }),
            Just(Metric::SentenceCount),
            Just(Metric::ParagraphCount),
            Just(Metric::LongestWords),
        ]
    }

    /// Generate document-like prose: words, punctuation, and line breaks.
    pub fn arb_content() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,!?'\n]{0,200}".prop_map(|s| s)
    }

    /// Generate a Document with a random owner.
    pub fn arb_document() -> impl Strategy<Value = Document> {
        (
            arb_document_id(),
            arb_user_id(),
            arb_content(),
            arb_timestamp(),
        )
            .prop_map(|(document_id, owner_id, content, created_at)| Document {
                document_id,
                owner_id,
                content,
                created_at,
                updated_at: created_at,
            })
    }

    /// Generate a Document owned by a fixed user.
    pub fn arb_owned_document(owner_id: UserId) -> impl Strategy<Value = Document> {
        (arb_document_id(), arb_content(), arb_timestamp()).prop_map(
            move |(document_id, content, created_at)| Document {
                document_id,
                owner_id,
                content,
                created_at,
                updated_at: created_at,
            },
        )
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built test fixtures for common document scenarios.

    use super::*;

    /// A nine-word pangram ending in a period.
    pub fn pangram_document(owner_id: UserId) -> Document {
        Document::new("The quick brown fox jumps over the lazy dog.", owner_id)
    }

    /// Three one-sentence paragraphs separated by blank lines.
    pub fn three_paragraph_document(owner_id: UserId) -> Document {
        Document::new(
            "First paragraph.\n\nSecond paragraph.\n\nThird paragraph.",
            owner_id,
        )
    }

    /// A document with empty content.
    pub fn empty_document(owner_id: UserId) -> Document {
        Document::new("", owner_id)
    }

    /// A short mixed text exercising every metric at once: several
    /// sentences, punctuation runs, and a repeated longest word.
    pub fn essay_document(owner_id: UserId) -> Document {
        Document::new(
            "Observation is the first step. Measurement comes second!\n\
             \n\
             Numbers alone convince nobody??? Interpretation matters.\n\
             Interpretation, done honestly, persuades.",
            owner_id,
        )
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Custom assertion functions for Lexis-specific validation.

    use super::*;

    /// Assert that a LexisResult is Ok.
    #[track_caller]
    pub fn assert_ok<T: std::fmt::Debug>(result: &LexisResult<T>) {
        assert!(result.is_ok(), "Expected Ok, got Err: {:?}", result);
    }

    /// Assert that a result is the not-found error for this document.
    #[track_caller]
    pub fn assert_document_not_found<T: std::fmt::Debug>(
        result: &LexisResult<T>,
        id: DocumentId,
    ) {
        match result {
            Err(LexisError::Access(AccessError::DocumentNotFound { id: got })) => {
                assert_eq!(*got, id, "Wrong document id in DocumentNotFound error");
            }
            other => panic!("Expected DocumentNotFound for {}, got: {:?}", id, other),
        }
    }

    /// Assert that a result is the not-found error for this user.
    #[track_caller]
    pub fn assert_user_not_found<T: std::fmt::Debug>(result: &LexisResult<T>, id: UserId) {
        match result {
            Err(LexisError::Access(AccessError::UserNotFound { id: got })) => {
                assert_eq!(*got, id, "Wrong user id in UserNotFound error");
            }
            other => panic!("Expected UserNotFound for {}, got: {:?}", id, other),
        }
    }

    /// Assert that a result is the ownership rejection for this document.
    #[track_caller]
    pub fn assert_forbidden<T: std::fmt::Debug>(result: &LexisResult<T>, id: DocumentId) {
        match result {
            Err(LexisError::Access(AccessError::Forbidden { id: got })) => {
                assert_eq!(*got, id, "Wrong document id in Forbidden error");
            }
            other => panic!("Expected Forbidden for {}, got: {:?}", id, other),
        }
    }

    /// Assert that a result is a Storage error.
    #[track_caller]
    pub fn assert_storage_error<T: std::fmt::Debug>(result: &LexisResult<T>) {
        match result {
            Err(LexisError::Storage(_)) => {}
            other => panic!("Expected Storage error, got: {:?}", other),
        }
    }

    /// Assert that every metric field of a report entry matches a direct
    /// computation over the entry's own content echo.
    #[track_caller]
    pub fn assert_entry_matches_content(entry: &ReportEntry) {
        assert_eq!(
            entry.word_count,
            lexis_metrics::word_count(&entry.content),
            "word_count mismatch for {:?}",
            entry.content
        );
        assert_eq!(
            entry.character_count,
            lexis_metrics::character_count(&entry.content, false),
            "character_count mismatch for {:?}",
            entry.content
        );
        assert_eq!(
            entry.sentence_count,
            lexis_metrics::sentence_count(&entry.content),
            "sentence_count mismatch for {:?}",
            entry.content
        );
        assert_eq!(
            entry.paragraph_count,
            lexis_metrics::paragraph_count(&entry.content),
            "paragraph_count mismatch for {:?}",
            entry.content
        );
        assert_eq!(
            entry.longest_words,
            lexis_metrics::longest_words(&entry.content),
            "longest_words mismatch for {:?}",
            entry.content
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
