//! Lexis Core - Entity Types
//!
//! Pure data structures shared by every crate in the workspace: identifiers,
//! the document entity, metric descriptors and values, report shapes, and the
//! error families. No I/O and no business logic lives here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Document identifier using UUIDv7 for timestamp-sortable IDs.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation time.
pub type DocumentId = Uuid;

/// User identifier using UUIDv7.
pub type UserId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 DocumentId (timestamp-sortable).
pub fn new_document_id() -> DocumentId {
    Uuid::now_v7()
}

/// Generate a new UUIDv7 UserId.
pub fn new_user_id() -> UserId {
    Uuid::now_v7()
}

// ============================================================================
// METRIC DESCRIPTORS
// ============================================================================

/// Descriptor for one text analysis operation, carrying its parameters.
///
/// A `Metric` names the operation and pins down everything besides the text
/// itself that can change the result, so two equal descriptors over equal
/// content are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Count of word tokens.
    WordCount,
    /// Count of non-whitespace characters, optionally ignoring punctuation.
    CharacterCount { exclude_punctuation: bool },
    /// Count of sentence fragments with real content.
    SentenceCount,
    /// Count of non-blank lines.
    ParagraphCount,
    /// The distinct longest words of the text.
    LongestWords,
}

impl Metric {
    /// Every descriptor, both character-count parameterizations included.
    pub const ALL: [Metric; 6] = [
        Metric::WordCount,
        Metric::CharacterCount {
            exclude_punctuation: false,
        },
        Metric::CharacterCount {
            exclude_punctuation: true,
        },
        Metric::SentenceCount,
        Metric::ParagraphCount,
        Metric::LongestWords,
    ];

    /// Stable operation name, used in cache keys and log fields.
    pub fn op_name(&self) -> &'static str {
        match self {
            Metric::WordCount => "word_count",
            Metric::CharacterCount { .. } => "character_count",
            Metric::SentenceCount => "sentence_count",
            Metric::ParagraphCount => "paragraph_count",
            Metric::LongestWords => "longest_words",
        }
    }

    /// Parameter segment for cache keys. `None` for parameterless operations.
    pub fn param_segment(&self) -> Option<String> {
        match self {
            Metric::CharacterCount {
                exclude_punctuation,
            } => Some(exclude_punctuation.to_string()),
            _ => None,
        }
    }
}

// ============================================================================
// METRIC VALUES
// ============================================================================

/// Value produced by a metric operation.
///
/// All five operations produce one of these two shapes, so the cache stores a
/// single value type regardless of which operation filled it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricValue {
    /// A numeric result. Zero is a legitimate value, not an absence marker.
    Count(u64),
    /// A set of distinct words, deterministically ordered.
    Words(BTreeSet<String>),
}

impl From<u64> for MetricValue {
    fn from(count: u64) -> Self {
        MetricValue::Count(count)
    }
}

impl From<BTreeSet<String>> for MetricValue {
    fn from(words: BTreeSet<String>) -> Self {
        MetricValue::Words(words)
    }
}

impl TryFrom<MetricValue> for u64 {
    type Error = MetricShapeError;

    fn try_from(value: MetricValue) -> Result<Self, Self::Error> {
        match value {
            MetricValue::Count(count) => Ok(count),
            MetricValue::Words(_) => Err(MetricShapeError),
        }
    }
}

impl TryFrom<MetricValue> for BTreeSet<String> {
    type Error = MetricShapeError;

    fn try_from(value: MetricValue) -> Result<Self, Self::Error> {
        match value {
            MetricValue::Words(words) => Ok(words),
            MetricValue::Count(_) => Err(MetricShapeError),
        }
    }
}

// ============================================================================
// ERROR TYPES
// ============================================================================

/// A metric value held the other shape than the operation expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Metric value has the wrong shape for this operation")]
pub struct MetricShapeError;

/// Access control errors.
///
/// `DocumentNotFound` and `Forbidden` are deliberately distinct: a caller is
/// told when a document exists but belongs to someone else.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Document not found: {id}")]
    DocumentNotFound { id: DocumentId },

    #[error("User not found: {id}")]
    UserNotFound { id: UserId },

    #[error("Document {id} belongs to another user")]
    Forbidden { id: DocumentId },
}

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Backend error: {reason}")]
    Backend { reason: String },
}

/// Cache layer errors.
///
/// These never cross the service boundary; the cache coordinator absorbs
/// them and recomputes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache read failed: {reason}")]
    ReadFailed { reason: String },

    #[error("Cache write failed: {reason}")]
    WriteFailed { reason: String },

    #[error("Cache operation timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all Lexis errors.
#[derive(Debug, Clone, Error)]
pub enum LexisError {
    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for Lexis operations.
pub type LexisResult<T> = Result<T, LexisError>;

// ============================================================================
// ENTITY STRUCTS
// ============================================================================

/// Document - one user-owned piece of text.
/// Content is always a real string; absent input is normalized to empty at
/// whatever boundary constructs the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub document_id: DocumentId,
    pub owner_id: UserId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Document {
    /// Create a new document owned by `owner_id`, both timestamps set to now.
    pub fn new(content: impl Into<String>, owner_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            document_id: new_document_id(),
            owner_id,
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the content wholesale and refresh `updated_at`.
    /// `created_at` never changes after construction.
    pub fn replace_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.updated_at = Utc::now();
    }
}

/// One document's row in a user report: the content echo plus all five
/// metric results. Character count is reported with punctuation included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub document_id: DocumentId,
    pub content: String,
    pub word_count: u64,
    pub character_count: u64,
    pub sentence_count: u64,
    pub paragraph_count: u64,
    pub longest_words: BTreeSet<String>,
}

/// Aggregated analysis over every document a user owns.
/// `entries` follows the owner's listing order; an empty list is a valid
/// report, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub user_id: UserId,
    pub entries: Vec<ReportEntry>,
}

// ============================================================================
// TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
