//! The document service facade.
//!
//! [`DocumentService`] owns shared handles to the document store, the
//! principal registry, and the cache-aside coordinator. CRUD operations go
//! straight to the store; analysis operations resolve ownership, then hand
//! the document content and the matching metric function to the coordinator,
//! which serves memoized values when it can.

use std::collections::BTreeSet;
use std::sync::Arc;

use lexis_core::{
    AccessError, Document, DocumentId, LexisResult, Metric, Report, ReportEntry, UserId,
};
use lexis_storage::{CacheAside, DocumentStore, MetricCache, PrincipalStore};

use crate::guard;

/// Facade over document storage and text analysis for a single deployment.
///
/// Cloning is cheap: clones share the same stores and the same cache.
pub struct DocumentService<D, P, C>
where
    D: DocumentStore,
    P: PrincipalStore,
    C: MetricCache,
{
    documents: Arc<D>,
    principals: Arc<P>,
    cache: CacheAside<C>,
}

impl<D, P, C> DocumentService<D, P, C>
where
    D: DocumentStore,
    P: PrincipalStore,
    C: MetricCache,
{
    /// Create a service over the given collaborators.
    pub fn new(documents: Arc<D>, principals: Arc<P>, cache: CacheAside<C>) -> Self {
        Self {
            documents,
            principals,
            cache,
        }
    }

    /// Direct access to the document store.
    pub fn documents(&self) -> &D {
        &self.documents
    }

    /// Direct access to the cache coordinator, e.g. for backend statistics.
    pub fn cache(&self) -> &CacheAside<C> {
        &self.cache
    }

    async fn ensure_registered(&self, user_id: UserId) -> LexisResult<()> {
        if self.principals.exists(user_id).await? {
            Ok(())
        } else {
            Err(AccessError::UserNotFound { id: user_id }.into())
        }
    }

    // ========================================================================
    // Document CRUD
    // ========================================================================

    /// Create a document owned by `owner_id`.
    ///
    /// Fails with `UserNotFound` when the owner is not a registered user.
    pub async fn create_document(
        &self,
        content: impl Into<String> + Send,
        owner_id: UserId,
    ) -> LexisResult<Document> {
        self.ensure_registered(owner_id).await?;
        let document = Document::new(content, owner_id);
        tracing::debug!(
            document_id = %document.document_id,
            owner_id = %owner_id,
            content_len = document.content.len(),
            "Creating document"
        );
        self.documents.save(&document).await
    }

    /// List every document `owner_id` owns, oldest first.
    pub async fn list_documents(&self, owner_id: UserId) -> LexisResult<Vec<Document>> {
        self.ensure_registered(owner_id).await?;
        self.documents.find_all_by_owner(owner_id).await
    }

    /// Fetch a single document owned by `user_id`.
    pub async fn get_document(
        &self,
        document_id: DocumentId,
        user_id: UserId,
    ) -> LexisResult<Document> {
        guard::resolve_owned(self.documents.as_ref(), document_id, user_id).await
    }

    /// Replace the content of a document owned by `user_id`.
    ///
    /// Analysis keys are content-addressed, so no cache invalidation happens
    /// here: the next analysis of the new content simply misses.
    pub async fn update_document(
        &self,
        document_id: DocumentId,
        content: impl Into<String> + Send,
        user_id: UserId,
    ) -> LexisResult<Document> {
        let mut document =
            guard::resolve_owned(self.documents.as_ref(), document_id, user_id).await?;
        document.replace_content(content);
        tracing::debug!(
            document_id = %document_id,
            content_len = document.content.len(),
            "Updating document content"
        );
        self.documents.save(&document).await
    }

    /// Delete a document owned by `user_id`.
    pub async fn delete_document(
        &self,
        document_id: DocumentId,
        user_id: UserId,
    ) -> LexisResult<()> {
        guard::resolve_owned(self.documents.as_ref(), document_id, user_id).await?;
        let removed = self
            .documents
            .delete_by_id_and_owner(document_id, user_id)
            .await?;
        if removed == 0 {
            // The document disappeared between the ownership check and the
            // delete. Report it the same way as any other missing document.
            return Err(AccessError::DocumentNotFound { id: document_id }.into());
        }
        tracing::debug!(document_id = %document_id, "Deleted document");
        Ok(())
    }

    // ========================================================================
    // Per-document analysis
    // ========================================================================

    /// Number of word tokens in an owned document.
    ///
    /// Contractions count as one word; standalone punctuation counts nothing.
    pub async fn word_count(&self, document_id: DocumentId, user_id: UserId) -> LexisResult<u64> {
        let document =
            guard::resolve_owned(self.documents.as_ref(), document_id, user_id).await?;
        Ok(self
            .cache
            .memoize(Metric::WordCount, &document.content, || {
                lexis_metrics::word_count(&document.content)
            })
            .await)
    }

    /// Number of non-whitespace characters in an owned document.
    ///
    /// With `exclude_punctuation` set, ASCII punctuation is skipped as well.
    pub async fn character_count(
        &self,
        document_id: DocumentId,
        user_id: UserId,
        exclude_punctuation: bool,
    ) -> LexisResult<u64> {
        let document =
            guard::resolve_owned(self.documents.as_ref(), document_id, user_id).await?;
        Ok(self
            .cache
            .memoize(
                Metric::CharacterCount {
                    exclude_punctuation,
                },
                &document.content,
                || lexis_metrics::character_count(&document.content, exclude_punctuation),
            )
            .await)
    }

    /// Number of sentences in an owned document.
    pub async fn sentence_count(
        &self,
        document_id: DocumentId,
        user_id: UserId,
    ) -> LexisResult<u64> {
        let document =
            guard::resolve_owned(self.documents.as_ref(), document_id, user_id).await?;
        Ok(self
            .cache
            .memoize(Metric::SentenceCount, &document.content, || {
                lexis_metrics::sentence_count(&document.content)
            })
            .await)
    }

    /// Number of paragraphs in an owned document.
    pub async fn paragraph_count(
        &self,
        document_id: DocumentId,
        user_id: UserId,
    ) -> LexisResult<u64> {
        let document =
            guard::resolve_owned(self.documents.as_ref(), document_id, user_id).await?;
        Ok(self
            .cache
            .memoize(Metric::ParagraphCount, &document.content, || {
                lexis_metrics::paragraph_count(&document.content)
            })
            .await)
    }

    /// The distinct longest words of an owned document, lowercased and sorted.
    ///
    /// Word length is judged over the whole text, and every word tying the
    /// maximum length is returned.
    pub async fn longest_words(
        &self,
        document_id: DocumentId,
        user_id: UserId,
    ) -> LexisResult<BTreeSet<String>> {
        let document =
            guard::resolve_owned(self.documents.as_ref(), document_id, user_id).await?;
        Ok(self
            .cache
            .memoize(Metric::LongestWords, &document.content, || {
                lexis_metrics::longest_words(&document.content)
            })
            .await)
    }

    // ========================================================================
    // Reports
    // ========================================================================

    /// Analyze every document `user_id` owns.
    ///
    /// Entries follow the listing order, oldest document first. A registered
    /// user with no documents gets a report with an empty entry list. Report
    /// character counts include punctuation.
    pub async fn user_report(&self, user_id: UserId) -> LexisResult<Report> {
        let documents = self.list_documents(user_id).await?;
        tracing::debug!(
            user_id = %user_id,
            document_count = documents.len(),
            "Building user report"
        );

        let mut entries = Vec::with_capacity(documents.len());
        for document in documents {
            let content = document.content.as_str();
            let (word_count, character_count, sentence_count, paragraph_count, longest_words) =
                tokio::join!(
                    self.cache.memoize(Metric::WordCount, content, || {
                        lexis_metrics::word_count(content)
                    }),
                    self.cache.memoize(
                        Metric::CharacterCount {
                            exclude_punctuation: false,
                        },
                        content,
                        || lexis_metrics::character_count(content, false),
                    ),
                    self.cache.memoize(Metric::SentenceCount, content, || {
                        lexis_metrics::sentence_count(content)
                    }),
                    self.cache.memoize(Metric::ParagraphCount, content, || {
                        lexis_metrics::paragraph_count(content)
                    }),
                    self.cache.memoize(Metric::LongestWords, content, || {
                        lexis_metrics::longest_words(content)
                    }),
                );

            entries.push(ReportEntry {
                document_id: document.document_id,
                word_count,
                character_count,
                sentence_count,
                paragraph_count,
                longest_words,
                content: document.content,
            });
        }

        Ok(Report { user_id, entries })
    }
}

impl<D, P, C> Clone for DocumentService<D, P, C>
where
    D: DocumentStore,
    P: PrincipalStore,
    C: MetricCache,
{
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
            principals: Arc::clone(&self.principals),
            cache: self.cache.clone(),
        }
    }
}
