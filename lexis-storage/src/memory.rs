//! In-memory store implementations backed by tokio locks.
//!
//! These are the reference implementations of [`DocumentStore`] and
//! [`PrincipalStore`]. Clones share the same underlying maps, so a handle
//! kept by a test fixture observes writes made through the service.

use async_trait::async_trait;
use lexis_core::{Document, DocumentId, LexisResult, UserId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{DocumentStore, PrincipalStore};

// ============================================================================
// DOCUMENT STORE
// ============================================================================

/// In-memory document store.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<RwLock<HashMap<DocumentId, Document>>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents across all owners.
    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }
}

impl Clone for MemoryDocumentStore {
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_by_id(&self, id: DocumentId) -> LexisResult<Option<Document>> {
        let documents = self.documents.read().await;
        Ok(documents.get(&id).cloned())
    }

    async fn find_all_by_owner(&self, owner_id: UserId) -> LexisResult<Vec<Document>> {
        let documents = self.documents.read().await;
        let mut owned: Vec<Document> = documents
            .values()
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by_key(|d| (d.created_at, d.document_id));
        Ok(owned)
    }

    async fn save(&self, document: &Document) -> LexisResult<Document> {
        let mut documents = self.documents.write().await;
        documents.insert(document.document_id, document.clone());
        Ok(document.clone())
    }

    async fn delete_by_id_and_owner(
        &self,
        id: DocumentId,
        owner_id: UserId,
    ) -> LexisResult<u64> {
        let mut documents = self.documents.write().await;
        match documents.get(&id) {
            Some(d) if d.owner_id == owner_id => {
                documents.remove(&id);
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

// ============================================================================
// PRINCIPAL STORE
// ============================================================================

/// In-memory registry of user ids.
#[derive(Debug, Default)]
pub struct MemoryPrincipalStore {
    users: Arc<RwLock<HashSet<UserId>>>,
}

impl MemoryPrincipalStore {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user id. Registering twice is a no-op.
    pub async fn register(&self, id: UserId) {
        self.users.write().await.insert(id);
    }
}

impl Clone for MemoryPrincipalStore {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
        }
    }
}

#[async_trait]
impl PrincipalStore for MemoryPrincipalStore {
    async fn exists(&self, id: UserId) -> LexisResult<bool> {
        let users = self.users.read().await;
        Ok(users.contains(&id))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use lexis_core::{new_document_id, new_user_id};
    use std::time::Duration;

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let store = MemoryDocumentStore::new();
        let document = Document::new("Some prose.", new_user_id());

        let stored = store.save(&document).await.expect("save should succeed");
        assert_eq!(stored, document);

        let found = store
            .find_by_id(document.document_id)
            .await
            .expect("find_by_id should succeed");
        assert_eq!(found, Some(document));
    }

    #[tokio::test]
    async fn test_find_by_id_missing_returns_none() {
        let store = MemoryDocumentStore::new();

        let found = store
            .find_by_id(new_document_id())
            .await
            .expect("find_by_id should succeed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_save_upserts_in_place() {
        let store = MemoryDocumentStore::new();
        let mut document = Document::new("Draft one.", new_user_id());

        store.save(&document).await.expect("save should succeed");
        document.replace_content("Draft two.");
        store.save(&document).await.expect("save should succeed");

        assert_eq!(store.document_count().await, 1);
        let found = store
            .find_by_id(document.document_id)
            .await
            .expect("find_by_id should succeed")
            .expect("document should exist");
        assert_eq!(found.content, "Draft two.");
    }

    #[tokio::test]
    async fn test_find_all_by_owner_filters_and_orders_by_creation() {
        let store = MemoryDocumentStore::new();
        let owner = new_user_id();
        let other = new_user_id();

        let newest = Document::new("newest", owner);
        let mut oldest = Document::new("oldest", owner);
        let mut middle = Document::new("middle", owner);
        oldest.created_at = newest.created_at - Duration::from_secs(120);
        middle.created_at = newest.created_at - Duration::from_secs(60);

        // Insertion order deliberately disagrees with creation order.
        store.save(&newest).await.expect("save should succeed");
        store.save(&oldest).await.expect("save should succeed");
        store.save(&middle).await.expect("save should succeed");
        store
            .save(&Document::new("foreign", other))
            .await
            .expect("save should succeed");

        let owned = store
            .find_all_by_owner(owner)
            .await
            .expect("find_all_by_owner should succeed");
        let contents: Vec<&str> = owned.iter().map(|d| d.content.as_str()).collect();
        assert_eq!(contents, vec!["oldest", "middle", "newest"]);
    }

    #[tokio::test]
    async fn test_find_all_by_owner_breaks_timestamp_ties_by_id() {
        let store = MemoryDocumentStore::new();
        let owner = new_user_id();

        let first = Document::new("a", owner);
        let mut second = Document::new("b", owner);
        second.created_at = first.created_at;

        store.save(&second).await.expect("save should succeed");
        store.save(&first).await.expect("save should succeed");

        let owned = store
            .find_all_by_owner(owner)
            .await
            .expect("find_all_by_owner should succeed");
        assert_eq!(owned.len(), 2);
        assert!(owned[0].document_id < owned[1].document_id);
    }

    #[tokio::test]
    async fn test_find_all_by_owner_empty_for_unknown_owner() {
        let store = MemoryDocumentStore::new();
        store
            .save(&Document::new("text", new_user_id()))
            .await
            .expect("save should succeed");

        let owned = store
            .find_all_by_owner(new_user_id())
            .await
            .expect("find_all_by_owner should succeed");
        assert!(owned.is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_id_and_owner() {
        let store = MemoryDocumentStore::new();
        let owner = new_user_id();
        let document = Document::new("delete me", owner);
        store.save(&document).await.expect("save should succeed");

        let removed = store
            .delete_by_id_and_owner(document.document_id, owner)
            .await
            .expect("delete should succeed");
        assert_eq!(removed, 1);

        let found = store
            .find_by_id(document.document_id)
            .await
            .expect("find_by_id should succeed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_delete_requires_matching_owner() {
        let store = MemoryDocumentStore::new();
        let owner = new_user_id();
        let document = Document::new("mine", owner);
        store.save(&document).await.expect("save should succeed");

        let removed = store
            .delete_by_id_and_owner(document.document_id, new_user_id())
            .await
            .expect("delete should succeed");
        assert_eq!(removed, 0);

        let found = store
            .find_by_id(document.document_id)
            .await
            .expect("find_by_id should succeed");
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_delete_missing_document_removes_nothing() {
        let store = MemoryDocumentStore::new();

        let removed = store
            .delete_by_id_and_owner(new_document_id(), new_user_id())
            .await
            .expect("delete should succeed");
        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryDocumentStore::new();
        let handle = store.clone();
        let document = Document::new("shared", new_user_id());

        handle.save(&document).await.expect("save should succeed");

        let found = store
            .find_by_id(document.document_id)
            .await
            .expect("find_by_id should succeed");
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_principal_register_and_exists() {
        let store = MemoryPrincipalStore::new();
        let user = new_user_id();

        assert!(!store.exists(user).await.expect("exists should succeed"));

        store.register(user).await;
        assert!(store.exists(user).await.expect("exists should succeed"));

        // Idempotent.
        store.register(user).await;
        assert!(store.exists(user).await.expect("exists should succeed"));
    }
}
