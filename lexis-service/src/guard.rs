//! Ownership resolution for document access.
//!
//! Every operation that touches a specific document resolves it through
//! [`resolve_owned`] first. The two failure modes stay distinct: a missing
//! document is [`AccessError::DocumentNotFound`], an existing document owned
//! by someone else is [`AccessError::Forbidden`]. The contract deliberately
//! keeps those cases apart, so a caller probing a foreign id can tell that
//! the document exists.

use lexis_core::{AccessError, Document, DocumentId, LexisResult, UserId};
use lexis_storage::DocumentStore;

/// Fetch `document_id` and prove that `user_id` owns it.
///
/// Returns the document on success, `DocumentNotFound` when no document has
/// that id, and `Forbidden` when the document belongs to another user.
pub async fn resolve_owned<D>(
    documents: &D,
    document_id: DocumentId,
    user_id: UserId,
) -> LexisResult<Document>
where
    D: DocumentStore + ?Sized,
{
    let document = documents
        .find_by_id(document_id)
        .await?
        .ok_or(AccessError::DocumentNotFound { id: document_id })?;

    if document.owner_id != user_id {
        return Err(AccessError::Forbidden { id: document_id }.into());
    }

    Ok(document)
}
