use async_trait::async_trait;

use super::types::{CreateDocumentInput, Document, UpdateDocumentInput};
use crate::database::DbError;

/// The persistence contract the rest of the system depends on.
///
/// Absence is data, not control flow: `find_by_id` and `update` return
/// `None` for a missing id, `delete` returns `false`. Only genuine
/// storage faults come back as `Err`.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Create a new document with a fresh id and timestamps.
    async fn create(&self, input: CreateDocumentInput) -> Result<Document, DbError>;

    /// Find a document by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, DbError>;

    /// List all documents, most recently created first.
    async fn find_all(&self) -> Result<Vec<Document>, DbError>;

    /// Merge the non-absent fields of `input` over the stored document
    /// and refresh `updated_at`. Returns the new snapshot, or `None` if
    /// the id does not exist.
    async fn update(
        &self,
        id: &str,
        input: UpdateDocumentInput,
    ) -> Result<Option<Document>, DbError>;

    /// Delete a document. Returns whether a row was removed.
    async fn delete(&self, id: &str) -> Result<bool, DbError>;
}
