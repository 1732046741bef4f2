use super::id::{generate_id, now_millis};
use super::repository::DocumentRepository;
use super::types::{CreateDocumentInput, Document, UpdateDocumentInput};
use crate::database::DbError;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory repository satisfying the same contract as the SQLite
/// adapter. Intended for unit tests that don't need a real database.
#[derive(Default)]
pub struct InMemoryDocumentRepository {
    docs: Mutex<HashMap<String, Document>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn create(&self, input: CreateDocumentInput) -> Result<Document, DbError> {
        let now = now_millis();
        let doc = Document {
            id: generate_id(now),
            title: input.title,
            content: input.content,
            created_at: now,
            updated_at: now,
        };

        let mut docs = self.docs.lock().map_err(|_| DbError::Lock)?;
        docs.insert(doc.id.clone(), doc.clone());
        Ok(doc)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, DbError> {
        let docs = self.docs.lock().map_err(|_| DbError::Lock)?;
        Ok(docs.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Document>, DbError> {
        let docs = self.docs.lock().map_err(|_| DbError::Lock)?;
        let mut all: Vec<Document> = docs.values().cloned().collect();
        // Tie-break on id so same-millisecond creations order deterministically.
        all.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(all)
    }

    async fn update(
        &self,
        id: &str,
        input: UpdateDocumentInput,
    ) -> Result<Option<Document>, DbError> {
        let mut docs = self.docs.lock().map_err(|_| DbError::Lock)?;
        let Some(doc) = docs.get_mut(id) else {
            return Ok(None);
        };

        if let Some(title) = input.title {
            doc.title = title;
        }
        if let Some(content) = input.content {
            doc.content = content;
        }
        doc.updated_at = now_millis();
        Ok(Some(doc.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let mut docs = self.docs.lock().map_err(|_| DbError::Lock)?;
        Ok(docs.remove(id).is_some())
    }
}
