use super::id::{generate_id, now_millis};
use super::repository::DocumentRepository;
use super::types::{CreateDocumentInput, Document, UpdateDocumentInput};
use crate::database::{Database, DbError};

use async_trait::async_trait;

impl Database {
    /// Create the documents table
    pub fn create_docs_table(&self) -> Result<(), DbError> {
        let conn = self.conn.lock().map_err(|_| DbError::Lock)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_documents_created_at
             ON documents(created_at DESC)",
            [],
        )?;

        Ok(())
    }

    /// Create a new document
    pub fn create_document(&self, input: &CreateDocumentInput) -> Result<Document, DbError> {
        let conn = self.conn.lock().map_err(|_| DbError::Lock)?;
        let now = now_millis();
        let id = generate_id(now);

        conn.execute(
            "INSERT INTO documents (id, title, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![id, input.title, input.content, now, now],
        )?;

        Ok(Document {
            id,
            title: input.title.clone(),
            content: input.content.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a document by ID
    pub fn get_document(&self, id: &str) -> Result<Option<Document>, DbError> {
        let conn = self.conn.lock().map_err(|_| DbError::Lock)?;

        let mut stmt = conn.prepare(
            "SELECT id, title, content, created_at, updated_at
             FROM documents WHERE id = ?1",
        )?;

        let mut rows = stmt.query([id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(Document {
                id: row.get(0)?,
                title: row.get(1)?,
                content: row.get(2)?,
                created_at: row.get(3)?,
                updated_at: row.get(4)?,
            }))
        } else {
            Ok(None)
        }
    }

    /// List all documents, ordered by created_at desc
    pub fn list_documents(&self) -> Result<Vec<Document>, DbError> {
        let conn = self.conn.lock().map_err(|_| DbError::Lock)?;

        let mut stmt = conn.prepare(
            "SELECT id, title, content, created_at, updated_at
             FROM documents
             ORDER BY created_at DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Document {
                id: row.get(0)?,
                title: row.get(1)?,
                content: row.get(2)?,
                created_at: row.get(3)?,
                updated_at: row.get(4)?,
            })
        })?;

        let mut documents = Vec::new();
        for row in rows {
            documents.push(row?);
        }

        Ok(documents)
    }

    /// Merge-update a document: absent input fields keep their stored
    /// values. Read-modify-write; the read and write are two statements,
    /// so concurrent updates to the same id are last-write-wins.
    pub fn update_document(
        &self,
        id: &str,
        input: &UpdateDocumentInput,
    ) -> Result<Option<Document>, DbError> {
        let existing = match self.get_document(id)? {
            Some(doc) => doc,
            None => return Ok(None),
        };

        let title = input.title.clone().unwrap_or(existing.title);
        let content = input.content.clone().unwrap_or(existing.content);
        let now = now_millis();

        let conn = self.conn.lock().map_err(|_| DbError::Lock)?;
        conn.execute(
            "UPDATE documents
             SET title = ?1, content = ?2, updated_at = ?3
             WHERE id = ?4",
            rusqlite::params![title, content, now, id],
        )?;

        Ok(Some(Document {
            id: existing.id,
            title,
            content,
            created_at: existing.created_at,
            updated_at: now,
        }))
    }

    /// Delete a document by ID
    pub fn delete_document(&self, id: &str) -> Result<bool, DbError> {
        let conn = self.conn.lock().map_err(|_| DbError::Lock)?;

        let affected = conn.execute("DELETE FROM documents WHERE id = ?1", [id])?;

        Ok(affected > 0)
    }
}

/// Default repository adapter backed by the embedded SQLite database.
///
/// SQLite calls are blocking, so each operation runs on the blocking
/// pool rather than a runtime worker thread.
#[derive(Clone)]
pub struct SqliteDocumentRepository {
    db: Database,
}

impl SqliteDocumentRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentRepository for SqliteDocumentRepository {
    async fn create(&self, input: CreateDocumentInput) -> Result<Document, DbError> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || db.create_document(&input)).await?
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, DbError> {
        let db = self.db.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || db.get_document(&id)).await?
    }

    async fn find_all(&self) -> Result<Vec<Document>, DbError> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || db.list_documents()).await?
    }

    async fn update(
        &self,
        id: &str,
        input: UpdateDocumentInput,
    ) -> Result<Option<Document>, DbError> {
        let db = self.db.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || db.update_document(&id, &input)).await?
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let db = self.db.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || db.delete_document(&id)).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread::sleep;
    use std::time::Duration;

    fn test_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn make_input(title: &str, content: &str) -> CreateDocumentInput {
        CreateDocumentInput {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_create_then_get_roundtrip() {
        let db = test_db();

        let doc = db
            .create_document(&make_input("Notes", "# Notes\n\nhello"))
            .unwrap();
        assert_eq!(doc.created_at, doc.updated_at);

        let found = db.get_document(&doc.id).unwrap().unwrap();
        assert_eq!(found, doc);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let db = test_db();
        assert!(db.get_document("nonexistent").unwrap().is_none());
    }

    #[test]
    fn test_update_merges_partial_input() {
        let db = test_db();
        let doc = db.create_document(&make_input("Title", "original")).unwrap();

        sleep(Duration::from_millis(2));
        let updated = db
            .update_document(
                &doc.id,
                &UpdateDocumentInput {
                    title: None,
                    content: Some("# Updated".to_string()),
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Title");
        assert_eq!(updated.content, "# Updated");
        assert_eq!(updated.created_at, doc.created_at);
        assert!(updated.updated_at >= doc.updated_at);

        // The merge is persisted, not just returned.
        let found = db.get_document(&doc.id).unwrap().unwrap();
        assert_eq!(found, updated);
    }

    #[test]
    fn test_update_with_empty_input_still_bumps_updated_at() {
        let db = test_db();
        let doc = db.create_document(&make_input("Title", "content")).unwrap();

        sleep(Duration::from_millis(2));
        let updated = db
            .update_document(&doc.id, &UpdateDocumentInput::default())
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, doc.title);
        assert_eq!(updated.content, doc.content);
        assert!(updated.updated_at > doc.updated_at);
    }

    #[test]
    fn test_update_missing_returns_none() {
        let db = test_db();
        let result = db
            .update_document(
                "nonexistent",
                &UpdateDocumentInput {
                    title: Some("x".to_string()),
                    content: None,
                },
            )
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_list_orders_by_created_at_desc() {
        let db = test_db();

        let first = db.create_document(&make_input("first", "")).unwrap();
        sleep(Duration::from_millis(5));
        let second = db.create_document(&make_input("second", "")).unwrap();
        sleep(Duration::from_millis(5));
        let third = db.create_document(&make_input("third", "")).unwrap();

        let docs = db.list_documents().unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec![&third.id, &second.id, &first.id]);
    }

    #[test]
    fn test_list_empty_store() {
        let db = test_db();
        assert!(db.list_documents().unwrap().is_empty());
    }

    #[test]
    fn test_delete_semantics() {
        let db = test_db();
        let doc = db.create_document(&make_input("doomed", "")).unwrap();

        assert!(db.delete_document(&doc.id).unwrap());
        assert!(db.get_document(&doc.id).unwrap().is_none());
        assert!(!db.delete_document(&doc.id).unwrap());
    }

    #[test]
    fn test_rapid_creates_get_distinct_ids() {
        let db = test_db();
        let mut ids = HashSet::new();
        for i in 0..100 {
            let doc = db.create_document(&make_input(&format!("doc {i}"), "")).unwrap();
            ids.insert(doc.id);
        }
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_empty_title_and_content_allowed() {
        let db = test_db();
        let doc = db.create_document(&make_input("", "")).unwrap();
        let found = db.get_document(&doc.id).unwrap().unwrap();
        assert_eq!(found.title, "");
        assert_eq!(found.content, "");
    }

    #[tokio::test]
    async fn test_repository_adapter_end_to_end() {
        let repo = SqliteDocumentRepository::new(test_db());

        let doc = repo
            .create(make_input("Async", "# Async"))
            .await
            .unwrap();
        assert_eq!(repo.find_by_id(&doc.id).await.unwrap(), Some(doc.clone()));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
        assert!(repo.delete(&doc.id).await.unwrap());
        assert_eq!(repo.find_by_id(&doc.id).await.unwrap(), None);
    }
}
