use serde::{Deserialize, Serialize};

/// A document stored in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: String, // markdown body
    pub created_at: i64,
    pub updated_at: i64,
}

/// Input for creating a new document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocumentInput {
    pub title: String,
    pub content: String,
}

/// Input for updating an existing document. Absent fields are left
/// untouched (merge patch); both absent still bumps `updated_at`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDocumentInput {
    pub title: Option<String>,
    pub content: Option<String>,
}
