use crate::{error::AppError, storage::db::SurrealDbClient, stored_object};
use uuid::Uuid;

stored_object!(Document, "document", {
    file_name: String,
    file_type: String,
    content: String,
    category_id: Option<String>,
    subtopic_ids: Vec<String>,
    is_active: bool
});

#[derive(serde::Deserialize)]
struct DocumentIdRow {
    #[serde(deserialize_with = "deserialize_flexible_id")]
    id: String,
}

#[derive(serde::Deserialize)]
struct CountRow {
    count: usize,
}

impl Document {
    pub fn new(file_name: String, file_type: String, content: String) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            file_name,
            file_type,
            content,
            category_id: None,
            subtopic_ids: Vec::new(),
            is_active: true,
        }
    }

    /// All documents visible to retrieval, in stable id order.
    pub async fn list_active(db: &SurrealDbClient) -> Result<Vec<Document>, AppError> {
        let mut response = db
            .query("SELECT * FROM document WHERE is_active = true ORDER BY id ASC")
            .await?;
        let documents: Vec<Document> = response.take(0)?;
        Ok(documents)
    }

    /// Ids of active documents, in the same stable order as [`Self::list_active`].
    pub async fn active_ids(db: &SurrealDbClient) -> Result<Vec<String>, AppError> {
        let mut response = db
            .query("SELECT id FROM document WHERE is_active = true ORDER BY id ASC")
            .await?;
        let rows: Vec<DocumentIdRow> = response.take(0)?;
        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    pub async fn count_active(db: &SurrealDbClient) -> Result<usize, AppError> {
        let mut response = db
            .query("SELECT count() FROM document WHERE is_active = true GROUP ALL")
            .await?;
        let rows: Vec<CountRow> = response.take(0)?;
        Ok(rows.first().map_or(0, |row| row.count))
    }

    pub async fn set_active(
        db: &SurrealDbClient,
        id: &str,
        active: bool,
    ) -> Result<(), AppError> {
        db.query("UPDATE type::thing('document', $id) SET is_active = $active, updated_at = time::now()")
            .bind(("id", id.to_owned()))
            .bind(("active", active))
            .await?;
        Ok(())
    }

    /// Removes a document together with its chunks (cascade).
    pub async fn delete_with_chunks(db: &SurrealDbClient, id: &str) -> Result<(), AppError> {
        super::document_chunk::DocumentChunk::delete_by_document_id(id, db).await?;
        db.delete_item::<Document>(id).await?;
        Ok(())
    }
}
