use std::collections::HashSet;

use crate::{error::AppError, storage::db::SurrealDbClient, stored_object};
use uuid::Uuid;

use super::document::Document;

stored_object!(DocumentChunk, "document_chunk", {
    document_id: String,
    chunk_index: u32,
    content: String,
    content_lower: String
});

impl DocumentChunk {
    pub fn new(document_id: String, chunk_index: u32, content: String) -> Self {
        let now = chrono::Utc::now();
        let content_lower = content.to_lowercase();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            document_id,
            chunk_index,
            content,
            content_lower,
        }
    }

    /// Persists the chunks of one document with contiguous indices starting
    /// at 0, each with its lowercased mirror. A failure mid-insert deletes
    /// whatever was already stored: a partial chunk set would make the
    /// document look fully chunked to the backfill, hiding its tail forever.
    pub async fn insert_for_document(
        db: &SurrealDbClient,
        document_id: &str,
        chunks: &[String],
    ) -> Result<(), AppError> {
        if let Err(err) = Self::insert_all(db, document_id, chunks).await {
            Self::delete_by_document_id(document_id, db).await?;
            return Err(err);
        }
        Ok(())
    }

    async fn insert_all(
        db: &SurrealDbClient,
        document_id: &str,
        chunks: &[String],
    ) -> Result<(), AppError> {
        for (index, content) in chunks.iter().enumerate() {
            if content.trim().is_empty() {
                return Err(AppError::Validation("empty chunk content".into()));
            }
            let chunk = DocumentChunk::new(
                document_id.to_owned(),
                u32::try_from(index)
                    .map_err(|_| AppError::Validation("chunk index overflow".into()))?,
                content.clone(),
            );
            db.store_item(chunk).await?;
        }
        Ok(())
    }

    pub async fn delete_by_document_id(
        document_id: &str,
        db: &SurrealDbClient,
    ) -> Result<(), AppError> {
        db.query("DELETE document_chunk WHERE document_id = $document_id")
            .bind(("document_id", document_id.to_owned()))
            .await?;
        Ok(())
    }

    /// Chunks of one document in index order.
    pub async fn for_document(
        db: &SurrealDbClient,
        document_id: &str,
    ) -> Result<Vec<DocumentChunk>, AppError> {
        let mut response = db
            .query("SELECT * FROM document_chunk WHERE document_id = $document_id ORDER BY chunk_index ASC")
            .bind(("document_id", document_id.to_owned()))
            .await?;
        let chunks: Vec<DocumentChunk> = response.take(0)?;
        Ok(chunks)
    }

    /// Every chunk belonging to an active document, ordered by
    /// (document id, chunk index). This is the candidate set the ranker
    /// scans and the source of the "earliest content" fallbacks.
    pub async fn for_active_documents(
        db: &SurrealDbClient,
    ) -> Result<Vec<DocumentChunk>, AppError> {
        let ids = Document::active_ids(db).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut response = db
            .query("SELECT * FROM document_chunk WHERE document_id IN $ids ORDER BY document_id ASC, chunk_index ASC")
            .bind(("ids", ids))
            .await?;
        let chunks: Vec<DocumentChunk> = response.take(0)?;
        Ok(chunks)
    }

    /// Set of document ids that already have at least one chunk.
    pub async fn document_ids_with_chunks(
        db: &SurrealDbClient,
    ) -> Result<HashSet<String>, AppError> {
        let mut response = db
            .query("SELECT VALUE document_id FROM document_chunk")
            .await?;
        let ids: Vec<String> = response.take(0)?;
        Ok(ids.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_contiguous_indices() {
        let namespace = "test_ns";
        let database = &Uuid::new_v4().to_string();
        let db = SurrealDbClient::memory(namespace, database)
            .await
            .expect("Failed to start in-memory surrealdb");

        let document = Document::new("doc.txt".into(), "txt".into(), "Body".into());
        db.store_item(document.clone())
            .await
            .expect("Failed to store document");

        let parts = vec![
            "Alpha paragraph".to_string(),
            "Beta paragraph".to_string(),
            "Gamma paragraph".to_string(),
        ];
        DocumentChunk::insert_for_document(&db, &document.id, &parts)
            .await
            .expect("Failed to insert chunks");

        let chunks = DocumentChunk::for_document(&db, &document.id)
            .await
            .expect("Failed to fetch chunks");
        assert_eq!(chunks.len(), 3);
        for (expected_index, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index as usize, expected_index);
            assert_eq!(chunk.content_lower, chunk.content.to_lowercase());
        }
    }

    #[tokio::test]
    async fn test_failed_insert_leaves_no_partial_chunks() {
        let namespace = "test_ns";
        let database = &Uuid::new_v4().to_string();
        let db = SurrealDbClient::memory(namespace, database)
            .await
            .expect("Failed to start in-memory surrealdb");

        let document = Document::new("doc.txt".into(), "txt".into(), "Body".into());
        db.store_item(document.clone())
            .await
            .expect("Failed to store document");

        // the second chunk is invalid, so the insert fails after the first
        let parts = vec!["first part".to_string(), "   ".to_string()];
        let result = DocumentChunk::insert_for_document(&db, &document.id, &parts).await;
        assert!(result.is_err());

        let chunks = DocumentChunk::for_document(&db, &document.id)
            .await
            .expect("Failed to fetch chunks");
        assert!(
            chunks.is_empty(),
            "a partial chunk set would hide the document from the backfill"
        );
        let chunked_ids = DocumentChunk::document_ids_with_chunks(&db)
            .await
            .expect("Failed to collect ids");
        assert!(
            !chunked_ids.contains(&document.id),
            "the document must stay eligible for a retry"
        );
    }

    #[tokio::test]
    async fn test_for_active_documents_skips_inactive() {
        let namespace = "test_ns";
        let database = &Uuid::new_v4().to_string();
        let db = SurrealDbClient::memory(namespace, database)
            .await
            .expect("Failed to start in-memory surrealdb");

        let active = Document::new("a.txt".into(), "txt".into(), "A".into());
        let mut inactive = Document::new("b.txt".into(), "txt".into(), "B".into());
        inactive.is_active = false;
        db.store_item(active.clone())
            .await
            .expect("Failed to store active");
        db.store_item(inactive.clone())
            .await
            .expect("Failed to store inactive");

        DocumentChunk::insert_for_document(&db, &active.id, &["visible".to_string()])
            .await
            .expect("Failed to insert active chunks");
        DocumentChunk::insert_for_document(&db, &inactive.id, &["hidden".to_string()])
            .await
            .expect("Failed to insert inactive chunks");

        let chunks = DocumentChunk::for_active_documents(&db)
            .await
            .expect("Failed to fetch");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].document_id, active.id);

        let chunked_ids = DocumentChunk::document_ids_with_chunks(&db)
            .await
            .expect("Failed to collect ids");
        assert!(chunked_ids.contains(&active.id));
        assert!(chunked_ids.contains(&inactive.id));
    }
}
