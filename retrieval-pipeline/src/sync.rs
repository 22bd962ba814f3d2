use common::{
    error::AppError,
    storage::{
        db::SurrealDbClient,
        types::{document::Document, document_chunk::DocumentChunk},
    },
};
use tracing::info;

use crate::{chunker::split_into_chunks, CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};

/// Backfills chunks for every active document that has none, so that
/// documents uploaded through any path are searchable before retrieval runs.
///
/// Idempotent: a second pass finds nothing to do. Two concurrent callers may
/// both chunk the same never-chunked document; the duplicated chunk set is
/// tolerated as a rare, self-healing race (retrieval just sees repeated
/// content) instead of taking a per-document lock.
pub async fn ensure_chunks_exist(db: &SurrealDbClient) -> Result<(), AppError> {
    let chunked_ids = DocumentChunk::document_ids_with_chunks(db).await?;
    let documents = Document::list_active(db).await?;

    for document in documents {
        if chunked_ids.contains(&document.id) {
            continue;
        }

        let chunks = split_into_chunks(&document.content, DEFAULT_CHUNK_SIZE, CHUNK_OVERLAP);
        if chunks.is_empty() {
            continue;
        }
        DocumentChunk::insert_for_document(db, &document.id, &chunks).await?;
        info!(
            document_id = %document.id,
            chunk_count = chunks.len(),
            "Backfilled chunks for document"
        );
    }

    Ok(())
}
