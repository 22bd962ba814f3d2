pub mod chunker;
pub mod context;
pub mod keywords;
pub mod scoring;
pub mod sync;

use common::{
    error::AppError,
    storage::{db::SurrealDbClient, types::document_chunk::DocumentChunk},
};
use tracing::{info, instrument};

use context::truncate_to_tokens;
use keywords::extract_keywords;
use scoring::score_chunks;

/// Chunking parameters used when materializing chunks for a document.
pub const DEFAULT_CHUNK_SIZE: usize = 2000;
pub const CHUNK_OVERLAP: usize = 200;

/// Visible separator between chunk contents in the assembled context.
pub const CHUNK_SEPARATOR: &str = "\n\n---\n\n";

/// The assembled, token-budgeted context plus the documents it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedContext {
    pub content: String,
    /// Contributing document ids, deduplicated, stable by first appearance.
    pub document_ids: Vec<String>,
}

/// Selects the most relevant chunks for a question and assembles them into a
/// bounded context.
///
/// Runs the chunk backfill first, then ranks by keyword-match count. A
/// question without usable keywords falls back to the first `max_chunks`
/// chunks in (document id, chunk index) order; a question whose keywords
/// match nothing falls back to at most `min(max_chunks, 3)` chunks, a
/// deliberately smaller slice since an empty match set is a stronger signal
/// of irrelevance than an absent query.
#[instrument(skip(db))]
pub async fn find_relevant_chunks(
    db: &SurrealDbClient,
    question: &str,
    max_chunks: usize,
    max_context_tokens: usize,
) -> Result<RetrievedContext, AppError> {
    sync::ensure_chunks_exist(db).await?;

    let keywords = extract_keywords(question);
    let candidates = DocumentChunk::for_active_documents(db).await?;

    let selected: Vec<DocumentChunk> = if keywords.is_empty() {
        info!(max_chunks, "No usable keywords, using earliest-content fallback");
        candidates.into_iter().take(max_chunks).collect()
    } else {
        let scored = score_chunks(&candidates, &keywords);
        if scored.is_empty() {
            let limit = max_chunks.min(3);
            info!(limit, "No keyword matched any chunk, using reduced fallback");
            candidates.into_iter().take(limit).collect()
        } else {
            info!(
                keyword_count = keywords.len(),
                matched = scored.len(),
                "Ranked chunks by keyword matches"
            );
            scored
                .into_iter()
                .take(max_chunks)
                .map(|scored| scored.chunk)
                .collect()
        }
    };

    Ok(assemble(&selected, max_context_tokens))
}

fn assemble(chunks: &[DocumentChunk], max_context_tokens: usize) -> RetrievedContext {
    let mut document_ids: Vec<String> = Vec::new();
    for chunk in chunks {
        if !document_ids.contains(&chunk.document_id) {
            document_ids.push(chunk.document_id.clone());
        }
    }

    let joined = chunks
        .iter()
        .map(|chunk| chunk.content.as_str())
        .collect::<Vec<_>>()
        .join(CHUNK_SEPARATOR);

    RetrievedContext {
        content: truncate_to_tokens(&joined, max_context_tokens),
        document_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::storage::types::document::Document;
    use uuid::Uuid;

    async fn setup_db() -> SurrealDbClient {
        let namespace = "test_ns";
        let database = &Uuid::new_v4().to_string();
        SurrealDbClient::memory(namespace, database)
            .await
            .expect("Failed to start in-memory surrealdb")
    }

    async fn store_document(db: &SurrealDbClient, name: &str, content: &str) -> Document {
        let document = Document::new(name.into(), "txt".into(), content.into());
        db.store_item(document.clone())
            .await
            .expect("Failed to store document");
        document
    }

    #[tokio::test]
    async fn ranks_matching_chunks_first() {
        let db = setup_db().await;
        let relevant = store_document(
            &db,
            "stop.txt",
            "Порядок остановки транспортного средства сотрудником.",
        )
        .await;
        store_document(&db, "other.txt", "Общие положения о регистрации.").await;

        let retrieved = find_relevant_chunks(&db, "порядок остановки", 8, 3000)
            .await
            .expect("retrieval failed");

        assert_eq!(retrieved.document_ids, vec![relevant.id]);
        assert!(retrieved.content.contains("остановки"));
    }

    #[tokio::test]
    async fn no_keyword_query_returns_earliest_content() {
        let db = setup_db().await;
        store_document(&db, "a.txt", "Первый документ.").await;
        store_document(&db, "b.txt", "Второй документ.").await;

        // every token is a stop word or too short
        let retrieved = find_relevant_chunks(&db, "что как где", 8, 3000)
            .await
            .expect("retrieval failed");

        assert_eq!(retrieved.document_ids.len(), 2);
        assert!(retrieved.content.contains(CHUNK_SEPARATOR.trim_matches('\n')));
    }

    #[tokio::test]
    async fn unmatched_keywords_fall_back_to_at_most_three_chunks() {
        let db = setup_db().await;
        let paragraphs: Vec<String> = (0..6)
            .map(|i| format!("Раздел номер {i} про регистрацию транспорта.").repeat(40))
            .collect();
        store_document(&db, "big.txt", &paragraphs.join("\n\n")).await;

        // keywords survive filtering but match no chunk
        let retrieved = find_relevant_chunks(&db, "который час", 8, 100_000)
            .await
            .expect("retrieval failed");

        let chunk_count = retrieved.content.split(CHUNK_SEPARATOR).count();
        assert!(chunk_count <= 3, "stronger fallback must cap at 3 chunks");
        assert!(!retrieved.content.is_empty(), "fallback never returns nothing");
        assert_eq!(retrieved.document_ids.len(), 1);
    }

    #[tokio::test]
    async fn context_is_truncated_to_the_token_budget() {
        let db = setup_db().await;
        let body = "Очень длинный раздел правил дорожного движения. ".repeat(200);
        store_document(&db, "long.txt", &body).await;

        let retrieved = find_relevant_chunks(&db, "правил дорожного", 8, 100)
            .await
            .expect("retrieval failed");

        assert!(context::estimate_tokens(&retrieved.content) <= 100);
    }

    #[tokio::test]
    async fn document_ids_are_deduplicated_in_first_appearance_order() {
        let db = setup_db().await;
        // long enough to produce several chunks from one document
        let body = (0..5)
            .map(|i| format!("Пункт {i}: правила остановки и стоянки.").repeat(60))
            .collect::<Vec<_>>()
            .join("\n\n");
        let document = store_document(&db, "rules.txt", &body).await;

        let retrieved = find_relevant_chunks(&db, "правила остановки", 8, 100_000)
            .await
            .expect("retrieval failed");

        assert_eq!(retrieved.document_ids, vec![document.id]);
        assert!(retrieved.content.split(CHUNK_SEPARATOR).count() > 1);
    }
}
