use common::storage::types::document_chunk::DocumentChunk;

/// A candidate chunk together with its transient relevance score.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: DocumentChunk,
    pub score: usize,
}

/// Scores every candidate as the number of keywords occurring as substrings
/// of its lowercased content, dropping chunks without a single match.
///
/// This is a deliberate linear scan over the candidate set rather than an
/// inverted index; the ranking contract is score descending with ties broken
/// by (document id ascending, chunk index ascending).
pub fn score_chunks(chunks: &[DocumentChunk], keywords: &[String]) -> Vec<ScoredChunk> {
    let mut scored: Vec<ScoredChunk> = chunks
        .iter()
        .filter_map(|chunk| {
            let score = keywords
                .iter()
                .filter(|keyword| chunk.content_lower.contains(keyword.as_str()))
                .count();
            (score > 0).then(|| ScoredChunk {
                chunk: chunk.clone(),
                score,
            })
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.chunk.document_id.cmp(&b.chunk.document_id))
            .then_with(|| a.chunk.chunk_index.cmp(&b.chunk.chunk_index))
    });

    scored
}
