/// Splits a document into overlapping chunks aligned on paragraph
/// boundaries.
///
/// Paragraphs (blank-line separated) are accumulated into a buffer; once the
/// next paragraph would push the buffer past `chunk_size` characters the
/// buffer is emitted and the next one is seeded with the last `overlap / 5`
/// words of the emitted chunk, so neighbouring chunks share local context.
/// The `overlap / 5` word count is a heuristic; changing it shifts chunk
/// boundaries and therefore retrieval results.
///
/// A single paragraph longer than `chunk_size` is emitted whole rather than
/// split mid-paragraph.
pub fn split_into_chunks(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let paragraphs = text
        .split("\n\n")
        .map(|paragraph| paragraph.trim_matches('\n'))
        .filter(|paragraph| !paragraph.trim().is_empty());

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for paragraph in paragraphs {
        let current_len = current.chars().count();
        let paragraph_len = paragraph.chars().count();

        if current_len + paragraph_len > chunk_size && !current.is_empty() {
            let emitted = current.trim().to_string();
            let words: Vec<&str> = emitted.split_whitespace().collect();
            let keep = overlap / 5;
            let overlap_words = &words[words.len().saturating_sub(keep)..];

            current = if overlap_words.is_empty() {
                paragraph.to_string()
            } else {
                format!("{}\n\n{}", overlap_words.join(" "), paragraph)
            };
            chunks.push(emitted);
        } else if current.is_empty() {
            current = paragraph.to_string();
        } else {
            current.push_str("\n\n");
            current.push_str(paragraph);
        }
    }

    let last = current.trim();
    if !last.is_empty() {
        chunks.push(last.to_string());
    }

    chunks
}
