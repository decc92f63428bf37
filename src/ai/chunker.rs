//! Sentence-boundary chunking for long inputs.

/// Sentence delimiter used for splitting. Kept on the end of each sentence.
pub const SENTENCE_DELIMITER: &str = ". ";

/// Split `text` into chunks of fewer than `max_chars` characters, breaking
/// only after a `". "` delimiter.
///
/// Sentences are accumulated in order; the running chunk is emitted as soon as
/// the next sentence would bring it to `max_chars` or beyond. A sentence that
/// is longer than `max_chars` on its own becomes a single oversized chunk.
/// Concatenating the result yields `text` unchanged.
#[must_use]
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for sentence in text.split_inclusive(SENTENCE_DELIMITER) {
        let sentence_len = sentence.chars().count();
        if !current.is_empty() && current_len + sentence_len >= max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push_str(sentence);
        current_len += sentence_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
