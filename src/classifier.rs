/// Leading words that mark an utterance as a question.
const QUESTION_WORDS: &[&str] = &["what", "who", "when", "where", "why", "how", "which"];

/// Returns true if the utterance looks like a question: it ends with `?` or
/// starts with one of [`QUESTION_WORDS`].
pub fn is_question(utterance: &str) -> bool {
    let normalized = utterance.trim().to_lowercase();
    if normalized.ends_with('?') {
        return true;
    }

    normalized
        .split_whitespace()
        .next()
        .is_some_and(|first| QUESTION_WORDS.contains(&first))
}
