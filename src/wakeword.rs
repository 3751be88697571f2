/// True only when the whole transcript is the wake word, ignoring case and
/// surrounding whitespace. "jarvis please" does not wake the assistant.
pub fn is_wake_word(transcript: &str, wake_word: &str) -> bool {
    let heard = transcript.trim().to_lowercase();
    !heard.is_empty() && heard == wake_word.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_ignoring_case() {
        assert!(is_wake_word("jarvis", "jarvis"));
        assert!(is_wake_word("  JARVIS ", "Jarvis"));
    }

    #[test]
    fn extra_words_do_not_wake() {
        assert!(!is_wake_word("jarvis please", "jarvis"));
        assert!(!is_wake_word("hey jarvis", "jarvis"));
    }

    #[test]
    fn blank_never_wakes() {
        assert!(!is_wake_word("", ""));
        assert!(!is_wake_word("   ", "jarvis"));
    }
}
