//! Fixed-size word grouping, used when a complete answer has to be
//! replayed as a stream.

/// Default words per group for replayed answers.
pub const DEFAULT_WORDS_PER_CHUNK: usize = 6;

/// Split `text` on whitespace into groups of `words_per_chunk` words.
///
/// A size of zero is treated as one.
pub fn chunk_by_words(text: &str, words_per_chunk: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(words_per_chunk.max(1))
        .map(|group| group.join(" "))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_of_six() {
        let text = "one two three four five six seven eight";
        assert_eq!(
            chunk_by_words(text, DEFAULT_WORDS_PER_CHUNK),
            vec!["one two three four five six", "seven eight"]
        );
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(chunk_by_words("", 6).is_empty());
        assert!(chunk_by_words("   \n ", 6).is_empty());
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(chunk_by_words("a\n\nb   c", 2), vec!["a b", "c"]);
    }
}
