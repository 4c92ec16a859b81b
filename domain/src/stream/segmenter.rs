//! Text re-segmentation.
//!
//! Upstream granularity is unpredictable (per token, per sentence, or whole
//! answers), so fragments are held in a [`TextBuffer`] until a sentence ends
//! or enough words have accumulated, then released as one segment.
//! Everything seen is also kept in [`AggregatedText`] for speech synthesis
//! once the stream is over.

/// Default word count that forces a flush.
pub const DEFAULT_FLUSH_WORD_THRESHOLD: usize = 12;

/// Characters that end a sentence and force a flush.
const SENTENCE_TERMINALS: [char; 3] = ['.', '!', '?'];

/// Pending fragments plus their running word count.
#[derive(Debug, Default, Clone)]
pub struct TextBuffer {
    fragments: Vec<String>,
    word_count: usize,
}

impl TextBuffer {
    pub fn push(&mut self, fragment: &str) {
        self.word_count += fragment.split_whitespace().count();
        self.fragments.push(fragment.to_string());
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Join fragments with single spaces and clear the buffer.
    pub fn drain(&mut self) -> String {
        let joined = self.fragments.join(" ");
        self.fragments.clear();
        self.word_count = 0;
        joined
    }
}

/// Concatenation of every fragment seen in a session.
#[derive(Debug, Default, Clone)]
pub struct AggregatedText {
    parts: Vec<String>,
}

impl AggregatedText {
    pub fn push(&mut self, fragment: &str) {
        self.parts.push(fragment.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|p| p.trim().is_empty())
    }

    /// All fragments joined with single spaces, trimmed.
    pub fn text(&self) -> String {
        self.parts.join(" ").trim().to_string()
    }
}

/// Per-session re-segmenter.
#[derive(Debug, Clone)]
pub struct TextSegmenter {
    flush_word_threshold: usize,
    buffer: TextBuffer,
    aggregated: AggregatedText,
}

impl Default for TextSegmenter {
    fn default() -> Self {
        Self::new(DEFAULT_FLUSH_WORD_THRESHOLD)
    }
}

impl TextSegmenter {
    /// A threshold of zero is treated as one.
    pub fn new(flush_word_threshold: usize) -> Self {
        Self {
            flush_word_threshold: flush_word_threshold.max(1),
            buffer: TextBuffer::default(),
            aggregated: AggregatedText::default(),
        }
    }

    /// Buffer a fragment and return a segment if a flush condition fired.
    ///
    /// Returns `None` while the fragment is held back.
    pub fn append(&mut self, fragment: &str) -> Option<String> {
        self.buffer.push(fragment);
        self.aggregated.push(fragment);

        let ends_sentence = fragment.contains(SENTENCE_TERMINALS);
        if ends_sentence || self.buffer.word_count() >= self.flush_word_threshold {
            Some(self.buffer.drain())
        } else {
            None
        }
    }

    /// Flush whatever is still buffered at end of stream.
    ///
    /// Returns `None` when nothing (or only whitespace) is pending.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let rest = self.buffer.drain();
        if rest.trim().is_empty() { None } else { Some(rest) }
    }

    /// Drop buffered fragments without emitting them. They remain in the
    /// aggregated text.
    pub fn discard_pending(&mut self) {
        self.buffer.drain();
    }

    pub fn has_pending(&self) -> bool {
        !self.buffer.is_empty()
    }

    pub fn pending_words(&self) -> usize {
        self.buffer.word_count()
    }

    pub fn aggregated(&self) -> &AggregatedText {
        &self.aggregated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squash(s: &str) -> String {
        s.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn word_threshold_flushes_without_punctuation() {
        let mut segmenter = TextSegmenter::default();
        let words: Vec<String> = (1..=13).map(|i| format!("w{}", i)).collect();

        let flushed: Vec<String> = words.iter().filter_map(|w| segmenter.append(w)).collect();

        assert_eq!(flushed.len(), 1);
        assert_eq!(flushed[0].split_whitespace().count(), 12);
        assert_eq!(flushed[0], words[..12].join(" "));
        assert!(segmenter.has_pending());
        assert_eq!(segmenter.pending_words(), 1);
    }

    #[test]
    fn terminal_punctuation_flushes_immediately() {
        let mut segmenter = TextSegmenter::default();
        assert_eq!(segmenter.append("It works."), Some("It works.".to_string()));
        assert!(!segmenter.has_pending());

        assert_eq!(segmenter.append("Really"), None);
        assert_eq!(segmenter.append("?"), Some("Really ?".to_string()));
        assert_eq!(segmenter.append("Yes!"), Some("Yes!".to_string()));
    }

    #[test]
    fn finish_flushes_remainder_once() {
        let mut segmenter = TextSegmenter::default();
        assert_eq!(segmenter.append("trailing"), None);
        assert_eq!(segmenter.append("words"), None);
        assert_eq!(segmenter.finish(), Some("trailing words".to_string()));
        assert_eq!(segmenter.finish(), None);
    }

    #[test]
    fn finish_ignores_whitespace_only_remainder() {
        let mut segmenter = TextSegmenter::default();
        segmenter.append("  ");
        assert_eq!(segmenter.finish(), None);
    }

    #[test]
    fn no_characters_are_lost_across_buffering() {
        let fragments = [
            "The", " quick", " brown fox", " jumps.", " Over", " the lazy", " dog", " and",
            " then", " some", " more", " words", " without", " an", " end",
        ];
        let mut segmenter = TextSegmenter::new(4);
        let mut emitted: Vec<String> = fragments
            .iter()
            .filter_map(|f| segmenter.append(f))
            .collect();
        emitted.extend(segmenter.finish());

        assert_eq!(squash(&emitted.join(" ")), squash(&fragments.concat()));
    }

    #[test]
    fn aggregated_keeps_discarded_fragments() {
        let mut segmenter = TextSegmenter::default();
        segmenter.append("Hello there.");
        segmenter.append("pending");
        segmenter.discard_pending();
        assert!(!segmenter.has_pending());
        assert_eq!(segmenter.aggregated().text(), "Hello there. pending");
        assert!(!segmenter.aggregated().is_empty());
    }

    #[test]
    fn zero_threshold_is_clamped() {
        let mut segmenter = TextSegmenter::new(0);
        assert_eq!(segmenter.append("one"), Some("one".to_string()));
    }
}
