//! Shared utility functions.

use std::borrow::Cow;

/// Shorten text for log lines to at most `max_chars` characters, appending
/// `…` when something was cut.
pub fn log_preview(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => Cow::Owned(format!("{}…", &text[..cut])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_borrowed() {
        assert!(matches!(log_preview("hi", 10), Cow::Borrowed("hi")));
    }

    #[test]
    fn long_text_is_cut_on_char_boundary() {
        assert_eq!(log_preview("hello world", 5), "hello…");
        assert_eq!(log_preview("あのね", 2), "あの…");
    }

    #[test]
    fn exact_length_is_untouched() {
        assert_eq!(log_preview("あのね", 3), "あのね");
        assert_eq!(log_preview("", 0), "");
    }
}
