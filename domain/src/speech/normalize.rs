//! Text cleanup before speech synthesis.
//!
//! RAG answers are markdown-heavy. A speech engine would read `**`, `#`,
//! list bullets, LaTeX escapes and paths out loud, so those are replaced by
//! spaces and whitespace is collapsed.

use regex::Regex;
use std::sync::LazyLock;

/// Markdown emphasis, headings, quotes, code fences, links and list markers.
static MARKDOWN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*#`_>\[\]()\-]+").expect("valid markdown pattern"));

/// LaTeX-style escape characters.
static LATEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\\^{}$]").expect("valid latex pattern"));

/// Path-like slash runs.
static SLASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/+").expect("valid slash pattern"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Prepare text for a speech engine.
pub fn normalize_for_speech(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = MARKDOWN.replace_all(text, " ");
    let text = LATEX.replace_all(&text, " ");
    let text = SLASHES.replace_all(&text, " ");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}
