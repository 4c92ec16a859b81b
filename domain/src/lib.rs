//! Domain layer for ragcast
//!
//! This crate contains the streaming normalization rules: how upstream lines
//! are classified, how text is re-segmented, which modality a segment goes
//! to, and what the client ultimately receives. It has no I/O.
//!
//! # Core Concepts
//!
//! - **Upstream chunk**: one line of backend output, classified into text,
//!   audio or unparsed text ([`UpstreamChunk`])
//! - **Segment**: buffered fragments released at a sentence end or a word
//!   threshold ([`TextSegmenter`])
//! - **Modality**: text and/or audio output requested by the client
//!   ([`Modalities`], [`ModalityRouter`])
//! - **Output event**: the wire-level unit, ending with exactly one
//!   terminal event ([`OutputEvent`])

pub mod chat;
pub mod core;
pub mod speech;
pub mod stream;
pub mod util;

// Re-export commonly used types
pub use chat::{
    answer::{extract_answer, primary_answer},
    completion::ChatCompletion,
    query::UpstreamQuery,
    request::{ChatMessage, ChatRequest, ContentPart, HistoryTurn, MessageContent, TypedPart},
};
pub use core::{
    error::DomainError,
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use speech::{AudioFormat, audio_units, normalize::normalize_for_speech};
pub use stream::{
    chunk::{UpstreamChunk, classify_line},
    event::{OutputEvent, StreamId},
    modality::{Modalities, Modality, ModalityRouter, TextWithAudioPolicy},
    segmenter::TextSegmenter,
    words::chunk_by_words,
};
