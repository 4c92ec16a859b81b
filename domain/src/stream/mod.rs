//! Streaming normalization primitives.
//!
//! Upstream lines flow through these stages, in order:
//!
//! 1. [`chunk::classify_line`]: decide the shape of one upstream line
//! 2. [`segmenter::TextSegmenter`]: regroup text fragments at stable boundaries
//! 3. [`modality::ModalityRouter`]: decide whether a segment is shown as text
//! 4. [`event::OutputEvent`]: the client-facing unit handed to the emitter
//!
//! All of these are plain synchronous values owned by one session.

pub mod chunk;
pub mod event;
pub mod modality;
pub mod segmenter;
pub mod words;
