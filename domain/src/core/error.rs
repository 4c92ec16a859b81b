//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No user message found")]
    NoUserMessage,

    #[error("No usable user text after speech-to-text")]
    EmptyUserText,
}
