//! Non-streaming chat completion body.
//!
//! Clients of the non-streaming path expect exactly one OpenAI-style choice
//! and nothing else, so these types carry no optional fields.

use serde::{Deserialize, Serialize};

pub const COMPLETION_OBJECT: &str = "chat.completion";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletion {
    pub object: String,
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionChoice {
    pub index: u32,
    pub message: AssistantMessage,
    pub finish_reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantMessage {
    pub role: String,
    pub content: String,
}

impl ChatCompletion {
    /// Wrap a final answer as a single `stop` choice.
    pub fn from_answer(answer: impl Into<String>) -> Self {
        Self {
            object: COMPLETION_OBJECT.to_string(),
            choices: vec![CompletionChoice {
                index: 0,
                message: AssistantMessage {
                    role: "assistant".to_string(),
                    content: answer.into(),
                },
                finish_reason: "stop".to_string(),
            }],
        }
    }
}
