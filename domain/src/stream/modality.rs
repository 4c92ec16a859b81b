//! Output modalities and the routing policy for text segments.

use super::event::{OutputEvent, StreamId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An output channel a client can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Audio,
}

impl FromStr for Modality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Modality::Text),
            "audio" => Ok(Modality::Audio),
            other => Err(format!("unknown modality: {}", other)),
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modality::Text => f.write_str("text"),
            Modality::Audio => f.write_str("audio"),
        }
    }
}

/// The set of modalities requested for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modalities {
    text: bool,
    audio: bool,
}

impl Default for Modalities {
    fn default() -> Self {
        Self::text_only()
    }
}

impl Modalities {
    pub fn text_only() -> Self {
        Self {
            text: true,
            audio: false,
        }
    }

    pub fn audio_only() -> Self {
        Self {
            text: false,
            audio: true,
        }
    }

    pub fn text_and_audio() -> Self {
        Self {
            text: true,
            audio: true,
        }
    }

    /// Parse the client's modality list.
    ///
    /// Unknown names are ignored. An absent list, or one without any known
    /// modality, means text only.
    pub fn from_requested<S: AsRef<str>>(requested: Option<&[S]>) -> Self {
        let parsed: Vec<Modality> = requested
            .unwrap_or_default()
            .iter()
            .filter_map(|s| s.as_ref().parse().ok())
            .collect();
        if parsed.is_empty() {
            return Self::text_only();
        }
        Self {
            text: parsed.contains(&Modality::Text),
            audio: parsed.contains(&Modality::Audio),
        }
    }

    pub fn wants_text(&self) -> bool {
        self.text
    }

    pub fn wants_audio(&self) -> bool {
        self.audio
    }
}

/// What to do with live text when both text and audio are requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextWithAudioPolicy {
    /// Hold all text back and deliver it only as synthesized audio.
    #[default]
    Suppress,
    /// Stream text segments live and synthesize audio after the stream.
    Live,
}

impl FromStr for TextWithAudioPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "suppress" => Ok(TextWithAudioPolicy::Suppress),
            "live" => Ok(TextWithAudioPolicy::Live),
            other => Err(format!("unknown text_with_audio policy: {}", other)),
        }
    }
}

/// Decides per session whether finalized segments become text events.
#[derive(Debug, Clone, Copy)]
pub struct ModalityRouter {
    modalities: Modalities,
    policy: TextWithAudioPolicy,
}

impl ModalityRouter {
    pub fn new(modalities: Modalities, policy: TextWithAudioPolicy) -> Self {
        Self { modalities, policy }
    }

    /// Whether text segments are emitted as text events.
    pub fn emits_text(&self) -> bool {
        match (self.modalities.wants_text(), self.modalities.wants_audio()) {
            (true, false) => true,
            (true, true) => self.policy == TextWithAudioPolicy::Live,
            (false, _) => false,
        }
    }

    /// Whether the session ends with speech synthesis.
    pub fn synthesizes_audio(&self) -> bool {
        self.modalities.wants_audio()
    }

    /// Turn a finalized segment into a text event, or hold it back.
    pub fn route(&self, stream_id: &StreamId, segment: String) -> Option<OutputEvent> {
        if self.emits_text() && !segment.is_empty() {
            Some(OutputEvent::text(stream_id, segment))
        } else {
            None
        }
    }
}
