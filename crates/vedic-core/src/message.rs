//! Conversation messages exchanged with the host.

use crate::chart::PlanetaryPosition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Planetary,
    Remedy,
}

/// Which component produced an AI message, so the host can disclose fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "Deterministic System")]
    Deterministic,
    #[serde(rename = "Hugging Face Vedic AI")]
    HuggingFace,
    #[serde(rename = "OpenAI")]
    OpenAi,
    #[serde(rename = "Vedic Astrology Backend")]
    Backend,
}

impl Source {
    pub fn label(self) -> &'static str {
        match self {
            Self::Deterministic => "Deterministic System",
            Self::HuggingFace => "Hugging Face Vedic AI",
            Self::OpenAi => "OpenAI",
            Self::Backend => "Vedic Astrology Backend",
        }
    }

    pub fn is_fallback(self) -> bool {
        self == Self::Deterministic
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry in the append-only conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<MessageType>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub planetary_data: Option<Vec<PlanetaryPosition>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source: Option<Source>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            kind: None,
            planetary_data: None,
            source: None,
        }
    }

    pub fn ai(content: impl Into<String>, source: Source) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            sender: Sender::Ai,
            timestamp: Utc::now(),
            kind: Some(MessageType::Text),
            planetary_data: None,
            source: Some(source),
        }
    }

    pub fn with_kind(mut self, kind: MessageType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_planetary_data(mut self, planets: Vec<PlanetaryPosition>) -> Self {
        self.planetary_data = Some(planets);
        self
    }
}
