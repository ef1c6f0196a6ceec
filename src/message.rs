use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Chat message classification as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    General,
    RollResult,
    GmRollResult,
    Emote,
    Whisper,
    Desc,
    /// Messages sent as API commands. Only these are ever routed.
    Api,
}

impl Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MessageType::General => "general",
            MessageType::RollResult => "rollresult",
            MessageType::GmRollResult => "gmrollresult",
            MessageType::Emote => "emote",
            MessageType::Whisper => "whisper",
            MessageType::Desc => "desc",
            MessageType::Api => "api",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub content: String,
}

impl Message {
    pub fn new(kind: MessageType, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    pub fn api(content: impl Into<String>) -> Self {
        Self::new(MessageType::Api, content)
    }

    pub fn general(content: impl Into<String>) -> Self {
        Self::new(MessageType::General, content)
    }
}
