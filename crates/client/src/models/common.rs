//! Common types shared across Splunk API models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of message from Splunk API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MessageType {
    #[serde(rename = "FATAL")]
    Fatal,
    #[serde(rename = "ERROR")]
    Error,
    #[serde(rename = "WARN")]
    Warn,
    #[serde(rename = "INFO")]
    Info,
    /// Unknown or unrecognized message type.
    #[serde(other)]
    #[default]
    Unknown,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fatal => write!(f, "FATAL"),
            Self::Error => write!(f, "ERROR"),
            Self::Warn => write!(f, "WARN"),
            Self::Info => write!(f, "INFO"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// A single message from Splunk (usually in error responses).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SplunkMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub text: String,
}

/// A collection of messages from Splunk.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SplunkMessages {
    pub messages: Vec<SplunkMessage>,
}

impl SplunkMessages {
    /// Render as `TYPE: text; TYPE: text`.
    pub fn summary(&self) -> String {
        self.messages
            .iter()
            .map(|msg| format!("{}: {}", msg.message_type, msg.text))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_deserialization() {
        let json = r#"{"messages":[{"type":"FATAL","text":"Unknown search command 'foo'."},{"type":"NOPE","text":"x"}]}"#;
        let msgs: SplunkMessages = serde_json::from_str(json).unwrap();
        assert_eq!(msgs.messages[0].message_type, MessageType::Fatal);
        assert_eq!(msgs.messages[1].message_type, MessageType::Unknown);
        assert_eq!(
            msgs.summary(),
            "FATAL: Unknown search command 'foo'.; UNKNOWN: x"
        );
    }
}
