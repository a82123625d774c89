// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Halcyon workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Opaque identifier for a user, generated client-side on first launch.
///
/// The stored form follows the `user_<unix-millis>` pattern, but the type
/// treats the content as opaque: the backend is the only party that
/// interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who authored a chat message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the transient chat transcript.
///
/// Held in memory for the active session only; the client never persists
/// messages locally. The mood/intensity/crisis annotations are whatever the
/// backend attached to the reply, passed through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    /// RFC 3339 timestamp string.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<u8>,
    #[serde(default)]
    pub crisis: bool,
}

impl ChatMessage {
    /// A plain message with no mood annotations.
    pub fn new(role: Role, text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: timestamp.into(),
            mood: None,
            intensity: None,
            crisis: false,
        }
    }
}

/// The locally owned user identity: the one durable piece of client state.
///
/// Loaded once at startup and passed explicitly to every component that
/// needs it; there is deliberately no global user context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn user_id_serializes_as_bare_string() {
        let id = UserId("user_1700000000000".into());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""user_1700000000000""#);

        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn role_round_trips_through_display_and_fromstr() {
        for role in [Role::User, Role::Assistant] {
            let s = role.to_string();
            let parsed = Role::from_str(&s).expect("should parse back");
            assert_eq!(role, parsed);
        }
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn role_serde_uses_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, r#""assistant""#);
        let back: Role = serde_json::from_str(r#""user""#).unwrap();
        assert_eq!(back, Role::User);
    }

    #[test]
    fn chat_message_defaults_to_no_annotations() {
        let msg = ChatMessage::new(Role::User, "hello", "2026-01-01T00:00:00Z");
        assert!(msg.mood.is_none());
        assert!(msg.intensity.is_none());
        assert!(!msg.crisis);
    }

    #[test]
    fn chat_message_deserializes_without_optional_fields() {
        let json = r#"{"role": "assistant", "text": "hi", "timestamp": "2026-01-01T00:00:00Z"}"#;
        let msg: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.role, Role::Assistant);
        assert!(!msg.crisis);
    }
}
