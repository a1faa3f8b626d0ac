//! Chat messages exchanged between a user and the assistant.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Who authored a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum MessageRole {
    User,
    Assistant,
}

/// A stored chat message.
///
/// `created_at` is milliseconds since the Unix epoch.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct Message {
    pub id: String,
    #[ts(type = "number")]
    pub created_at: i64,
    pub user_id: String,
    pub content: String,
    pub role: MessageRole,
    pub theme_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub approach_id: Option<String>,
}

impl Message {
    pub fn new(
        user_id: impl Into<String>,
        role: MessageRole,
        content: impl Into<String>,
        theme_id: impl Into<String>,
        approach_id: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().timestamp_millis(),
            user_id: user_id.into(),
            content: content.into(),
            role,
            theme_id: theme_id.into(),
            approach_id,
        }
    }

    pub fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == MessageRole::Assistant
    }

    /// Convert into the completion API's message shape.
    pub fn to_llm_message(&self) -> soulmate_ai::Message {
        match self.role {
            MessageRole::User => soulmate_ai::Message::user(self.content.clone()),
            MessageRole::Assistant => soulmate_ai::Message::assistant(self.content.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MessageRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&MessageRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn test_missing_approach_is_omitted() {
        let message = Message::new("u-1", MessageRole::User, "hi", "t-1", None);
        let json = serde_json::to_value(&message).unwrap();
        assert!(json.get("approach_id").is_none());

        let parsed: Message = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.approach_id, None);
    }

    #[test]
    fn test_to_llm_message_keeps_role() {
        let message = Message::new("u-1", MessageRole::Assistant, "reply", "t-1", None);
        let converted = message.to_llm_message();
        assert_eq!(converted.role, soulmate_ai::Role::Assistant);
        assert_eq!(converted.content, "reply");
    }
}
