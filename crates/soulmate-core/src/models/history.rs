//! Grouped chat history.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::message::Message;

/// A run of messages sharing one theme without a long pause.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct HistorySession {
    /// `"{date}_{theme_id}_{started_at}"`
    pub session_id: String,
    /// Start date as `YYYY-MM-DD` in the display offset.
    pub date: String,
    pub theme_id: String,
    pub theme_name: String,
    #[ts(type = "number")]
    pub started_at: i64,
    pub messages: Vec<Message>,
}

/// A user message and the assistant reply that followed it, if any.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct Exchange {
    pub user_message: Message,
    pub reply: Option<Message>,
}

impl Exchange {
    /// Pair each user message with the first assistant message created
    /// strictly after it.
    pub fn pairs(messages: &[Message]) -> Vec<Exchange> {
        messages
            .iter()
            .filter(|m| m.is_user())
            .map(|user_message| Exchange {
                user_message: user_message.clone(),
                reply: messages
                    .iter()
                    .find(|m| m.is_assistant() && m.created_at > user_message.created_at)
                    .cloned(),
            })
            .collect()
    }
}

/// Session summary for the history screen.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct HistorySessionView {
    pub session_id: String,
    pub date: String,
    pub theme_id: String,
    pub theme_name: String,
    #[ts(type = "number")]
    pub timestamp: i64,
    pub exchanges: Vec<Exchange>,
    /// Exchanges beyond the first (the preview).
    #[ts(type = "number")]
    pub more_count: usize,
}

impl From<HistorySession> for HistorySessionView {
    fn from(session: HistorySession) -> Self {
        let exchanges = Exchange::pairs(&session.messages);
        let more_count = exchanges.len().saturating_sub(1);
        Self {
            session_id: session.session_id,
            date: session.date,
            theme_id: session.theme_id,
            theme_name: session.theme_name,
            timestamp: session.started_at,
            exchanges,
            more_count,
        }
    }
}
