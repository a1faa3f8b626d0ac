//! Grouping a user's message log into conversation sessions.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::models::{HistorySession, HistorySessionView, Message};
use crate::settings::HistorySettings;
use crate::{AppCore, Result};

/// Theme name shown when a message points at a theme that no longer exists.
pub const UNKNOWN_THEME_NAME: &str = "不明なテーマ";

/// Partition messages into sessions.
///
/// A new session starts on the first message, whenever the theme differs
/// from the previous message, or when more than `settings` gap has passed
/// since the previous message. Sessions come back newest first.
pub fn group_sessions(
    mut messages: Vec<Message>,
    theme_names: &HashMap<String, String>,
    settings: &HistorySettings,
) -> Vec<HistorySession> {
    messages.sort_by_key(|m| m.created_at);

    let gap_ms = settings.session_gap_ms();
    let offset = display_offset(settings.utc_offset_minutes);

    let mut sessions: Vec<HistorySession> = Vec::new();
    let mut last: Option<(String, i64)> = None;

    for message in messages {
        let starts_session = match &last {
            None => true,
            Some((theme_id, at)) => {
                *theme_id != message.theme_id || message.created_at - at > gap_ms
            }
        };
        last = Some((message.theme_id.clone(), message.created_at));

        if starts_session {
            let date = format_date(message.created_at, &offset);
            sessions.push(HistorySession {
                session_id: format!("{}_{}_{}", date, message.theme_id, message.created_at),
                date,
                theme_id: message.theme_id.clone(),
                theme_name: theme_names
                    .get(&message.theme_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_THEME_NAME.to_string()),
                started_at: message.created_at,
                messages: Vec::new(),
            });
        }

        if let Some(current) = sessions.last_mut() {
            current.messages.push(message);
        }
    }

    sessions.reverse();
    sessions
}

/// Load and group every message the user has sent or received.
pub async fn load_history(core: &Arc<AppCore>, user_id: &str) -> Result<Vec<HistorySessionView>> {
    let messages = core
        .storage
        .messages
        .list_by_user(user_id)
        .with_context(|| format!("Failed to load messages for user {}", user_id))?;
    let theme_names = core
        .storage
        .themes
        .list()
        .context("Failed to list themes")?
        .into_iter()
        .map(|theme| (theme.id, theme.name))
        .collect::<HashMap<_, _>>();

    let sessions = group_sessions(messages, &theme_names, &core.settings.history);
    tracing::debug!(user_id, sessions = sessions.len(), "History grouped");

    Ok(sessions.into_iter().map(HistorySessionView::from).collect())
}

fn display_offset(offset_minutes: i32) -> FixedOffset {
    offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| {
            tracing::warn!(offset_minutes, "Invalid display offset, using UTC");
            Utc.fix()
        })
}

fn format_date(timestamp_ms: i64, offset: &FixedOffset) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.with_timezone(offset).format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
