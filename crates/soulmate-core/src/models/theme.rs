//! Conversation themes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A predefined conversation topic; its name and description shape the
/// assistant's system prompt.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub description: String,
    #[ts(type = "number")]
    pub created_at: i64,
}

impl Theme {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DefaultTheme {
    id: String,
    name: String,
    description: String,
}

/// Built-in themes shipped with the service.
const DEFAULT_THEMES: &str = include_str!("../../assets/default_themes.json");

/// Parse the built-in theme list, stamping every theme with the current time.
pub fn default_themes() -> anyhow::Result<Vec<Theme>> {
    let defaults: Vec<DefaultTheme> = serde_json::from_str(DEFAULT_THEMES)?;
    Ok(defaults
        .into_iter()
        .map(|t| Theme::new(t.id, t.name, t.description))
        .collect())
}
