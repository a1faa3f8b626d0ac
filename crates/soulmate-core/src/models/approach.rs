use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Optional conversational style layered on top of a theme.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct Approach {
    pub id: String,
    pub name: String,
    pub description: String,
    #[ts(type = "number")]
    pub created_at: i64,
}

impl Approach {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
