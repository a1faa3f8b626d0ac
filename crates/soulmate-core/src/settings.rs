//! Runtime knobs for the core services.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_SESSION_GAP_MINUTES: i64 = 30;
/// Japan Standard Time.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 9 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: uuid::Uuid::new_v4().to_string(),
            token_ttl_hours: 24 * 7,
        }
    }
}

impl AuthSettings {
    pub fn token_ttl_ms(&self) -> i64 {
        self.token_ttl_hours.saturating_mul(60 * 60 * 1000)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub session_gap_minutes: i64,
    pub utc_offset_minutes: i32,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            session_gap_minutes: DEFAULT_SESSION_GAP_MINUTES,
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}

impl HistorySettings {
    pub fn session_gap_ms(&self) -> i64 {
        self.session_gap_minutes.saturating_mul(60 * 1000)
    }
}

/// All service settings bundled together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreSettings {
    pub auth: AuthSettings,
    pub chat: ChatSettings,
    pub history: HistorySettings,
}
