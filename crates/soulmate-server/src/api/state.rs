use soulmate_ai::LlmClient;
use soulmate_core::AppCore;
use std::sync::Arc;

use crate::middleware::RateLimiter;

/// Application state shared across all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub core: Arc<AppCore>,
    pub llm: Arc<dyn LlmClient>,
    /// Guards the message-send route; `None` disables limiting.
    pub send_limiter: Option<RateLimiter>,
}
