use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use soulmate_core::models::AuthContext;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::api::{ApiError, state::AppState};

/// Sliding-window limiter keyed by user id.
#[derive(Clone)]
pub struct RateLimiter {
    state: Arc<Mutex<RateLimitState>>,
}

struct RateLimitState {
    limit: u64,
    window: Duration,
    hits: HashMap<String, VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(limit_per_minute: Option<u64>) -> Option<Self> {
        limit_per_minute
            .filter(|limit| *limit > 0)
            .map(|limit| Self::with_window(limit, Duration::from_secs(60)))
    }

    fn with_window(limit: u64, window: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(RateLimitState {
                limit,
                window,
                hits: HashMap::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RateLimitState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn allow(&self, key: &str) -> bool {
        let mut state = self.lock();
        let now = Instant::now();
        let window = state.window;
        let limit = state.limit;

        // Forget users whose whole window has expired
        state
            .hits
            .retain(|_, hits| hits.back().is_some_and(|last| now.duration_since(*last) <= window));

        let hits = state.hits.entry(key.to_string()).or_default();
        while let Some(front) = hits.front() {
            if now.duration_since(*front) > window {
                hits.pop_front();
            } else {
                break;
            }
        }

        if hits.len() as u64 >= limit {
            return false;
        }

        hits.push_back(now);
        true
    }
}

pub async fn rate_limit_middleware(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if let Some(limiter) = &state.send_limiter
        && let Some(context) = req.extensions().get::<AuthContext>()
        && !limiter.allow(&context.user_id)
    {
        tracing::debug!(user_id = %context.user_id, "Rate limit exceeded");
        return ApiError::new(StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded").into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_per_user() {
        let limiter = RateLimiter::new(Some(2)).unwrap();
        assert!(limiter.allow("a"));
        assert!(limiter.allow("a"));
        assert!(!limiter.allow("a"));
        assert!(limiter.allow("b"));
    }

    #[test]
    fn test_window_expires() {
        let limiter = RateLimiter::with_window(1, Duration::from_millis(20));
        assert!(limiter.allow("a"));
        assert!(!limiter.allow("a"));
        std::thread::sleep(Duration::from_millis(40));
        assert!(limiter.allow("a"));
    }

    #[test]
    fn test_zero_or_missing_limit_disables() {
        assert!(RateLimiter::new(None).is_none());
        assert!(RateLimiter::new(Some(0)).is_none());
    }
}
