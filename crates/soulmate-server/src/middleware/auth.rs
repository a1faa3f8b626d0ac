use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use soulmate_core::services::auth;

use crate::api::{ApiError, state::AppState};

/// Resolve the bearer token and attach the caller's `AuthContext`.
///
/// Paths outside `/api` and everything under `/api/public` pass through.
pub async fn auth_middleware(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path();
    if !path.starts_with("/api") || path.starts_with("/api/public") {
        return next.run(req).await;
    }

    let Some(token) = extract_bearer(req.headers().get(axum::http::header::AUTHORIZATION)) else {
        return ApiError::unauthorized().into_response();
    };

    match auth::authenticate(&state.core, &token).await {
        Ok(context) => {
            req.extensions_mut().insert(context);
            next.run(req).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

fn extract_bearer(header: Option<&HeaderValue>) -> Option<String> {
    let value = header?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer() {
        let header = HeaderValue::from_static("Bearer abc.def");
        assert_eq!(extract_bearer(Some(&header)).as_deref(), Some("abc.def"));

        let lower = HeaderValue::from_static("bearer  xyz ");
        assert_eq!(extract_bearer(Some(&lower)).as_deref(), Some("xyz"));

        let basic = HeaderValue::from_static("Basic dXNlcg==");
        assert!(extract_bearer(Some(&basic)).is_none());
        assert!(extract_bearer(Some(&HeaderValue::from_static("Bearer "))).is_none());
        assert!(extract_bearer(None).is_none());
    }
}
