use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{Method, header},
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use soulmate_core::services::profile::MAX_AVATAR_BYTES;
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use crate::api::{auth, chat, history, profile, state::AppState, themes};
use crate::middleware::{auth_middleware, rate_limit_middleware};

#[derive(serde::Serialize)]
struct Health {
    status: String,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "soulmate is working!".to_string(),
    })
}

/// Assemble every route with its middleware.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let mut app = Router::new()
        .route("/health", get(health))
        // Public endpoints
        .route("/api/public/auth/signup", post(auth::sign_up))
        .route("/api/public/auth/signin", post(auth::sign_in))
        .route("/api/public/avatars/{user_id}", get(profile::get_avatar))
        // Session
        .route("/api/auth/session", get(auth::get_session))
        .route("/api/auth/signout", post(auth::sign_out))
        .route("/api/auth/session/restart", post(auth::restart_session))
        // Themes and approaches
        .route("/api/themes", get(themes::list_themes))
        .route("/api/themes/{id}", get(themes::get_theme))
        .route("/api/approaches", get(themes::list_approaches))
        // Conversation
        .route(
            "/api/chat/{theme_id}/messages",
            get(chat::list_messages).merge(
                post(chat::send_message)
                    .layer(from_fn_with_state(state.clone(), rate_limit_middleware)),
            ),
        )
        .route("/api/history", get(history::list_history))
        // Profile
        .route(
            "/api/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route(
            "/api/profile/avatar",
            put(profile::upload_avatar).layer(DefaultBodyLimit::max(MAX_AVATAR_BYTES + 64 * 1024)),
        );

    if let Some(dir) = static_dir {
        let index = dir.join("index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    app.layer(from_fn_with_state(state.clone(), auth_middleware))
        .layer(cors)
        .with_state(state)
}
