use crate::api::{ApiResponse, ApiResult, state::AppState};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use soulmate_core::models::{AuthContext, Message};
use soulmate_core::services::chat::{self, ConversationScope};

#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    #[serde(default)]
    pub approach_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
    #[serde(default)]
    pub approach_id: Option<String>,
}

fn scope(context: &AuthContext, theme_id: String, approach_id: Option<String>) -> ConversationScope {
    ConversationScope {
        user_id: context.user_id.clone(),
        session_started_at: context.session_started_at,
        theme_id,
        approach_id: approach_id.filter(|id| !id.is_empty()),
    }
}

// GET /api/chat/{theme_id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(theme_id): Path<String>,
    Query(query): Query<ConversationQuery>,
) -> ApiResult<Vec<Message>> {
    let scope = scope(&context, theme_id, query.approach_id);
    let messages = chat::load_conversation(&state.core, &scope).await?;
    Ok(Json(ApiResponse::ok(messages)))
}

// POST /api/chat/{theme_id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(theme_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> ApiResult<Vec<Message>> {
    let scope = scope(&context, theme_id, request.approach_id);
    let messages =
        chat::send_message(&state.core, state.llm.as_ref(), &scope, &request.content).await?;
    Ok(Json(ApiResponse::ok(messages)))
}
