use crate::api::{ApiResponse, ApiResult, state::AppState};
use axum::{Extension, Json, extract::State};
use soulmate_core::models::{AuthContext, HistorySessionView};
use soulmate_core::services::history;

// GET /api/history
pub async fn list_history(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> ApiResult<Vec<HistorySessionView>> {
    let sessions = history::load_history(&state.core, &context.user_id).await?;
    Ok(Json(ApiResponse::ok(sessions)))
}
