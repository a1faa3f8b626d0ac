use crate::api::{ApiResponse, ApiResult, state::AppState};
use axum::{
    Json,
    extract::{Path, State},
};
use soulmate_core::models::{Approach, Theme};
use soulmate_core::services::{approaches, themes};

// GET /api/themes
pub async fn list_themes(State(state): State<AppState>) -> ApiResult<Vec<Theme>> {
    Ok(Json(ApiResponse::ok(themes::list_themes(&state.core).await?)))
}

// GET /api/themes/{id}
pub async fn get_theme(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Theme> {
    Ok(Json(ApiResponse::ok(themes::get_theme(&state.core, &id).await?)))
}

// GET /api/approaches
pub async fn list_approaches(State(state): State<AppState>) -> ApiResult<Vec<Approach>> {
    Ok(Json(ApiResponse::ok(
        approaches::list_approaches(&state.core).await?,
    )))
}
