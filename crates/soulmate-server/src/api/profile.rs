use crate::api::{ApiError, ApiResponse, ApiResult, state::AppState};
use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use soulmate_core::models::{AuthContext, ProfileUpdate, ProfileView};
use soulmate_core::services::profile;

// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> ApiResult<ProfileView> {
    let view = profile::get_profile(&state.core, &context.user_id).await?;
    Ok(Json(ApiResponse::ok(view)))
}

// PUT /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(update): Json<ProfileUpdate>,
) -> ApiResult<ProfileView> {
    let view = profile::save_profile(&state.core, &context.user_id, update).await?;
    Ok(Json(ApiResponse::ok_with_message(view, "Profile saved")))
}

// PUT /api/profile/avatar
pub async fn upload_avatar(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<ProfileView> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let view =
        profile::upload_avatar(&state.core, &context.user_id, content_type, body.to_vec()).await?;
    Ok(Json(ApiResponse::ok(view)))
}

// GET /api/public/avatars/{user_id}
pub async fn get_avatar(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, ApiError> {
    let blob = profile::get_avatar(&state.core, &user_id).await?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, blob.content_type),
            (header::CACHE_CONTROL, "public, max-age=31536000".to_string()),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
            (
                header::CONTENT_SECURITY_POLICY,
                "default-src 'none'; sandbox".to_string(),
            ),
        ],
        blob.data,
    )
        .into_response())
}
