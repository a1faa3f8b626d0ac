use crate::api::{ApiResponse, ApiResult, state::AppState};
use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::Deserialize;
use soulmate_core::models::{AuthContext, SessionInfo, SignInResponse, UserInfo};
use soulmate_core::services::auth;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub password_confirmation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

// POST /api/public/auth/signup
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfo>>), crate::api::ApiError> {
    let user = auth::sign_up(
        &state.core,
        &request.email,
        &request.password,
        request.password_confirmation.as_deref(),
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(user, "Account created")),
    ))
}

// POST /api/public/auth/signin
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> ApiResult<SignInResponse> {
    let response = auth::sign_in(&state.core, &request.email, &request.password).await?;
    Ok(Json(ApiResponse::ok(response)))
}

// GET /api/auth/session
pub async fn get_session(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> ApiResult<SessionInfo> {
    let session = auth::current_session(&state.core, &context.session_id).await?;
    Ok(Json(ApiResponse::ok(session)))
}

// POST /api/auth/signout
pub async fn sign_out(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> ApiResult<()> {
    auth::sign_out(&state.core, &context.session_id).await?;
    Ok(Json(ApiResponse::message("Signed out")))
}

// POST /api/auth/session/restart
pub async fn restart_session(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> ApiResult<SessionInfo> {
    let session = auth::restart_session(&state.core, &context.session_id).await?;
    Ok(Json(ApiResponse::ok(session)))
}
