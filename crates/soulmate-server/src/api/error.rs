use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use soulmate_core::SoulmateError;

use super::ApiResponse;

/// Service error rendered as an enveloped JSON response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<SoulmateError> for ApiError {
    fn from(error: SoulmateError) -> Self {
        match error {
            SoulmateError::Validation(e) => Self::new(StatusCode::BAD_REQUEST, e.to_string()),
            SoulmateError::Unauthorized(reason) => {
                tracing::debug!(reason = %reason, "Unauthorized request");
                Self::unauthorized()
            }
            SoulmateError::NotFound(what) => {
                Self::new(StatusCode::NOT_FOUND, format!("{} not found", what))
            }
            SoulmateError::Conflict(message) => Self::new(StatusCode::CONFLICT, message),
            SoulmateError::PayloadTooLarge(message) => {
                Self::new(StatusCode::PAYLOAD_TOO_LARGE, message)
            }
            SoulmateError::Upstream(e) => {
                tracing::error!(error = %e, "Completion API failed");
                Self::new(
                    StatusCode::BAD_GATEWAY,
                    "The assistant is unavailable, please try again",
                )
            }
            SoulmateError::Storage(e) => {
                tracing::error!(error = ?e, "Internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ApiResponse::<()>::error(self.message))).into_response()
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use soulmate_ai::AiError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (SoulmateError::validation("f", "bad"), StatusCode::BAD_REQUEST),
            (SoulmateError::unauthorized("x"), StatusCode::UNAUTHORIZED),
            (SoulmateError::not_found("Theme t"), StatusCode::NOT_FOUND),
            (SoulmateError::Conflict("dup".into()), StatusCode::CONFLICT),
            (
                SoulmateError::PayloadTooLarge("big".into()),
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (
                SoulmateError::Upstream(AiError::Llm("down".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                SoulmateError::Storage(anyhow::anyhow!("disk")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status(), status);
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let error = ApiError::from(SoulmateError::Storage(anyhow::anyhow!("redb exploded")));
        assert!(!error.message.contains("redb"));
    }
}
