use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use crate::errors::AppError;

// The IntoResponse trait implementation converts AppError into a well-formed HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Validation errors name the first missing field
            AppError::Validation(field) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": format!("{} is required.", field) })),
            ).into_response(),

            // Duplicate email on create
            AppError::Conflict => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Email already exists." })),
            ).into_response(),

            // Delete target absent
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "User not found." })),
            ).into_response(),

            // Everything else is a generic server error; detail stays in the log
            AppError::Storage(_) | AppError::Serialize(_) | AppError::Internal(_) => {
                tracing::error!("Request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Server error. Please try again later." })),
                ).into_response()
            }
        }
    }
}
