use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};
use crate::errors::{AppError, AppResult};
use crate::models::User;
use crate::services::UserStore;

// Checked in this order; the first missing field is the one reported.
const REQUIRED_FIELDS: [&str; 4] = ["firstName", "email", "username", "password"];

pub async fn list_users(State(store): State<UserStore>) -> Json<Vec<User>> {
    Json(store.list().await)
}

#[axum::debug_handler]
pub async fn create_user(
    State(store): State<UserStore>,
    Json(body): Json<Value>,
) -> AppResult<Response> {
    for field in REQUIRED_FIELDS {
        if is_missing(body.get(field)) {
            return Err(AppError::Validation(field.to_string()));
        }
    }

    let user: User = serde_json::from_value(body)
        .map_err(|e| AppError::Internal(format!("Malformed user record: {}", e)))?;

    tracing::info!("Creating user: {}", user.email);
    store.create(user).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User added successfully." })),
    ).into_response())
}

#[axum::debug_handler]
pub async fn delete_user(
    State(store): State<UserStore>,
    Path(email): Path<String>,
) -> AppResult<Response> {
    tracing::info!("Deleting user: {}", email);
    store.delete(&email).await?;

    Ok(Json(json!({ "message": "User deleted successfully." })).into_response())
}

// A required field is missing when it is absent or falsy: null, empty
// string, false, or zero.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}
