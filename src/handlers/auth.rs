use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use crate::models::LoginForm;
use crate::services::UserStore;

#[axum::debug_handler]
pub async fn handle_login(
    State(store): State<UserStore>,
    Json(login_form): Json<LoginForm>,
) -> Response {
    tracing::info!("Login attempt for user: {}", login_form.username);

    if store
        .authenticate(&login_form.username, &login_form.password)
        .await
    {
        Json(json!({ "success": true })).into_response()
    } else {
        tracing::info!("Invalid credentials for user: {}", login_form.username);
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid credentials" })),
        ).into_response()
    }
}
