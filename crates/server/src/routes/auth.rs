use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use service::auth::Principal;
use tracing::info;

use crate::{errors::ApiError, state::AppState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct LoginQuery {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub message: String,
    pub username: String,
}

#[utoipa::path(
    post, path = "/auth/login", tag = "auth",
    params(LoginQuery),
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Invalid credentials", body = crate::errors::ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    query: Result<Query<LoginQuery>, QueryRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Query(q) = query?;
    let result = state.auth.login(q.username.trim(), &q.password).await?;
    info!(username = %result.username, "token issued");
    Ok(Json(LoginResponse {
        token: result.token,
        message: "Login successful".into(),
        username: result.username,
    }))
}

#[utoipa::path(get, path = "/auth/test", tag = "auth", responses((status = 200, description = "Reports the resolved principal, if any")))]
pub async fn test(principal: Option<Extension<Principal>>) -> Json<serde_json::Value> {
    match principal {
        Some(Extension(p)) => Json(serde_json::json!({
            "message": "Authentication test endpoint",
            "authenticated": true,
            "username": p.username,
            "authorities": p.authorities,
        })),
        None => Json(serde_json::json!({
            "message": "Authentication test endpoint",
            "authenticated": false,
        })),
    }
}

#[utoipa::path(
    get, path = "/auth/admin-test", tag = "auth",
    responses(
        (status = 200, description = "Admin greeting"),
        (status = 401, description = "No token"),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn admin_test(Extension(p): Extension<Principal>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": format!("Hello admin {}!", p.username),
        "username": p.username,
        "authorities": p.authorities,
    }))
}
