#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::FieldCipher;
use migration::{Migrator, MigratorTrait};
use serde_json::Value;
use server::AppState;
use service::auth::TokenService;
use tower::ServiceExt;

pub const ADMIN: (&str, &str) = ("admin", "admin-pass");
pub const USER: (&str, &str) = ("viewer", "viewer-pass");
const KEY: &[u8; 32] = b"0123456789abcdef0123456789abcdef";

/// Router over a fresh in-memory database with one admin and one plain user.
pub async fn build_app() -> anyhow::Result<Router> {
    let cfg = configs::DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = models::db::connect_with_config(&cfg).await?;
    Migrator::up(&db, None).await?;

    let state = AppState::new(db, Arc::new(FieldCipher::new(KEY)?), TokenService::new("test-secret", 1));
    state.auth.ensure_admin(ADMIN.0, ADMIN.1).await?;
    state.auth.create_user(USER.0, USER.1, models::user::ROLE_USER).await?;
    Ok(server::build_router(state))
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(json) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => req.body(Body::empty())?,
    };
    let res = app.clone().oneshot(req).await?;
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

pub async fn login(app: &Router, (username, password): (&str, &str)) -> anyhow::Result<String> {
    let uri = format!("/auth/login?username={username}&password={password}");
    let (status, body) = send(app, "POST", &uri, None, None).await?;
    anyhow::ensure!(status == StatusCode::OK, "login failed: {body}");
    Ok(body["token"].as_str().unwrap_or_default().to_string())
}
