// Utilitários compartilhados pelos testes de integração.
#![allow(dead_code)]

use almoxarifado::{
    build_router,
    config::{AppState, Config},
    models::rbac::Role,
};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use uuid::Uuid;

pub const TEST_SECRET: &str = "segredo-de-teste";

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/nao_usado".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        session_ttl_hours: 12,
        bind_addr: "127.0.0.1:0".to_string(),
        db_max_connections: 1,
        cookie_secure: false,
        bootstrap_admin: None,
    }
}

// Pool preguiçosa: nenhum teste daqui deve chegar ao banco.
pub fn test_state() -> AppState {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy("postgres://localhost/nao_usado")
        .unwrap();
    AppState::from_parts(pool, test_config())
}

pub fn app() -> (AppState, Router) {
    let state = test_state();
    (state.clone(), build_router(state))
}

pub fn token_for(state: &AppState, username: &str, role: Role) -> String {
    let (token, _) = state.sessions.issue(Uuid::new_v4(), username, role).unwrap();
    token
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_cookie(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, format!("session_token={}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, token: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
