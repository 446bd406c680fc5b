// Gate de rotas: quem não tem sessão só vê as páginas públicas.

mod common;

use almoxarifado::{models::rbac::Role, services::session::SessionProvider};
use axum::http::StatusCode;
use common::*;
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn public_pages_render_without_session() {
    for path in ["/", "/auth/signin", "/auth/error"] {
        let (_, app) = app();
        let response = app.oneshot(get(path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "rota {}", path);
    }
}

#[tokio::test]
async fn dashboard_without_session_redirects_with_callback() {
    let (_, app) = app();
    let response = app.oneshot(get("/dashboard")).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/auth/signin?callbackUrl=%2Fdashboard");
}

#[tokio::test]
async fn callback_keeps_the_query_string() {
    let (_, app) = app();
    let response = app.oneshot(get("/dashboard/users?page=2")).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        location(&response),
        "/auth/signin?callbackUrl=%2Fdashboard%2Fusers%3Fpage%3D2"
    );
}

#[tokio::test]
async fn unknown_pages_are_gated_too() {
    for path in ["/nao-existe", "/docs/"] {
        let (_, app) = app();
        let response = app.oneshot(get(path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "rota {}", path);
        assert!(location(&response).starts_with("/auth/signin?callbackUrl="));
    }
}

#[tokio::test]
async fn api_without_session_answers_401_json() {
    for path in ["/api/projects", "/api/inventory/dashboard", "/api/nao-existe"] {
        let (_, app) = app();
        let response = app.oneshot(get(path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "rota {}", path);
        assert!(response.headers().get(axum::http::header::LOCATION).is_none());

        let body = body_json(response).await;
        assert_eq!(body["error"], "Não autenticado.");
    }
}

#[tokio::test]
async fn api_post_without_session_is_not_redirected() {
    let (_, app) = app();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/projects")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(r#"{"name":"Torre A"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_api_is_public() {
    let (_, app) = app();
    let response = app.oneshot(get("/api/auth/session")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "null");
}

#[tokio::test]
async fn static_assets_are_not_redirected() {
    let (_, app) = app();
    let response = app.oneshot(get("/favicon.ico")).await.unwrap();

    // Passa pelo gate e cai no fallback
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let (_, app) = app();
    let forged = SessionProvider::new("outro-segredo", chrono::Duration::hours(1))
        .issue(Uuid::new_v4(), "intruso", Role::SuperUser)
        .unwrap()
        .0;

    let response = app.oneshot(get_with_bearer("/dashboard", &forged)).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn expired_session_is_treated_as_absent() {
    let (_, app) = app();
    let expired = SessionProvider::new(TEST_SECRET, chrono::Duration::hours(-2))
        .issue(Uuid::new_v4(), "maria", Role::Editor)
        .unwrap()
        .0;

    let response = app.oneshot(get_with_cookie("/dashboard", &expired)).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn unknown_path_with_session_is_404() {
    let (state, app) = app();
    let token = token_for(&state, "maria", Role::Viewer);

    let response = app.oneshot(get_with_cookie("/nao-existe", &token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_is_served_to_signed_in_users() {
    let (state, app) = app();
    let token = token_for(&state, "maria", Role::Viewer);

    let response = app
        .oneshot(get_with_bearer("/api-docs/openapi.json", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let doc = body_json(response).await;
    assert!(doc["paths"]["/api/projects"].is_object());
}
