// src/handlers/auth.rs

use axum::{extract::State, response::Redirect, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::{AuthenticatedUser, MaybeUser, SESSION_COOKIE},
        gate::SIGNIN_PATH,
        validation::ValidatedJson,
    },
    models::auth::{AuthResponse, Session, SignInPayload},
};

/// Cookie HttpOnly com o token; expira junto com a sessão (o JWT tem `exp`).
pub(crate) fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

// POST /api/auth/signin
#[utoipa::path(
    post,
    path = "/api/auth/signin",
    tag = "Auth",
    request_body = SignInPayload,
    responses(
        (status = 200, description = "Sessão criada; token também enviado no cookie", body = AuthResponse),
        (status = 400, description = "Payload inválido"),
        (status = 401, description = "Usuário ou senha inválidos")
    )
)]
pub async fn sign_in(
    State(app_state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<SignInPayload>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let (token, user) = app_state
        .auth_service
        .sign_in(&payload.username, &payload.password)
        .await?;

    let jar = jar.add(session_cookie(token.clone(), app_state.config.cookie_secure));
    Ok((jar, Json(AuthResponse { token, user })))
}

// POST /api/auth/signout
pub async fn sign_out(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to(SIGNIN_PATH))
}

// GET /api/auth/session (`null` quando anônimo)
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = "Auth",
    responses(
        (status = 200, description = "Sessão atual ou null", body = Option<Session>)
    )
)]
pub async fn get_session(MaybeUser(session): MaybeUser) -> Json<Option<Session>> {
    Json(session)
}

// GET /api/users/me
pub async fn get_me(AuthenticatedUser(session): AuthenticatedUser) -> Json<Session> {
    Json(session)
}
