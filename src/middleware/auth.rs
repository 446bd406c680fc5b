// src/middleware/auth.rs

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts, OriginalUri},
    http::{request::Parts, HeaderMap},
    response::Redirect,
};
use axum_extra::{
    extract::cookie::CookieJar,
    headers::{authorization::Bearer, Authorization, HeaderMapExt},
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::gate::signin_url,
    models::auth::Session,
    services::session::SessionProvider,
};

// Nome do cookie que carrega o token de sessão nas páginas
pub const SESSION_COOKIE: &str = "session_token";

/// Token de sessão da requisição: `Authorization: Bearer` tem prioridade sobre o cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() {
        return Some(bearer.token().to_string());
    }

    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Decodifica a sessão a partir dos cabeçalhos. Não consulta o banco.
pub fn session_from_headers(sessions: &SessionProvider, headers: &HeaderMap) -> Option<Session> {
    session_token(headers).and_then(|token| sessions.decode(&token))
}

// Extrator para handlers de API: sem sessão válida => 401 JSON.
// Revalida o token por conta própria; não confia no que o gate decidiu.
pub struct AuthenticatedUser(pub Session);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        session_from_headers(&app_state.sessions, &parts.headers)
            .map(AuthenticatedUser)
            .ok_or(AppError::Unauthenticated)
    }
}

// Extrator para páginas: sem sessão válida => redireciona para o login,
// guardando a URL pedida no callbackUrl.
pub struct PageUser(pub Session);

impl<S> FromRequestParts<S> for PageUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        match session_from_headers(&app_state.sessions, &parts.headers) {
            Some(session) => Ok(PageUser(session)),
            None => {
                let uri = parts
                    .extensions
                    .get::<OriginalUri>()
                    .map(|original| original.0.clone())
                    .unwrap_or_else(|| parts.uri.clone());
                let target = uri
                    .path_and_query()
                    .map(|pq| pq.as_str())
                    .unwrap_or_else(|| uri.path());
                Err(Redirect::to(&signin_url(target)))
            }
        }
    }
}

// Sessão opcional (páginas públicas e GET /api/auth/session)
pub struct MaybeUser(pub Option<Session>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        Ok(MaybeUser(session_from_headers(&app_state.sessions, &parts.headers)))
    }
}
