// src/middleware/gate.rs

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{common::error::AppError, config::AppState, middleware::auth::session_from_headers};

pub const SIGNIN_PATH: &str = "/auth/signin";

// Páginas públicas: comparação exata
const PUBLIC_PAGES: &[&str] = &["/", SIGNIN_PATH, "/auth/error"];
// API pública: comparação por prefixo
const PUBLIC_API_PREFIX: &str = "/api/auth";
// Sob este prefixo a falta de sessão vira 401 JSON, não redirecionamento
const API_PREFIX: &str = "/api";
// Arquivos estáticos passam direto, nem entram na classificação
const EXCLUDED_PREFIXES: &[&str] = &["/static"];
const EXCLUDED_FILES: &[&str] = &["/favicon.ico", "/robots.txt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Excluded,
    Public,
    Protected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToSignIn(String),
    Unauthorized,
}

fn under_prefix(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Classifica o caminho. Tudo que não é explicitamente público é protegido.
pub fn classify_path(path: &str) -> RouteClass {
    if EXCLUDED_FILES.contains(&path) || EXCLUDED_PREFIXES.iter().any(|p| under_prefix(path, p)) {
        return RouteClass::Excluded;
    }
    if PUBLIC_PAGES.contains(&path) || under_prefix(path, PUBLIC_API_PREFIX) {
        return RouteClass::Public;
    }
    RouteClass::Protected
}

/// URL da página de login com o destino original no callbackUrl.
pub fn signin_url(original: &str) -> String {
    format!("{}?callbackUrl={}", SIGNIN_PATH, urlencoding::encode(original))
}

/// `original` é caminho + query da requisição; volta no callbackUrl.
pub fn decide(class: RouteClass, has_session: bool, original: &str) -> GateDecision {
    match class {
        RouteClass::Excluded | RouteClass::Public => GateDecision::Allow,
        RouteClass::Protected if has_session => GateDecision::Allow,
        RouteClass::Protected => {
            let path = original.split('?').next().unwrap_or(original);
            if under_prefix(path, API_PREFIX) {
                GateDecision::Unauthorized
            } else {
                GateDecision::RedirectToSignIn(signin_url(original))
            }
        }
    }
}

// O middleware em si. Roda antes de qualquer handler; papel não é checado aqui.
pub async fn route_gate(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let class = classify_path(request.uri().path());

    // Só decodifica o token quando a rota exige
    let has_session = class == RouteClass::Protected
        && session_from_headers(&app_state.sessions, request.headers()).is_some();

    let original = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    match decide(class, has_session, original) {
        GateDecision::Allow => next.run(request).await,
        GateDecision::RedirectToSignIn(location) => {
            tracing::debug!(path = %request.uri().path(), "Sem sessão; redirecionando para o login");
            Redirect::temporary(&location).into_response()
        }
        GateDecision::Unauthorized => {
            tracing::debug!(path = %request.uri().path(), "Sem sessão na API");
            AppError::Unauthenticated.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_pages_match_exactly() {
        assert_eq!(classify_path("/"), RouteClass::Public);
        assert_eq!(classify_path("/auth/signin"), RouteClass::Public);
        assert_eq!(classify_path("/auth/error"), RouteClass::Public);

        assert_eq!(classify_path("/auth/signin/extra"), RouteClass::Protected);
        assert_eq!(classify_path("/auth"), RouteClass::Protected);
    }

    #[test]
    fn public_api_matches_by_prefix() {
        assert_eq!(classify_path("/api/auth"), RouteClass::Public);
        assert_eq!(classify_path("/api/auth/signin"), RouteClass::Public);
        assert_eq!(classify_path("/api/auth/session"), RouteClass::Public);

        assert_eq!(classify_path("/api/authors"), RouteClass::Protected);
        assert_eq!(classify_path("/api/projects"), RouteClass::Protected);
    }

    #[test]
    fn unknown_paths_fail_closed() {
        assert_eq!(classify_path("/dashboard"), RouteClass::Protected);
        assert_eq!(classify_path("/dashboard/users"), RouteClass::Protected);
        assert_eq!(classify_path("/qualquer/coisa"), RouteClass::Protected);
        assert_eq!(classify_path(""), RouteClass::Protected);
    }

    #[test]
    fn static_assets_are_excluded() {
        assert_eq!(classify_path("/favicon.ico"), RouteClass::Excluded);
        assert_eq!(classify_path("/static/app.css"), RouteClass::Excluded);
        assert_eq!(classify_path("/statics"), RouteClass::Protected);
    }

    #[test]
    fn protected_without_session_redirects_with_callback() {
        let decision = decide(RouteClass::Protected, false, "/dashboard?tab=materiais");
        assert_eq!(
            decision,
            GateDecision::RedirectToSignIn(
                "/auth/signin?callbackUrl=%2Fdashboard%3Ftab%3Dmateriais".to_string()
            )
        );
    }

    #[test]
    fn api_without_session_is_unauthorized() {
        assert_eq!(decide(RouteClass::Protected, false, "/api/projects"), GateDecision::Unauthorized);
        assert_eq!(
            decide(RouteClass::Protected, false, "/api/inventory/dashboard?x=1"),
            GateDecision::Unauthorized
        );
        // Só o prefixo exato: "/apiary" é página
        assert!(matches!(
            decide(RouteClass::Protected, false, "/apiary"),
            GateDecision::RedirectToSignIn(_)
        ));
    }

    #[test]
    fn session_or_public_path_allows() {
        assert_eq!(decide(RouteClass::Protected, true, "/dashboard"), GateDecision::Allow);
        assert_eq!(decide(RouteClass::Public, false, "/"), GateDecision::Allow);
        assert_eq!(decide(RouteClass::Excluded, false, "/favicon.ico"), GateDecision::Allow);
    }
}
