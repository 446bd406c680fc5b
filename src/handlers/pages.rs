// src/handlers/pages.rs
//
// Páginas renderizadas no servidor.

use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::{
    common::{
        error::AppError,
        html::{escape, page},
    },
    config::AppState,
    handlers::auth::session_cookie,
    middleware::{
        auth::{MaybeUser, PageUser},
        gate::SIGNIN_PATH,
    },
    models::{
        auth::SignInForm,
        dashboard::{DashboardResponse, StockLevel},
        rbac::Role,
    },
};

pub const DASHBOARD_PATH: &str = "/dashboard";

/// Aceita apenas caminhos relativos ao próprio site; o resto vira o dashboard.
pub fn safe_callback(raw: Option<&str>) -> String {
    match raw {
        Some(url)
            if url.starts_with('/')
                && !url.starts_with("//")
                && !url.starts_with("/\\")
                && !url.chars().any(char::is_control) =>
        {
            url.to_string()
        }
        _ => DASHBOARD_PATH.to_string(),
    }
}

// Falha inesperada ao montar uma página: loga e devolve 500 sem detalhes.
pub struct PageError(AppError);

impl From<AppError> for PageError {
    fn from(e: AppError) -> Self {
        PageError(e)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!("Erro ao renderizar página: {}", self.0);
        let body = page(
            "Erro",
            "<h1>Algo deu errado</h1><p>Tente novamente em instantes.</p>",
        );
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

// GET /
pub async fn home(MaybeUser(session): MaybeUser) -> Html<String> {
    let body = match session {
        Some(s) => format!(
            r#"<h1>Almoxarifado</h1><p>Olá, {}.</p><p><a href="{}">Ir para o painel</a></p>"#,
            escape(&s.username),
            DASHBOARD_PATH
        ),
        None => format!(
            r#"<h1>Almoxarifado</h1><p>Controle de materiais, entradas e saídas.</p><p><a href="{}">Entrar</a></p>"#,
            SIGNIN_PATH
        ),
    };
    page("Início", &body)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInQuery {
    pub callback_url: Option<String>,
    pub error: Option<String>,
}

// GET /auth/signin
pub async fn signin_page(Query(query): Query<SignInQuery>) -> Html<String> {
    let callback = safe_callback(query.callback_url.as_deref());
    let notice = match query.error.as_deref() {
        Some("CredentialsSignin") => "<p role=\"alert\">Usuário ou senha inválidos.</p>",
        Some(_) => "<p role=\"alert\">Não foi possível entrar. Tente novamente.</p>",
        None => "",
    };

    let body = format!(
        r#"<h1>Entrar</h1>
{notice}
<form method="post" action="{action}">
<input type="hidden" name="callbackUrl" value="{callback}">
<label>Usuário <input name="username" autocomplete="username" required></label>
<label>Senha <input name="password" type="password" autocomplete="current-password" required></label>
<button type="submit">Entrar</button>
</form>"#,
        notice = notice,
        action = SIGNIN_PATH,
        callback = escape(&callback),
    );
    page("Entrar", &body)
}

// POST /auth/signin (formulário)
pub async fn signin_submit(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignInForm>,
) -> Response {
    let callback = safe_callback(form.callback_url.as_deref());

    match app_state.auth_service.sign_in(&form.username, &form.password).await {
        Ok((token, _session)) => {
            let jar = jar.add(session_cookie(token, app_state.config.cookie_secure));
            (jar, Redirect::to(&callback)).into_response()
        }
        Err(AppError::InvalidCredentials) => {
            let location = format!(
                "{}?error=CredentialsSignin&callbackUrl={}",
                SIGNIN_PATH,
                urlencoding::encode(&callback)
            );
            Redirect::to(&location).into_response()
        }
        Err(e) => {
            tracing::error!("Falha no login: {}", e);
            Redirect::to("/auth/error?error=Configuration").into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorQuery {
    pub error: Option<String>,
}

// GET /auth/error
pub async fn error_page(Query(query): Query<ErrorQuery>) -> Html<String> {
    let message = match query.error.as_deref() {
        Some("AccessDenied") => "Você não tem acesso a esta área.",
        Some("Configuration") => "O serviço de autenticação está indisponível.",
        _ => "Ocorreu um erro na autenticação.",
    };
    let body = format!(
        r#"<h1>Erro de autenticação</h1><p>{}</p><p><a href="{}">Voltar ao login</a></p>"#,
        escape(message),
        SIGNIN_PATH
    );
    page("Erro", &body)
}

fn stock_rows(levels: &[StockLevel]) -> String {
    levels
        .iter()
        .map(|l| {
            let status = match (l.out_of_stock, l.low_stock) {
                (true, _) => "Sem estoque",
                (false, true) => "Estoque baixo",
                (false, false) => "OK",
            };
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&l.material_name),
                escape(&l.category_name),
                l.current_stock,
                l.min_stock_level.map(|m| m.to_string()).unwrap_or_else(|| "-".into()),
                status
            )
        })
        .collect()
}

fn render_dashboard(username: &str, role: Role, dashboard: &DashboardResponse) -> String {
    let s = &dashboard.summary;

    let alerts: String = dashboard
        .low_stock_alerts
        .iter()
        .map(|l| {
            format!(
                "<li>{}: {} (mínimo {})</li>",
                escape(&l.material_name),
                l.current_stock,
                l.min_stock_level.map(|m| m.to_string()).unwrap_or_default()
            )
        })
        .collect();

    let activities: String = dashboard
        .recent_activities
        .iter()
        .map(|a| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                a.date,
                a.direction.label(),
                escape(&a.material_name),
                a.quantity,
                escape(&a.person)
            )
        })
        .collect();

    let users_link = if role == Role::SuperUser {
        r#"<a href="/dashboard/users">Usuários</a> · "#
    } else {
        ""
    };

    format!(
        r#"<header><p>{user} ({role}) · {users_link}<form method="post" action="/api/auth/signout" style="display:inline"><button>Sair</button></form></p></header>
<h1>Painel</h1>
<section>
<p>Materiais: {total}</p>
<p>Estoque baixo: {low}</p>
<p>Sem estoque: {out}</p>
<p>Valor em estoque: {value}</p>
</section>
<h2>Alertas de estoque baixo</h2>
<ul>{alerts}</ul>
<h2>Saldos</h2>
<table>
<thead><tr><th>Material</th><th>Categoria</th><th>Saldo</th><th>Mínimo</th><th>Situação</th></tr></thead>
<tbody>{rows}</tbody>
</table>
<h2>Atividades recentes</h2>
<table>
<thead><tr><th>Data</th><th>Tipo</th><th>Material</th><th>Quantidade</th><th>Responsável</th></tr></thead>
<tbody>{activities}</tbody>
</table>"#,
        user = escape(username),
        role = role,
        users_link = users_link,
        total = s.total_materials,
        low = s.low_stock_materials,
        out = s.out_of_stock_materials,
        value = s.total_stock_value,
        alerts = alerts,
        rows = stock_rows(&dashboard.stock_levels),
        activities = activities,
    )
}

// GET /dashboard
pub async fn dashboard_page(
    State(app_state): State<AppState>,
    PageUser(session): PageUser,
) -> Result<Html<String>, PageError> {
    let dashboard = app_state.dashboard_service.get_dashboard().await?;
    let body = render_dashboard(&session.username, session.role, &dashboard);
    Ok(page("Painel", &body))
}

// GET /dashboard/users: quem não é SUPER_USER volta para o painel
pub async fn users_page(
    State(app_state): State<AppState>,
    PageUser(session): PageUser,
) -> Result<Response, PageError> {
    if session.role != Role::SuperUser {
        tracing::warn!(user = %session.username, "Acesso negado à gestão de usuários");
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    }

    let users = app_state.auth_service.list_users().await?;
    let rows: String = users
        .iter()
        .map(|u| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&u.username),
                u.role(),
                u.created_at.format("%d/%m/%Y")
            )
        })
        .collect();

    let body = format!(
        r#"<p><a href="{}">Voltar ao painel</a></p>
<h1>Usuários</h1>
<table>
<thead><tr><th>Usuário</th><th>Papel</th><th>Criado em</th></tr></thead>
<tbody>{}</tbody>
</table>"#,
        DASHBOARD_PATH, rows
    );
    Ok(page("Usuários", &body).into_response())
}

// Qualquer rota desconhecida (já passou pelo gate, então há sessão)
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        page("Não encontrado", "<h1>Página não encontrada</h1>"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_activity_shows_portuguese_labels() {
        use crate::models::{
            dashboard::{DashboardSummary, RecentActivity},
            inventory::MovementDirection,
        };
        use chrono::{NaiveDate, Utc};
        use rust_decimal::Decimal;
        use uuid::Uuid;

        let activity = |direction| RecentActivity {
            id: Uuid::new_v4(),
            direction,
            material_id: Uuid::new_v4(),
            material_name: "Cimento".into(),
            quantity: Decimal::from(3),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            person: "Joana".into(),
            project_name: None,
            created_at: Utc::now(),
        };
        let dashboard = DashboardResponse {
            summary: DashboardSummary {
                total_materials: 0,
                low_stock_materials: 0,
                out_of_stock_materials: 0,
                total_stock_value: Decimal::ZERO,
            },
            stock_levels: vec![],
            recent_activities: vec![
                activity(MovementDirection::Inflow),
                activity(MovementDirection::Outflow),
            ],
            low_stock_alerts: vec![],
        };

        let html = render_dashboard("ana", Role::Editor, &dashboard);
        assert!(html.contains("<td>Entrada</td>"));
        assert!(html.contains("<td>Saída</td>"));
        assert!(!html.contains("Inflow"));
        assert!(!html.contains("Outflow"));
    }

    #[test]
    fn callback_keeps_local_paths() {
        assert_eq!(safe_callback(Some("/dashboard/users")), "/dashboard/users");
        assert_eq!(safe_callback(Some("/dashboard?tab=1")), "/dashboard?tab=1");
    }

    #[test]
    fn callback_rejects_external_targets() {
        assert_eq!(safe_callback(Some("https://evil.example")), DASHBOARD_PATH);
        assert_eq!(safe_callback(Some("//evil.example")), DASHBOARD_PATH);
        assert_eq!(safe_callback(Some("/\\evil.example")), DASHBOARD_PATH);
        assert_eq!(safe_callback(Some("/ok\r\nSet-Cookie: x")), DASHBOARD_PATH);
        assert_eq!(safe_callback(None), DASHBOARD_PATH);
    }
}
