// src/config.rs

use std::{env, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{DashboardRepository, InventoryRepository, ProjectRepository, UserRepository},
    services::{
        auth::AuthService, dashboard_service::DashboardService,
        inventory_service::InventoryService, project_service::ProjectService,
        session::SessionProvider,
    },
};

/// Configuração lida do ambiente (.env incluído).
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub cookie_secure: bool,
    // Usuário criado na primeira execução, se a tabela estiver vazia
    pub bootstrap_admin: Option<(String, String)>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let session_ttl_hours = parse_or("SESSION_TTL_HOURS", 12)?;
        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", 5)?;
        let cookie_secure = parse_or("COOKIE_SECURE", false)?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let bootstrap_admin = match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD")) {
            (Ok(user), Ok(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            session_ttl_hours,
            bind_addr,
            db_max_connections,
            cookie_secure,
            bootstrap_admin,
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} tem valor inválido: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação.
// Nada aqui é mutável: cada requisição recebe um clone barato.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Config,
    pub sessions: SessionProvider,
    pub auth_service: AuthService,
    pub dashboard_service: DashboardService,
    pub project_service: ProjectService,
    pub inventory_service: InventoryService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_parts(db_pool, config))
    }

    /// Monta o gráfico de dependências a partir de uma pool já criada.
    pub fn from_parts(db_pool: PgPool, config: Config) -> Self {
        let sessions = SessionProvider::new(
            &config.jwt_secret,
            chrono::Duration::hours(config.session_ttl_hours),
        );

        let user_repo = UserRepository::new(db_pool.clone());
        let auth_service = AuthService::new(user_repo, sessions.clone());

        let dashboard_service = DashboardService::new(DashboardRepository::new(db_pool.clone()));
        let project_service = ProjectService::new(ProjectRepository::new(db_pool.clone()));
        let inventory_service =
            InventoryService::new(InventoryRepository::new(db_pool.clone()), db_pool.clone());

        Self {
            db_pool,
            config,
            sessions,
            auth_service,
            dashboard_service,
            project_service,
            inventory_service,
        }
    }
}
