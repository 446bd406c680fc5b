// src/services/auth.rs

use bcrypt::{hash, verify};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::{
        auth::{Session, User},
        rbac::Role,
    },
    services::session::SessionProvider,
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    sessions: SessionProvider,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, sessions: SessionProvider) -> Self {
        Self { user_repo, sessions }
    }

    pub async fn sign_in(&self, username: &str, password: &str) -> Result<(String, Session), AppError> {
        // Formulário e API chegam aqui; espaços nas pontas não fazem parte do nome
        let username = username.trim();
        let user = match self.user_repo.find_by_username(username).await? {
            Some(user) => user,
            None => {
                tracing::warn!(username, "Tentativa de login com usuário inexistente");
                return Err(AppError::InvalidCredentials);
            }
        };

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            tracing::warn!(username, "Tentativa de login com senha inválida");
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(username, role = %user.role(), "Login efetuado");
        self.sessions.issue(user.id, &user.username, user.role())
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.list_users().await
    }

    pub async fn create_user(&self, username: &str, password: &str, role: Role) -> Result<User, AppError> {
        if role == Role::Unrecognized {
            return Err(AppError::BusinessRule("Papel inválido.".into()));
        }

        let hashed_password = hash_password(password).await?;
        let user = self.user_repo.create_user(username, &hashed_password, role).await?;

        tracing::info!(username, role = %role, "Usuário criado");
        Ok(user)
    }

    /// Primeira execução: cria um SUPER_USER se a tabela de usuários estiver vazia.
    pub async fn ensure_bootstrap_admin(&self, username: &str, password: &str) -> Result<(), AppError> {
        if self.user_repo.count_users().await? > 0 {
            return Ok(());
        }

        self.create_user(username, password, Role::SuperUser).await?;
        tracing::info!("👤 Usuário administrador inicial '{}' criado.", username);
        Ok(())
    }
}

async fn hash_password(password: &str) -> Result<String, AppError> {
    let password_clone = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}
