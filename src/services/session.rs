// src/services/session.rs

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::{Claims, Session},
        rbac::Role,
    },
};

/// Emite e valida o token de sessão assinado (HS256).
/// Validar não consulta o banco: a sessão é só o que está assinado no token.
#[derive(Clone)]
pub struct SessionProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl SessionProvider {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, user_id: Uuid, username: &str, role: Role) -> Result<(String, Session), AppError> {
        let now = Utc::now();
        let expires_at = now + self.ttl;

        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            role: role.as_str().to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;

        let session = Session {
            user_id,
            username: claims.username,
            role,
            // Mesma precisão de segundos que vai no token
            expires_at: DateTime::from_timestamp(claims.exp as i64, 0).unwrap_or(expires_at),
        };

        Ok((token, session))
    }

    /// `None` para token ausente de sentido: assinatura errada, expirado ou malformado.
    pub fn decode(&self, token: &str) -> Option<Session> {
        let mut validation = Validation::default();
        // Expirou, acabou: sem tolerância
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding_key, &validation).ok()?;
        let claims = data.claims;

        Some(Session {
            user_id: claims.sub,
            username: claims.username,
            role: Role::from_claim(&claims.role),
            expires_at: DateTime::from_timestamp(claims.exp as i64, 0)?,
        })
    }
}
