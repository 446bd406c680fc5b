use sqlx::{PgPool, Postgres, Transaction};

use crate::common::error::AppError;

// ---
// Helper de leitura consistente
// ---
/// Abre uma transação somente-leitura com snapshot único.
/// Todas as consultas feitas nela enxergam o mesmo estado do livro-razão,
/// então um INSERT concorrente nunca aparece "pela metade" no dashboard.
pub(crate) async fn begin_read_snapshot(
    pool: &PgPool,
) -> Result<Transaction<'static, Postgres>, AppError> {
    // O '?' converte sqlx::Error -> AppError::DatabaseError
    let mut tx = pool.begin().await?;

    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await?;

    Ok(tx)
}

/// Traduz violação de unicidade em erro de regra de negócio (400).
/// Qualquer outro erro de banco segue como 500.
pub(crate) fn unique_violation_as(e: sqlx::Error, message: impl Into<String>) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::BusinessRule(message.into());
        }
    }
    e.into()
}

/// Traduz violação de chave estrangeira em erro de regra de negócio (400).
pub(crate) fn foreign_key_violation_as(e: sqlx::Error, message: impl Into<String>) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            return AppError::BusinessRule(message.into());
        }
    }
    e.into()
}

/// Violação de CHECK (ex.: quantidade > 0) também é erro do cliente (400).
/// Demais erros seguem para `foreign_key_violation_as`.
pub(crate) fn ledger_write_error(e: sqlx::Error, fk_message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_check_violation() {
            return AppError::BusinessRule("Quantidade fora do intervalo permitido.".into());
        }
    }
    foreign_key_violation_as(e, fk_message)
}
