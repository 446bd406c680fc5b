// src/models/validators.rs
//
// Validações customizadas compartilhadas pelos payloads.

use rust_decimal::Decimal;
use validator::ValidationError;

// Quantidades são NUMERIC(14, 3) no banco
pub const QUANTITY_SCALE: u32 = 3;
const QUANTITY_INTEGER_DIGITS: u32 = 11;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "O campo não pode ficar em branco."));
    }
    Ok(())
}

/// Cabe na coluna sem arredondar: no máximo 3 casas e 11 dígitos inteiros.
fn validate_fits_column(val: &Decimal) -> Result<(), ValidationError> {
    if val.normalize().scale() > QUANTITY_SCALE {
        return Err(error("scale", "Use no máximo 3 casas decimais."));
    }
    if val.abs() >= Decimal::from(10_i64.pow(QUANTITY_INTEGER_DIGITS)) {
        return Err(error("range", "O valor excede o limite permitido."));
    }
    Ok(())
}

pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        return Err(error("range", "O valor não pode ser negativo."));
    }
    validate_fits_column(val)
}

pub fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        return Err(error("range", "A quantidade deve ser maior que zero."));
    }
    validate_fits_column(val)
}
