//! Utilidades de validación
//!
//! Conversión de parámetros de query string a tipos del dominio.

use chrono::{Datelike, NaiveDate};
use std::borrow::Cow;
use validator::ValidationError;

use crate::utils::errors::{validation_error, AppResult};

/// Formato ISO aceptado para fechas de los reportes
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Años admitidos en fechas de los reportes
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

fn invalid_date(value: &str) -> ValidationError {
    let mut error = ValidationError::new("date");
    error.add_param("value".into(), &value.to_string());
    error.add_param("format".into(), &"YYYY-MM-DD".to_string());
    error.message = Some(Cow::Owned(format!(
        "'{}' is not a valid date, expected YYYY-MM-DD",
        value
    )));
    error
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let date = NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT)
        .map_err(|_| invalid_date(value))?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(invalid_date(value));
    }
    Ok(date)
}

/// Parsear un parámetro de fecha opcional asociándolo a su campo
pub fn parse_optional_date(
    field: &'static str,
    value: Option<&str>,
) -> AppResult<Option<NaiveDate>> {
    match value {
        Some(raw) if !raw.trim().is_empty() => validate_date(raw)
            .map(Some)
            .map_err(|e| validation_error(field, e)),
        _ => Ok(None),
    }
}
