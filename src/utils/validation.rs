//! Utilidades de validación
//! 
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos que llegan como strings en query params o JSON.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use validator::ValidationError;

use crate::utils::errors::AppError;

/// Validar y convertir string a fecha (YYYY-MM-DD, o un datetime del que se toma la fecha)
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| validate_datetime(value).map(|dt| dt.date_naive()))
        .map_err(|_| {
            let mut error = ValidationError::new("date");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"YYYY-MM-DD".to_string());
            error
        })
}

/// Validar y convertir string a datetime.
///
/// Acepta RFC3339 y también el formato sin zona de `<input type="datetime-local">`
/// (`YYYY-MM-DDTHH:MM[:SS]`), que se interpreta como UTC.
pub fn validate_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
                .map(|naive| naive.and_utc())
        })
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339".to_string());
            error
        })
}

/// Parsear un datetime opcional de query string; vacío cuenta como ausente
pub fn parse_optional_datetime(
    field: &str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => validate_datetime(raw)
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("Invalid {}: '{}'", field, raw))),
    }
}

/// Parsear una fecha opcional del body; vacío cuenta como ausente
pub fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => validate_date(raw)
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("Invalid {}: '{}'", field, raw))),
    }
}

/// Parsear un datetime obligatorio del body
pub fn parse_datetime(field: &str, value: &str) -> Result<DateTime<Utc>, AppError> {
    parse_optional_datetime(field, Some(value))?
        .ok_or_else(|| AppError::BadRequest(format!("{} is required", field)))
}

/// La ventana de una reserva debe terminar después de empezar
pub fn validate_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AppError> {
    if end <= start {
        return Err(AppError::BadRequest(
            "end_datetime must be later than start_datetime".to_string(),
        ));
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_ascii_digit()).collect::<String>();
    if clean_phone.len() < 9 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Normalizar email para comparaciones y unicidad
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}
