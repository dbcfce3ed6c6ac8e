//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::ValidationError;

/// Validar y convertir string a UUID
pub fn validate_uuid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar una fecha de viaje: bien formada y no en el pasado
pub fn validate_travel_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let date = validate_date(value)?;
    let today = Utc::now().date_naive();
    if date < today {
        let mut error = ValidationError::new("travel_date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("reason".into(), &"travel date is in the past".to_string());
        return Err(error);
    }
    Ok(date)
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_uuid() {
        let valid_uuid = "550e8400-e29b-41d4-a716-446655440000";
        assert!(validate_uuid(valid_uuid).is_ok());

        let invalid_uuid = "invalid-uuid";
        assert!(validate_uuid(invalid_uuid).is_err());
    }

    #[test]
    fn test_validate_date() {
        let valid_date = "2024-01-15";
        assert!(validate_date(valid_date).is_ok());

        let invalid_date = "2024/01/15";
        assert!(validate_date(invalid_date).is_err());
    }

    #[test]
    fn test_validate_travel_date_rejects_past() {
        let yesterday = (Utc::now().date_naive() - Duration::days(1))
            .format("%Y-%m-%d")
            .to_string();
        assert!(validate_travel_date(&yesterday).is_err());

        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        assert!(validate_travel_date(&today).is_ok());

        let tomorrow = (Utc::now().date_naive() + Duration::days(1))
            .format("%Y-%m-%d")
            .to_string();
        assert!(validate_travel_date(&tomorrow).is_ok());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Colombo").is_ok());
        assert!(validate_not_empty("   ").is_err());
        assert!(validate_not_empty("").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-5).is_err());
    }
}
