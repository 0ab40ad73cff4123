//! Utilidades de validación
//!
//! Validadores para `validator` (forma de los requests) y reglas numéricas
//! que devuelven `AppError::InvalidInput`.

use std::cmp::Ordering;

use serde::Serialize;
use validator::ValidationError;

use crate::utils::errors::{AppError, AppResult};

/// Rango de años aceptado para una unidad
pub const MIN_UNIT_YEAR: i32 = 1900;
pub const MAX_UNIT_YEAR: i32 = 2026;

/// Validar que un string no esté vacío ni sea sólo espacios
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en un rango específico (inclusivo)
pub fn validate_range<T: PartialOrd + std::fmt::Display + Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    // NaN no es comparable: cuenta como no positivo
    if value.partial_cmp(&T::zero()) != Some(Ordering::Greater) {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Exigir un valor estrictamente positivo
pub fn require_positive(field: &str, value: f64) -> AppResult<()> {
    validate_positive(value)
        .map_err(|_| AppError::InvalidInput(format!("{} must be greater than 0", field)))
}

/// Exigir un año de fabricación válido
pub fn require_valid_year(year: i32) -> AppResult<()> {
    validate_range(year, MIN_UNIT_YEAR, MAX_UNIT_YEAR).map_err(|_| {
        AppError::InvalidInput(format!(
            "year must be between {} and {}",
            MIN_UNIT_YEAR, MAX_UNIT_YEAR
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("ABC-123").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(5, 1, 10).is_ok());
        assert!(validate_range(1, 1, 10).is_ok());
        assert!(validate_range(0, 1, 10).is_err());
        assert!(validate_range(15, 1, 10).is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0.01).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-5.0).is_err());
        assert!(validate_positive(f64::NAN).is_err());
    }

    #[test]
    fn test_require_positive_reports_field() {
        let err = require_positive("distance_km", 0.0).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg.contains("distance_km")));
    }

    #[test]
    fn test_require_valid_year_bounds() {
        assert!(require_valid_year(1900).is_ok());
        assert!(require_valid_year(2026).is_ok());
        assert!(matches!(require_valid_year(1899), Err(AppError::InvalidInput(_))));
        assert!(matches!(require_valid_year(2027), Err(AppError::InvalidInput(_))));
    }
}
