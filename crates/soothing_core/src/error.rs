//! Construction-time configuration errors
//!
//! Components validate their configuration once, when they are built.
//! Nothing after construction returns an error: per-tick arithmetic clamps
//! or wraps instead.

use thiserror::Error;

/// Rejected component configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} needs at least {min} entries, got {actual}")]
    TooFew {
        field: &'static str,
        min: usize,
        actual: usize,
    },

    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid color {value:?}, expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidColor { value: String },
}

/// Check that `value` is finite and strictly positive
pub fn ensure_positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive {
            field,
            value: value as f64,
        });
    }
    Ok(value)
}

/// Check that `value` is finite and within `min..=max`
pub fn ensure_in_range(
    field: &'static str,
    value: f32,
    min: f32,
    max: f32,
) -> Result<f32, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            value: value as f64,
            min: min as f64,
            max: max as f64,
        });
    }
    Ok(value)
}

/// Check that a collection has at least `min` entries
pub fn ensure_at_least<T>(field: &'static str, items: &[T], min: usize) -> Result<(), ConfigError> {
    if items.is_empty() && min > 0 {
        return Err(ConfigError::Empty { field });
    }
    if items.len() < min {
        return Err(ConfigError::TooFew {
            field,
            min,
            actual: items.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_checks() {
        assert_eq!(ensure_positive("size", 10.0), Ok(10.0));
        assert!(matches!(
            ensure_positive("size", 0.0),
            Err(ConfigError::NonPositive { field: "size", .. })
        ));
        assert_eq!(
            ensure_positive("duration", f32::NAN),
            Err(ConfigError::NonFinite { field: "duration" })
        );
    }

    #[test]
    fn test_collection_checks() {
        let empty: [u8; 0] = [];
        assert_eq!(
            ensure_at_least("colors", &empty, 1),
            Err(ConfigError::Empty { field: "colors" })
        );
        assert_eq!(
            ensure_at_least("capsules", &[1], 2),
            Err(ConfigError::TooFew {
                field: "capsules",
                min: 2,
                actual: 1
            })
        );
        assert!(ensure_at_least("capsules", &[1, 2], 2).is_ok());
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::NonPositive {
            field: "size",
            value: -1.0,
        };
        assert_eq!(err.to_string(), "size must be positive, got -1");
    }
}
