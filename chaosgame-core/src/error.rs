use thiserror::Error;

/// Errors originating from the core math, description, and codec layers.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid number for {field}: {value} (must be finite)")]
    InvalidNumber { field: &'static str, value: f64 },

    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("fractal description has no transforms")]
    NoTransforms,

    #[error("parse error on line {line} at {token:?}: {reason}")]
    Parse {
        line: usize,
        token: String,
        reason: &'static str,
    },

    #[error("unsupported transform type: expected {expected}, found {found}")]
    UnsupportedType {
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Reject NaN and ±infinity, naming the offending field.
#[inline]
pub(crate) fn check_finite(field: &'static str, value: f64) -> crate::Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoreError::InvalidNumber { field, value })
    }
}
