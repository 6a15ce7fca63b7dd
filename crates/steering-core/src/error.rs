use thiserror::Error;

use crate::config::MAX_PATH_SAMPLES;

/// Malformed task specification, reported when geometry is generated.
///
/// Checkers never produce these; once geometry exists they assume it is
/// well formed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpecError {
    #[error("grid layout has no cells")]
    EmptyGrid,

    #[error("grid layout contains no target cells")]
    NoTargets,

    #[error("unknown grid symbol '{symbol}' at row {row}, column {col}")]
    UnknownGridSymbol {
        symbol: String,
        row: usize,
        col: usize,
    },

    #[error("x range {start}..{end} is empty or too short for step {step}")]
    InvalidRange { start: f64, end: f64, step: f64 },

    #[error("step size must be positive and finite, got {0}")]
    InvalidStep(f64),

    #[error("parameter '{0}' is not finite")]
    NonFinite(&'static str),

    #[error("sequential tunnel needs at least one segment width")]
    EmptySegments,

    #[error("{which} menu needs at least one item")]
    InvalidMenuSize { which: &'static str },

    #[error("{which} menu target index {index} is out of range for {size} items")]
    MenuIndexOutOfRange {
        which: &'static str,
        index: usize,
        size: usize,
    },

    #[error("dimension '{name}' must be positive, got {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("path would need about {estimated} samples, limit is {limit}")]
    TooManySamples { estimated: f64, limit: usize },
}

/// Reject NaN/infinite parameters before they reach the generators.
pub fn ensure_finite(name: &'static str, value: f64) -> Result<f64, SpecError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SpecError::NonFinite(name))
    }
}

/// Require a strictly positive, finite dimension.
pub fn ensure_positive(name: &'static str, value: f64) -> Result<f64, SpecError> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SpecError::InvalidDimension { name, value })
    }
}

/// Require a finite, non-negative dimension (zero widths are legal corridors).
pub fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64, SpecError> {
    ensure_finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(SpecError::InvalidDimension { name, value })
    }
}

/// Reject geometry whose estimated sample count is over [`MAX_PATH_SAMPLES`].
pub fn ensure_sample_budget(estimated: f64) -> Result<(), SpecError> {
    if estimated.is_finite() && estimated <= MAX_PATH_SAMPLES as f64 {
        Ok(())
    } else {
        Err(SpecError::TooManySamples {
            estimated,
            limit: MAX_PATH_SAMPLES,
        })
    }
}
