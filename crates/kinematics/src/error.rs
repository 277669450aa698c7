//! Parameter validation errors.

use thiserror::Error;

/// A model parameter was rejected at construction.
///
/// These are configuration errors: they are raised once, when a model is
/// built, so a successfully constructed model never produces NaN positions.
///
/// # Example
///
/// ```rust
/// use kinematics::{ParameterError, UniformCircular, UniformCircularParams};
///
/// let params = UniformCircularParams { radius: 0.0, ..Default::default() };
/// let err = UniformCircular::new(params).unwrap_err();
/// assert!(matches!(err, ParameterError::OutOfRange { field: "radius", .. }));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter was NaN or infinite.
    #[error("{model}: parameter `{field}` must be finite, got {value}")]
    NonFinite {
        model: &'static str,
        field: &'static str,
        value: f64,
    },

    /// A parameter was outside its physical domain.
    #[error("{model}: parameter `{field}` {requirement}, got {value}")]
    OutOfRange {
        model: &'static str,
        field: &'static str,
        value: f64,
        requirement: &'static str,
    },
}

/// A subtype name that matches no model family.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown motion subtype `{0}`")]
pub struct UnknownMotionKind(pub String);

/// Result alias for parameter validation.
pub type Result<T> = std::result::Result<T, ParameterError>;

/// Field checks bound to one model name.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Check(pub &'static str);

impl Check {
    pub(crate) fn finite(self, field: &'static str, value: f64) -> Result<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ParameterError::NonFinite {
                model: self.0,
                field,
                value,
            })
        }
    }

    fn require(
        self,
        field: &'static str,
        value: f64,
        requirement: &'static str,
        ok: impl FnOnce(f64) -> bool,
    ) -> Result<f64> {
        let value = self.finite(field, value)?;
        if ok(value) {
            Ok(value)
        } else {
            Err(ParameterError::OutOfRange {
                model: self.0,
                field,
                value,
                requirement,
            })
        }
    }

    pub(crate) fn positive(self, field: &'static str, value: f64) -> Result<f64> {
        self.require(field, value, "must be greater than zero", |v| v > 0.0)
    }

    pub(crate) fn non_negative(self, field: &'static str, value: f64) -> Result<f64> {
        self.require(field, value, "must not be negative", |v| v >= 0.0)
    }

    pub(crate) fn non_zero(self, field: &'static str, value: f64) -> Result<f64> {
        self.require(field, value, "must not be zero", |v| v != 0.0)
    }

    pub(crate) fn unit_interval(self, field: &'static str, value: f64) -> Result<f64> {
        self.require(field, value, "must be in [0, 1)", |v| (0.0..1.0).contains(&v))
    }
}
