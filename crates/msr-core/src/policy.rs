//! Numeric tolerances used by axiom validation.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, MsrError};

/// Numeric tolerance applied when validating axioms on floating point data.
///
/// Validation entry points (premeasure additivity, outer measure axioms, the
/// Caratheodory criterion) accept a `&Tolerance` explicitly. Integer and dyadic
/// data can be checked with [`Tolerance::exact`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Tolerance {
    /// Absolute tolerance for equality checks.
    #[serde(default = "Tolerance::default_abs_tol")]
    pub abs_tol: f64,
    /// Relative tolerance, scaled by the larger magnitude of the operands.
    #[serde(default = "Tolerance::default_rel_tol")]
    pub rel_tol: f64,
}

impl Tolerance {
    const fn default_abs_tol() -> f64 {
        1e-9
    }

    const fn default_rel_tol() -> f64 {
        1e-12
    }

    /// Tolerance that only accepts bitwise-equal floats.
    pub const fn exact() -> Self {
        Self {
            abs_tol: 0.0,
            rel_tol: 0.0,
        }
    }

    /// Returns whether two finite floats agree within the tolerance.
    pub fn close(&self, a: f64, b: f64) -> bool {
        if a == b {
            return true;
        }
        let diff = (a - b).abs();
        diff <= self.abs_tol || diff <= self.rel_tol * a.abs().max(b.abs())
    }

    /// Parses a tolerance from a YAML document; missing fields take defaults.
    pub fn from_yaml_str(data: &str) -> Result<Self, MsrError> {
        let tol: Tolerance = serde_yaml::from_str(data)
            .map_err(|err| MsrError::Config(ErrorInfo::new("yaml-deserialize", err.to_string())))?;
        tol.validate()
    }

    /// Parses a tolerance from a JSON document; missing fields take defaults.
    pub fn from_json_str(data: &str) -> Result<Self, MsrError> {
        let tol: Tolerance = serde_json::from_str(data)
            .map_err(|err| MsrError::Config(ErrorInfo::new("json-deserialize", err.to_string())))?;
        tol.validate()
    }

    fn validate(self) -> Result<Self, MsrError> {
        for (name, value) in [("abs_tol", self.abs_tol), ("rel_tol", self.rel_tol)] {
            if !value.is_finite() || value < 0.0 {
                return Err(MsrError::Config(
                    ErrorInfo::new("invalid-tolerance", "tolerances must be finite and non-negative")
                        .with_context("field", name)
                        .with_context("value", value.to_string()),
                ));
            }
        }
        Ok(self)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            abs_tol: Self::default_abs_tol(),
            rel_tol: Self::default_rel_tol(),
        }
    }
}
