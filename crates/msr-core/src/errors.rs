//! Error families raised when an input breaks a constructor's axioms.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code, message and context carried by every [`MsrError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Kebab-case code, stable across releases (`not-sigma-algebra`, `sigma-mismatch`).
    pub code: String,
    /// Diagnostic text.
    pub message: String,
    /// Offending sets, points and sizes, keyed by role.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// How to repair the input, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with an empty context.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records the offending set, value or size under `key`.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a repair hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the measure construction stack.
///
/// Every variant signals a broken caller contract: an input that does not
/// satisfy the axioms its constructor demands. Successful paths are pure value
/// computations and never fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum MsrError {
    /// Extended-real values outside `[0, ∞]`.
    #[error("value error: {0}")]
    Value(ErrorInfo),
    /// Universe, point set and sigma-algebra errors.
    #[error("sigma error: {0}")]
    Sigma(ErrorInfo),
    /// Outer measure axiom and Caratheodory errors.
    #[error("outer measure error: {0}")]
    Outer(ErrorInfo),
    /// Premeasure validation errors.
    #[error("premeasure error: {0}")]
    Premeasure(ErrorInfo),
    /// Measure combinator errors.
    #[error("measure error: {0}")]
    Measure(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// Configuration loading errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl MsrError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            MsrError::Value(info)
            | MsrError::Sigma(info)
            | MsrError::Outer(info)
            | MsrError::Premeasure(info)
            | MsrError::Measure(info)
            | MsrError::Serde(info)
            | MsrError::Config(info) => info,
        }
    }

    /// Returns the stable error code.
    pub fn code(&self) -> &str {
        &self.info().code
    }
}
