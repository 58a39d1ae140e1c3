//! Extended non-negative reals `[0, ∞]`.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, MsrError};
use crate::policy::Tolerance;

/// A value in `[0, ∞]` with `∞` absorbing under addition.
///
/// The finite part is an `f64` that is never negative and never NaN; `∞` is
/// stored as `f64::INFINITY`. The type is totally ordered, which makes it a
/// complete lattice with `0` as bottom and `∞` as top.
#[derive(Clone, Copy, Default, Serialize, Deserialize)]
#[serde(try_from = "ENNRealRepr", into = "ENNRealRepr")]
pub struct ENNReal(f64);

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ENNRealRepr {
    Finite(f64),
    Top,
}

impl TryFrom<ENNRealRepr> for ENNReal {
    type Error = MsrError;

    fn try_from(repr: ENNRealRepr) -> Result<Self, Self::Error> {
        match repr {
            ENNRealRepr::Finite(value) => ENNReal::finite(value),
            ENNRealRepr::Top => Ok(ENNReal::TOP),
        }
    }
}

impl From<ENNReal> for ENNRealRepr {
    fn from(value: ENNReal) -> Self {
        if value.is_top() {
            ENNRealRepr::Top
        } else {
            ENNRealRepr::Finite(value.0)
        }
    }
}

impl ENNReal {
    /// The additive identity.
    pub const ZERO: ENNReal = ENNReal(0.0);
    /// The multiplicative identity.
    pub const ONE: ENNReal = ENNReal(1.0);
    /// The absorbing top element `∞`.
    pub const TOP: ENNReal = ENNReal(f64::INFINITY);

    /// Returns `0`.
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Returns `1`.
    pub const fn one() -> Self {
        Self::ONE
    }

    /// Returns `∞`.
    pub const fn top() -> Self {
        Self::TOP
    }

    /// Builds a value from a float, rejecting negative numbers and NaN.
    ///
    /// `f64::INFINITY` is accepted and maps to `∞`.
    pub fn finite(value: f64) -> Result<Self, MsrError> {
        if value.is_nan() || value < 0.0 {
            return Err(MsrError::Value(
                ErrorInfo::new("invalid-extended-real", "value must lie in [0, ∞]")
                    .with_context("value", value.to_string()),
            ));
        }
        // Normalise -0.0 so that equality and hashing agree.
        Ok(Self(value + 0.0))
    }

    /// Builds a value from an unsigned integer.
    pub fn from_u64(value: u64) -> Self {
        Self(value as f64)
    }

    /// Returns whether the value is `∞`.
    pub fn is_top(&self) -> bool {
        self.0.is_infinite()
    }

    /// Returns whether the value is exactly `0`.
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Returns the value as a float (`f64::INFINITY` for `∞`).
    pub fn to_f64(&self) -> f64 {
        self.0
    }

    /// Returns the smaller of the two values.
    pub fn min(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }

    /// Returns the larger of the two values.
    pub fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }

    /// Truncated subtraction: `max(self - other, 0)`, with `∞ - x = ∞` for finite `x`
    /// and `∞ - ∞ = 0`.
    pub fn saturating_sub(self, other: Self) -> Self {
        if self.is_top() {
            return if other.is_top() { Self::ZERO } else { Self::TOP };
        }
        if other >= self {
            Self::ZERO
        } else {
            Self(self.0 - other.0)
        }
    }

    /// Countable sum, the supremum of the monotone sequence of partial sums.
    ///
    /// Stops early once a partial sum reaches `∞`.
    pub fn tsum<I: IntoIterator<Item = ENNReal>>(values: I) -> Self {
        let mut acc = Self::ZERO;
        for value in values {
            acc = acc + value;
            if acc.is_top() {
                break;
            }
        }
        acc
    }

    /// Infimum of a family (`∞` for the empty family).
    pub fn inf<I: IntoIterator<Item = ENNReal>>(values: I) -> Self {
        values.into_iter().fold(Self::TOP, Self::min)
    }

    /// Supremum of a family (`0` for the empty family).
    pub fn sup<I: IntoIterator<Item = ENNReal>>(values: I) -> Self {
        values.into_iter().fold(Self::ZERO, Self::max)
    }

    /// Compares two values up to the supplied tolerance.
    ///
    /// `∞` only matches `∞`.
    pub fn approx_eq(&self, other: &Self, tol: &Tolerance) -> bool {
        match (self.is_top(), other.is_top()) {
            (true, true) => true,
            (false, false) => tol.close(self.0, other.0),
            _ => false,
        }
    }

    /// Returns whether `self ≤ other` up to the supplied tolerance.
    pub fn approx_le(&self, other: &Self, tol: &Tolerance) -> bool {
        self <= other || self.approx_eq(other, tol)
    }
}

impl PartialEq for ENNReal {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for ENNReal {}

impl PartialOrd for ENNReal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ENNReal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for ENNReal {
    type Output = ENNReal;

    fn add(self, rhs: Self) -> Self::Output {
        ENNReal(self.0 + rhs.0)
    }
}

impl Mul for ENNReal {
    type Output = ENNReal;

    /// Multiplication with the measure-theoretic convention `0 · ∞ = 0`.
    fn mul(self, rhs: Self) -> Self::Output {
        if self.is_zero() || rhs.is_zero() {
            ENNReal::ZERO
        } else {
            ENNReal(self.0 * rhs.0)
        }
    }
}

impl Sum for ENNReal {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        ENNReal::tsum(iter)
    }
}

impl From<u32> for ENNReal {
    fn from(value: u32) -> Self {
        ENNReal(f64::from(value))
    }
}

impl fmt::Debug for ENNReal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for ENNReal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_top() {
            write!(f, "∞")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
