use msr_core::{ENNReal, ErrorInfo, MsrError, PointSet, Tolerance, Universe};
use serde::{Deserialize, Serialize};

pub(crate) fn outer_error(code: &str, message: impl Into<String>) -> MsrError {
    MsrError::Outer(ErrorInfo::new(code, message.into()))
}

/// A total, monotone, countably subadditive set function with `μ*(∅) = 0`.
///
/// The value of every subset of the universe is stored in a table indexed by
/// the subset's mask. Values are immutable once built; every operation returns
/// a new outer measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OuterRepr", into = "OuterRepr")]
pub struct OuterMeasure {
    universe: Universe,
    values: Vec<ENNReal>,
}

#[derive(Serialize, Deserialize)]
struct OuterRepr {
    universe: Universe,
    values: Vec<ENNReal>,
}

impl TryFrom<OuterRepr> for OuterMeasure {
    type Error = MsrError;

    fn try_from(repr: OuterRepr) -> Result<Self, Self::Error> {
        OuterMeasure::from_table(repr.universe, repr.values, &Tolerance::default())
    }
}

impl From<OuterMeasure> for OuterRepr {
    fn from(outer: OuterMeasure) -> Self {
        OuterRepr {
            universe: outer.universe,
            values: outer.values,
        }
    }
}

impl OuterMeasure {
    /// Wraps a table that is known to satisfy the axioms.
    pub(crate) fn from_values_unchecked(universe: Universe, values: Vec<ENNReal>) -> Self {
        debug_assert_eq!(values.len(), universe.num_subsets());
        debug_assert!(values.first().map_or(true, ENNReal::is_zero));
        Self { universe, values }
    }

    /// Builds a table by evaluating `f` on every subset.
    pub(crate) fn tabulate<F>(universe: Universe, mut f: F) -> Self
    where
        F: FnMut(PointSet) -> ENNReal,
    {
        let values = universe.subsets().map(|set| f(set)).collect();
        Self::from_values_unchecked(universe, values)
    }

    /// Validates an explicit table of values, one per subset in mask order.
    pub fn from_table(
        universe: Universe,
        values: Vec<ENNReal>,
        tol: &Tolerance,
    ) -> Result<Self, MsrError> {
        if values.len() != universe.num_subsets() {
            return Err(MsrError::Outer(
                ErrorInfo::new("table-size", "outer measure table must cover every subset")
                    .with_context("expected", universe.num_subsets().to_string())
                    .with_context("actual", values.len().to_string()),
            ));
        }
        let mut outer = Self { universe, values };
        outer.check_axioms(tol)?;
        outer.values[0] = ENNReal::ZERO;
        Ok(outer)
    }

    /// The zero outer measure.
    pub fn zero(universe: Universe) -> Self {
        Self::tabulate(universe, |_| ENNReal::ZERO)
    }

    /// The top outer measure: `∞` on every non-empty set.
    pub fn top(universe: Universe) -> Self {
        Self::tabulate(universe, |set| {
            if set.is_empty() {
                ENNReal::ZERO
            } else {
                ENNReal::TOP
            }
        })
    }

    /// Universe the outer measure is defined on.
    pub fn universe(&self) -> Universe {
        self.universe
    }

    /// Evaluates `μ*(s)`. Points outside the universe are ignored.
    pub fn measure_of(&self, set: PointSet) -> ENNReal {
        self.values[set.inter(self.universe.full()).index()]
    }

    /// The full table of values in mask order.
    pub fn values(&self) -> &[ENNReal] {
        &self.values
    }

    /// Checks `μ*(∅) = 0`, monotonicity and subadditivity.
    ///
    /// Over a finite universe countable subadditivity reduces to
    /// `μ*(a ∪ b) ≤ μ*(a) + μ*(b)` for disjoint `a`, `b`, given monotonicity.
    pub fn check_axioms(&self, tol: &Tolerance) -> Result<(), MsrError> {
        let empty = self.values[0];
        if !empty.approx_eq(&ENNReal::ZERO, tol) {
            return Err(MsrError::Outer(
                ErrorInfo::new("invalid-outer-measure", "outer measure of the empty set must be 0")
                    .with_context("value", empty.to_string()),
            ));
        }
        for set in self.universe.subsets() {
            for point in self.universe.points().filter(|p| !set.contains(*p)) {
                let larger = set.union(PointSet::singleton(point));
                if !self.measure_of(set).approx_le(&self.measure_of(larger), tol) {
                    return Err(MsrError::Outer(
                        ErrorInfo::new("invalid-outer-measure", "outer measure is not monotone")
                            .with_context("set", set.to_string())
                            .with_context("superset", larger.to_string()),
                    ));
                }
            }
        }
        for a in self.universe.subsets() {
            for b in a.complement(&self.universe).subsets() {
                let joined = self.measure_of(a.union(b));
                let split = self.measure_of(a) + self.measure_of(b);
                if !joined.approx_le(&split, tol) {
                    return Err(MsrError::Outer(
                        ErrorInfo::new("invalid-outer-measure", "outer measure is not subadditive")
                            .with_context("left", a.to_string())
                            .with_context("right", b.to_string()),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Pointwise order `self ≤ other`.
    pub fn le(&self, other: &OuterMeasure) -> bool {
        self.universe == other.universe
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| a <= b)
    }

    /// Pointwise comparison up to the tolerance.
    pub fn approx_eq(&self, other: &OuterMeasure, tol: &Tolerance) -> bool {
        self.universe == other.universe
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| a.approx_eq(b, tol))
    }
}
