use std::sync::Arc;

use msr_core::{ENNReal, ErrorInfo, MsrError, PointSet, SigmaAlgebra, Tolerance, Universe};
use msr_outer::OuterMeasure;

use crate::premeasure::Premeasure;

/// An outer measure that is countably additive on its sigma-algebra and
/// trimmed: `μ(s) = inf { μ(t) : t ⊇ s, t measurable }` for every `s`.
///
/// The sigma-algebra is shared configuration; a measure only holds a handle to
/// it. Measures are immutable and every combinator returns a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    sigma: Arc<SigmaAlgebra>,
    outer: OuterMeasure,
}

/// Promotes an outer measure to a measure once its Caratheodory sets are
/// known to contain the sigma-algebra.
pub trait ToMeasure {
    /// Checks that every measurable set satisfies the Caratheodory criterion
    /// and returns the trimmed measure. Fails with `not-caratheodory` otherwise.
    fn to_measure(&self, sigma: Arc<SigmaAlgebra>, tol: &Tolerance) -> Result<Measure, MsrError>;
}

impl ToMeasure for OuterMeasure {
    fn to_measure(&self, sigma: Arc<SigmaAlgebra>, tol: &Tolerance) -> Result<Measure, MsrError> {
        self.contains_sigma(&sigma, tol)?;
        tracing::debug!(
            universe = sigma.universe().size(),
            atoms = sigma.atoms().len(),
            "caratheodory containment verified"
        );
        Measure::trimmed_from(self, sigma)
    }
}

impl Measure {
    /// Canonical extension of a premeasure: the cover construction seeded by
    /// the premeasure, on the premeasure's own sigma-algebra.
    ///
    /// An additive premeasure is determined by its atoms and no cover beats
    /// the atoms a set meets, so the seed is the premeasure on the atoms. On
    /// measurable sets the result agrees with the premeasure up to the
    /// tolerance it was validated with.
    pub fn of_measurable(premeasure: &Premeasure) -> Result<Measure, MsrError> {
        let sigma = premeasure.sigma().clone();
        let outer = OuterMeasure::from_atom_weights(&sigma, &premeasure.atom_weights())?;
        let measure = Measure::from_parts(outer, sigma);
        debug_assert!(premeasure.sigma().members().iter().all(|set| measure
            .measure_of(*set)
            .approx_eq(&premeasure.value(*set), premeasure.tolerance())));
        Ok(measure)
    }

    /// Wraps an outer measure already known to be additive and trimmed.
    pub(crate) fn from_parts(outer: OuterMeasure, sigma: Arc<SigmaAlgebra>) -> Measure {
        debug_assert_eq!(outer.universe(), sigma.universe());
        Measure { sigma, outer }
    }

    /// Trims an outer measure whose Caratheodory sets contain `sigma`.
    pub(crate) fn trimmed_from(outer: &OuterMeasure, sigma: Arc<SigmaAlgebra>) -> Result<Measure, MsrError> {
        let trimmed = outer.trim_additive(&sigma)?;
        Ok(Measure::from_parts(trimmed, sigma))
    }

    /// Sigma-algebra of the measure.
    pub fn sigma(&self) -> &Arc<SigmaAlgebra> {
        &self.sigma
    }

    /// Universe of the measure.
    pub fn universe(&self) -> Universe {
        self.sigma.universe()
    }

    /// Evaluates `μ(s)` for any set; non-measurable sets get the value of
    /// their measurable hull.
    pub fn measure_of(&self, set: PointSet) -> ENNReal {
        self.outer.measure_of(set)
    }

    /// Returns whether the set is measurable for this measure.
    pub fn is_measurable(&self, set: PointSet) -> bool {
        self.sigma.is_measurable(set)
    }

    /// The underlying outer measure.
    pub fn to_outer_measure(&self) -> &OuterMeasure {
        &self.outer
    }

    /// Mass of each atom, in atom order.
    pub fn atom_weights(&self) -> Vec<ENNReal> {
        self.sigma
            .atoms()
            .iter()
            .map(|atom| self.measure_of(*atom))
            .collect()
    }

    /// Re-checks additivity on the sigma-algebra and trimmedness.
    pub fn check_invariants(&self, tol: &Tolerance) -> Result<(), MsrError> {
        self.outer.contains_sigma(&self.sigma, tol)?;
        if !self.outer.is_trimmed(&self.sigma, tol)? {
            return Err(MsrError::Measure(ErrorInfo::new(
                "not-trimmed",
                "measure differs from its measurable-cover approximation",
            )));
        }
        Ok(())
    }

    /// Order on measures: `μ ≤ ν` on every measurable set.
    pub fn le(&self, other: &Measure) -> Result<bool, MsrError> {
        self.sigma.check_same(&other.sigma)?;
        Ok(self
            .sigma
            .atoms()
            .iter()
            .all(|atom| self.measure_of(*atom) <= other.measure_of(*atom)))
    }

    /// Agreement on every measurable set up to the tolerance.
    pub fn approx_eq(&self, other: &Measure, tol: &Tolerance) -> bool {
        self.sigma == other.sigma && self.outer.approx_eq(&other.outer, tol)
    }

    /// `μ(s) = 0`.
    pub fn is_null(&self, set: PointSet) -> bool {
        self.measure_of(set).is_zero()
    }

    /// A property holding on `set` holds almost everywhere: `μ(setᶜ) = 0`.
    pub fn ae(&self, set: PointSet) -> bool {
        self.is_null(set.complement(&self.universe()))
    }

    /// Sets equal almost everywhere: their symmetric difference is null.
    pub fn ae_eq(&self, left: PointSet, right: PointSet) -> bool {
        self.is_null(left.sym_diff(right))
    }

    /// A measurable superset with the same measure.
    ///
    /// This is the smallest measurable cover, i.e. the intersection of every
    /// measurable superset, which is the limit of any decreasing sequence of
    /// measurable covers whose measures converge to `μ(s)`.
    pub fn to_measurable(&self, set: PointSet) -> PointSet {
        let cover = self.sigma.measurable_hull(set);
        debug_assert_eq!(self.measure_of(cover), self.measure_of(set));
        cover
    }

    /// `μ(α) < ∞`.
    pub fn is_finite(&self) -> bool {
        !self.measure_of(self.universe().full()).is_top()
    }

    /// `μ(α) = 1`.
    pub fn is_probability(&self) -> bool {
        self.measure_of(self.universe().full()) == ENNReal::ONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_points() -> Arc<SigmaAlgebra> {
        Arc::new(SigmaAlgebra::powerset(Universe::new(3).unwrap()))
    }

    #[test]
    fn of_measurable_agrees_with_premeasure() {
        let sigma = three_points();
        let weights = [1u32, 2, 3].map(ENNReal::from);
        let premeasure = Premeasure::from_atom_weights(sigma.clone(), &weights).unwrap();
        let measure = Measure::of_measurable(&premeasure).unwrap();
        for set in sigma.members() {
            assert_eq!(measure.measure_of(*set), premeasure.value(*set));
        }
        measure.check_invariants(&Tolerance::exact()).unwrap();
    }

    #[test]
    fn of_measurable_is_the_cover_construction_of_the_premeasure() {
        let u = Universe::new(4).unwrap();
        let sigma = Arc::new(
            SigmaAlgebra::from_partition(
                u,
                [PointSet::from_points([0, 2]), PointSet::singleton(1), PointSet::singleton(3)],
            )
            .unwrap(),
        );
        let weights = [ENNReal::from_u64(3), ENNReal::ZERO, ENNReal::TOP];
        let premeasure = Premeasure::from_atom_weights(sigma, &weights).unwrap();
        let seeded = OuterMeasure::of_function(&premeasure.seed().unwrap()).unwrap();
        let measure = Measure::of_measurable(&premeasure).unwrap();
        assert_eq!(measure.to_outer_measure(), &seeded);
        assert_eq!(measure.measure_of(PointSet::singleton(2)), ENNReal::from_u64(3));
    }

    #[test]
    fn of_measurable_accepts_float_premeasures() {
        let sigma = three_points();
        let masses = [0.1, 0.2, 0.3];
        let tol = Tolerance::default();
        let premeasure = Premeasure::from_fn(
            sigma.clone(),
            |set| ENNReal::finite(set.points().map(|p| masses[p as usize]).sum()).unwrap(),
            &tol,
        )
        .unwrap();
        let measure = Measure::of_measurable(&premeasure).unwrap();
        for set in sigma.members() {
            assert!(measure.measure_of(*set).approx_eq(&premeasure.value(*set), &tol));
        }
        assert!(measure
            .measure_of(sigma.universe().full())
            .approx_eq(&ENNReal::finite(0.6).unwrap(), &tol));
        measure.check_invariants(&tol).unwrap();
    }

    #[test]
    fn to_measure_rejects_non_caratheodory_sigma() {
        let sigma = three_points();
        let u = sigma.universe();
        let values = u
            .subsets()
            .map(|s| if s.is_empty() { ENNReal::ZERO } else { ENNReal::ONE })
            .collect();
        let outer = OuterMeasure::from_table(u, values, &Tolerance::exact()).unwrap();
        let err = outer.to_measure(sigma, &Tolerance::exact()).unwrap_err();
        assert_eq!(err.code(), "not-caratheodory");
    }

    #[test]
    fn ae_ignores_null_points() {
        let sigma = three_points();
        let weights = [1u32, 1, 0].map(ENNReal::from);
        let measure =
            Measure::of_measurable(&Premeasure::from_atom_weights(sigma, &weights).unwrap()).unwrap();
        assert!(measure.ae(PointSet::from_points([0, 1])));
        assert!(!measure.ae(PointSet::from_points([0, 2])));
        assert!(measure.ae_eq(PointSet::singleton(0), PointSet::from_points([0, 2])));
        assert!(measure.is_finite());
        assert!(!measure.is_probability());
    }
}
