//! Algebraic combinators on measures: sums, lattice operations, pushforward,
//! restriction, Dirac and counting measures.

use std::sync::Arc;

use msr_core::{ENNReal, MsrError, Point, PointMap, PointSet, SigmaAlgebra};
use msr_outer::OuterMeasure;

use crate::measure::Measure;
use crate::premeasure::Premeasure;

impl Measure {
    /// The zero measure, identity for `+` and bottom of the lattice.
    pub fn zero(sigma: Arc<SigmaAlgebra>) -> Measure {
        let outer = OuterMeasure::zero(sigma.universe());
        Measure::from_parts(outer, sigma)
    }

    /// The top measure: `∞` on every non-empty set.
    pub fn top(sigma: Arc<SigmaAlgebra>) -> Measure {
        let outer = OuterMeasure::top(sigma.universe());
        Measure::from_parts(outer, sigma)
    }

    /// Dirac measure at `point`.
    pub fn dirac(sigma: Arc<SigmaAlgebra>, point: Point) -> Result<Measure, MsrError> {
        let outer = OuterMeasure::dirac(sigma.universe(), point)?;
        Measure::trimmed_from(&outer, sigma)
    }

    /// Counting measure, the sum of the Dirac measures at every point.
    pub fn count(sigma: Arc<SigmaAlgebra>) -> Result<Measure, MsrError> {
        let diracs = sigma
            .universe()
            .points()
            .map(|point| Measure::dirac(sigma.clone(), point))
            .collect::<Result<Vec<_>, _>>()?;
        Measure::sum(sigma, &diracs)
    }

    /// `μ + ν`. Pointwise addition keeps both invariants.
    pub fn add(&self, other: &Measure) -> Result<Measure, MsrError> {
        self.sigma().check_same(other.sigma())?;
        let outer = self.to_outer_measure().add(other.to_outer_measure())?;
        Ok(Measure::from_parts(outer, self.sigma().clone()))
    }

    /// `c · μ`.
    pub fn smul(&self, factor: ENNReal) -> Measure {
        let outer = self.to_outer_measure().smul(factor);
        Measure::from_parts(outer, self.sigma().clone())
    }

    /// Countable sum of a family; the empty family gives zero.
    pub fn sum(sigma: Arc<SigmaAlgebra>, family: &[Measure]) -> Result<Measure, MsrError> {
        for measure in family {
            sigma.check_same(measure.sigma())?;
        }
        let outer = OuterMeasure::sum(
            sigma.universe(),
            family.iter().map(Measure::to_outer_measure),
        )?;
        Ok(Measure::from_parts(outer, sigma))
    }

    /// Binary infimum.
    pub fn inf(&self, other: &Measure) -> Result<Measure, MsrError> {
        Measure::inf_all(self.sigma().clone(), &[self.clone(), other.clone()])
    }

    /// Infimum of a family: the largest measure below every member.
    ///
    /// It agrees with the trimmed infimum of the underlying outer measures.
    /// Any cover of an atom pays at least the smallest mass a member gives it,
    /// so each atom receives that minimum. The empty family gives the top
    /// measure.
    pub fn inf_all(sigma: Arc<SigmaAlgebra>, family: &[Measure]) -> Result<Measure, MsrError> {
        for measure in family {
            sigma.check_same(measure.sigma())?;
        }
        if family.is_empty() {
            return Ok(Measure::top(sigma));
        }
        let weights: Vec<ENNReal> = sigma
            .atoms()
            .iter()
            .map(|atom| ENNReal::inf(family.iter().map(|measure| measure.measure_of(*atom))))
            .collect();
        let premeasure = Premeasure::from_atom_weights(sigma, &weights)?;
        Measure::of_measurable(&premeasure)
    }

    /// Binary supremum.
    pub fn sup(&self, other: &Measure) -> Result<Measure, MsrError> {
        Measure::sup_all(self.sigma().clone(), &[self.clone(), other.clone()])
    }

    /// Supremum of a family: the least measure above every member.
    ///
    /// The pointwise supremum of outer measures is not additive, so the least
    /// upper bound is built from the atoms instead: each atom receives the
    /// largest mass any member gives it. The empty family gives zero.
    pub fn sup_all(sigma: Arc<SigmaAlgebra>, family: &[Measure]) -> Result<Measure, MsrError> {
        for measure in family {
            sigma.check_same(measure.sigma())?;
        }
        let weights: Vec<ENNReal> = sigma
            .atoms()
            .iter()
            .map(|atom| ENNReal::sup(family.iter().map(|measure| measure.measure_of(*atom))))
            .collect();
        let premeasure = Premeasure::from_atom_weights(sigma, &weights)?;
        Measure::of_measurable(&premeasure)
    }

    /// Pushforward `f_* μ` onto `target`; zero when `f` is not measurable.
    pub fn map(&self, map: &PointMap, target: Arc<SigmaAlgebra>) -> Result<Measure, MsrError> {
        self.universe().check_same(&map.domain())?;
        target.universe().check_same(&map.codomain())?;
        if !self.sigma().is_measurable_map(map, &target) {
            tracing::debug!(
                domain = map.domain().size(),
                codomain = map.codomain().size(),
                "map is not measurable; pushforward is zero"
            );
            return Ok(Measure::zero(target));
        }
        let outer = self.to_outer_measure().map(map)?;
        Measure::trimmed_from(&outer, target)
    }

    /// Restriction `μ|_s`: `t ↦ μ(t ∩ s)`, trimmed.
    pub fn restrict(&self, set: PointSet) -> Result<Measure, MsrError> {
        let outer = self.to_outer_measure().restrict(set)?;
        Measure::trimmed_from(&outer, self.sigma().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msr_core::Universe;

    #[test]
    fn counting_measure_counts_points() {
        let sigma = Arc::new(SigmaAlgebra::powerset(Universe::new(4).unwrap()));
        let count = Measure::count(sigma).unwrap();
        assert_eq!(count.measure_of(PointSet::from_points([0, 2, 3])), ENNReal::from_u64(3));
        assert_eq!(count.measure_of(PointSet::EMPTY), ENNReal::ZERO);
    }

    #[test]
    fn dirac_on_coarse_sigma_charges_the_atom() {
        let u = Universe::new(3).unwrap();
        let sigma = Arc::new(
            SigmaAlgebra::from_partition(u, [PointSet::from_points([0, 1]), PointSet::singleton(2)])
                .unwrap(),
        );
        let dirac = Measure::dirac(sigma, 0).unwrap();
        // {1} is not measurable; its smallest measurable cover {0,1} contains 0.
        assert_eq!(dirac.measure_of(PointSet::singleton(1)), ENNReal::ONE);
        assert_eq!(dirac.measure_of(PointSet::singleton(2)), ENNReal::ZERO);
    }

    #[test]
    fn inf_agrees_with_the_trimmed_outer_infimum() {
        let u = Universe::new(4).unwrap();
        let sigma = Arc::new(
            SigmaAlgebra::from_partition(
                u,
                [PointSet::from_points([0, 1]), PointSet::singleton(2), PointSet::singleton(3)],
            )
            .unwrap(),
        );
        let mu = Measure::of_measurable(
            &Premeasure::from_atom_weights(sigma.clone(), &[ENNReal::from_u64(3), ENNReal::ONE, ENNReal::ZERO])
                .unwrap(),
        )
        .unwrap();
        let nu = Measure::of_measurable(
            &Premeasure::from_atom_weights(sigma.clone(), &[ENNReal::ONE, ENNReal::from_u64(4), ENNReal::TOP])
                .unwrap(),
        )
        .unwrap();
        let inf = mu.inf(&nu).unwrap();
        let outer = OuterMeasure::inf_all(u, [mu.to_outer_measure(), nu.to_outer_measure()])
            .unwrap()
            .trim(&sigma)
            .unwrap();
        assert_eq!(inf.to_outer_measure(), &outer);
        assert_eq!(inf.measure_of(u.full()), ENNReal::from_u64(2));
        assert!(inf.le(&mu).unwrap() && inf.le(&nu).unwrap());
        assert_eq!(Measure::inf_all(sigma.clone(), &[]).unwrap(), Measure::top(sigma));
    }
}
