//! Caratheodory's splitting criterion and the sigma-algebra it induces.

use msr_core::{disjointed, ENNReal, ErrorInfo, MsrError, PointSet, SigmaAlgebra, Tolerance};

use crate::outer::OuterMeasure;

impl OuterMeasure {
    /// Returns whether `set` splits every test set additively:
    /// `μ*(A) = μ*(A ∩ E) + μ*(A \ E)` for all `A`.
    ///
    /// Subadditivity already gives `≤`, so only `≥` is checked.
    pub fn is_caratheodory(&self, set: PointSet, tol: &Tolerance) -> bool {
        self.splitting_witness(set, tol).is_none()
    }

    /// First test set on which `set` fails to split, if any.
    fn splitting_witness(&self, set: PointSet, tol: &Tolerance) -> Option<PointSet> {
        self.universe().subsets().find(|test| {
            let whole = self.measure_of(*test);
            let split = self.measure_of(test.inter(set)) + self.measure_of(test.diff(set));
            !split.approx_le(&whole, tol)
        })
    }

    /// The family of Caratheodory sets, which is a sigma-algebra for every
    /// outer measure.
    pub fn caratheodory(&self, tol: &Tolerance) -> Result<SigmaAlgebra, MsrError> {
        let universe = self.universe();
        let members: Vec<PointSet> = universe
            .subsets()
            .filter(|set| self.is_caratheodory(*set, tol))
            .collect();
        tracing::debug!(
            universe = universe.size(),
            members = members.len(),
            "collected caratheodory sets"
        );
        SigmaAlgebra::from_sets(universe, members).map_err(|err| {
            MsrError::Outer(
                ErrorInfo::new(
                    "caratheodory-not-closed",
                    "caratheodory family failed sigma-algebra closure",
                )
                .with_context("cause", err.to_string())
                .with_hint("tolerance is too loose for the data"),
            )
        })
    }

    /// Checks that every measurable set of `sigma` satisfies the criterion.
    ///
    /// The Caratheodory sets form a sigma-algebra, so checking the atoms is
    /// enough.
    pub fn contains_sigma(&self, sigma: &SigmaAlgebra, tol: &Tolerance) -> Result<(), MsrError> {
        self.universe().check_same(&sigma.universe())?;
        for atom in sigma.atoms() {
            if let Some(test) = self.splitting_witness(*atom, tol) {
                return Err(MsrError::Outer(
                    ErrorInfo::new("not-caratheodory", "measurable set does not split a test set")
                        .with_context("set", atom.to_string())
                        .with_context("test", test.to_string()),
                ));
            }
        }
        Ok(())
    }

    /// Checks `μ*(⋃ sᵢ) = Σ μ*(sᵢ)` for a pairwise disjoint family.
    pub fn is_additive_on(&self, family: &[PointSet], tol: &Tolerance) -> Result<bool, MsrError> {
        if disjointed(family) != family {
            return Err(MsrError::Outer(ErrorInfo::new(
                "not-disjoint",
                "additivity is only defined for pairwise disjoint families",
            )));
        }
        let union = family.iter().fold(PointSet::EMPTY, |acc, set| acc.union(*set));
        let total = ENNReal::tsum(family.iter().map(|set| self.measure_of(*set)));
        Ok(self.measure_of(union).approx_eq(&total, tol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msr_core::Universe;

    #[test]
    fn every_set_is_caratheodory_for_a_dirac() {
        let u = Universe::new(3).unwrap();
        let dirac = OuterMeasure::dirac(u, 1).unwrap();
        let sigma = dirac.caratheodory(&Tolerance::exact()).unwrap();
        assert_eq!(sigma, SigmaAlgebra::powerset(u));
    }

    #[test]
    fn non_additive_outer_measure_shrinks_the_family() {
        // μ*(s) = 1 for every non-empty s: only ∅ and the whole space split.
        let u = Universe::new(2).unwrap();
        let values = u
            .subsets()
            .map(|s| if s.is_empty() { ENNReal::ZERO } else { ENNReal::ONE })
            .collect();
        let outer = OuterMeasure::from_table(u, values, &Tolerance::exact()).unwrap();
        let sigma = outer.caratheodory(&Tolerance::exact()).unwrap();
        assert_eq!(sigma, SigmaAlgebra::trivial(u));
        let err = outer
            .contains_sigma(&SigmaAlgebra::powerset(u), &Tolerance::exact())
            .unwrap_err();
        assert_eq!(err.code(), "not-caratheodory");
    }

    #[test]
    fn overlapping_family_is_rejected() {
        let u = Universe::new(2).unwrap();
        let outer = OuterMeasure::zero(u);
        let err = outer
            .is_additive_on(&[u.full(), PointSet::singleton(0)], &Tolerance::exact())
            .unwrap_err();
        assert_eq!(err.code(), "not-disjoint");
    }
}
