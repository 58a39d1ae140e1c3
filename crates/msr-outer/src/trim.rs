//! Trimming: the measurable-cover approximation of an outer measure.

use msr_core::{ENNReal, MsrError, PointSet, SigmaAlgebra, Tolerance};

use crate::cover::{highest_bit, hull_masks, partition_infimum};
use crate::outer::OuterMeasure;

impl OuterMeasure {
    /// Reapplies the cover construction with only measurable sets as seeds.
    ///
    /// A measurable cover of `s` also covers its measurable hull, so the
    /// infimum is taken over partitions of the hull's atoms and then read back
    /// per subset. `μ* ≤ trim(μ*)` everywhere, with equality on measurable sets
    /// whenever the measurable sets are Caratheodory for `μ*`; `trim` is
    /// idempotent.
    pub fn trim(&self, sigma: &SigmaAlgebra) -> Result<OuterMeasure, MsrError> {
        self.universe().check_same(&sigma.universe())?;
        let atoms = sigma.atoms();
        let mut unions = vec![PointSet::EMPTY; 1usize << atoms.len()];
        for mask in 1..unions.len() {
            let high = highest_bit(mask);
            unions[mask] = unions[mask ^ (1 << high)].union(atoms[high]);
        }
        let costs: Vec<ENNReal> = unions.iter().map(|set| self.measure_of(*set)).collect();
        let best = partition_infimum(&costs);
        tracing::debug!(
            universe = self.universe().size(),
            atoms = atoms.len(),
            "trimming outer measure"
        );
        let values = hull_masks(sigma).into_iter().map(|mask| best[mask]).collect();
        Ok(OuterMeasure::from_values_unchecked(self.universe(), values))
    }

    /// Trim of an outer measure already additive on `sigma`.
    ///
    /// Additivity makes the measurable hull the cheapest measurable cover, so
    /// every set is charged the mass of the atoms it meets. Callers must have
    /// established additivity, e.g. through [`OuterMeasure::contains_sigma`].
    pub fn trim_additive(&self, sigma: &SigmaAlgebra) -> Result<OuterMeasure, MsrError> {
        self.universe().check_same(&sigma.universe())?;
        let weights: Vec<ENNReal> = sigma
            .atoms()
            .iter()
            .map(|atom| self.measure_of(*atom))
            .collect();
        OuterMeasure::from_atom_weights(sigma, &weights)
    }

    /// Returns whether `trim(μ*) = μ*` up to the tolerance.
    pub fn is_trimmed(&self, sigma: &SigmaAlgebra, tol: &Tolerance) -> Result<bool, MsrError> {
        Ok(self.trim(sigma)?.approx_eq(self, tol))
    }
}
