//! Null-measurable sets and the completion of a measure.
//!
//! A set is null-measurable when it differs from a measurable set by a subset
//! of a null set. For a trimmed measure on a finite universe every non-empty
//! subset of a positive atom already has positive measure, so the null sets are
//! exactly the subsets of the union of the null atoms. The null-measurable
//! sigma-algebra is then the one whose atoms are the positive atoms together
//! with every point of a null atom.

use std::sync::Arc;

use msr_core::{ErrorInfo, MsrError, PointSet, SigmaAlgebra};

use crate::measure::Measure;

impl Measure {
    /// Union of the atoms of measure zero.
    pub fn null_part(&self) -> PointSet {
        self.sigma()
            .atoms()
            .iter()
            .filter(|atom| self.measure_of(**atom).is_zero())
            .fold(PointSet::EMPTY, |acc, atom| acc.union(*atom))
    }

    /// `s` is null-measurable iff `s \ kernel(s)` is null.
    pub fn is_null_measurable(&self, set: PointSet) -> bool {
        let kernel = self.sigma().measurable_kernel(set);
        self.is_null(set.diff(kernel))
    }

    /// Splits a null-measurable set as `s = t ∪ z` with `t` measurable and
    /// `z` null, disjoint from `t`. Returns `None` for other sets.
    pub fn null_measurable_split(&self, set: PointSet) -> Option<(PointSet, PointSet)> {
        let kernel = self.sigma().measurable_kernel(set);
        let rest = set.diff(kernel);
        self.is_null(rest).then_some((kernel, rest))
    }

    /// A measurable null set containing `set`.
    pub fn measurable_null_cover(&self, set: PointSet) -> Result<PointSet, MsrError> {
        if !self.is_null(set) {
            return Err(MsrError::Measure(
                ErrorInfo::new("not-null", "set has positive measure")
                    .with_context("set", set.to_string())
                    .with_context("measure", self.measure_of(set).to_string()),
            ));
        }
        Ok(self.to_measurable(set))
    }

    /// The sigma-algebra of null-measurable sets.
    pub fn null_measurable_sigma(&self) -> Result<SigmaAlgebra, MsrError> {
        let null = self.null_part();
        let blocks: Vec<PointSet> = self
            .sigma()
            .atoms()
            .iter()
            .filter(|atom| !atom.is_subset(null))
            .copied()
            .chain(null.points().map(PointSet::singleton))
            .collect();
        SigmaAlgebra::from_partition(self.universe(), blocks)
    }

    /// The completion: the same outer measure on the null-measurable sets.
    ///
    /// Every null-measurable set has the measure of its measurable part, and
    /// its smallest null-measurable cover keeps that measure, so the outer
    /// measure stays trimmed on the finer sigma-algebra.
    pub fn completion(&self) -> Result<Measure, MsrError> {
        let sigma = Arc::new(self.null_measurable_sigma()?);
        tracing::debug!(
            atoms = self.sigma().atoms().len(),
            completed_atoms = sigma.atoms().len(),
            "completed measure"
        );
        Ok(Measure::from_parts(self.to_outer_measure().clone(), sigma))
    }

    /// Every subset of a null set is measurable.
    pub fn is_complete(&self) -> bool {
        self.null_part()
            .points()
            .all(|point| self.is_measurable(PointSet::singleton(point)))
    }
}
