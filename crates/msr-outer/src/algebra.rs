//! Lattice and module structure on outer measures, plus pushforward and restriction.

use msr_core::{ENNReal, MsrError, Point, PointMap, PointSet, Universe};

use crate::cover::partition_infimum;
use crate::outer::{outer_error, OuterMeasure};

impl OuterMeasure {
    /// Dirac outer measure at `point`: `1` on sets containing it, `0` otherwise.
    pub fn dirac(universe: Universe, point: Point) -> Result<OuterMeasure, MsrError> {
        if !universe.contains_point(point) {
            return Err(outer_error(
                "point-out-of-universe",
                format!("point {point} is outside the universe"),
            ));
        }
        Ok(Self::tabulate(universe, |set| {
            if set.contains(point) {
                ENNReal::ONE
            } else {
                ENNReal::ZERO
            }
        }))
    }

    /// Pointwise sum.
    pub fn add(&self, other: &OuterMeasure) -> Result<OuterMeasure, MsrError> {
        self.universe().check_same(&other.universe())?;
        Ok(Self::tabulate(self.universe(), |set| {
            self.measure_of(set) + other.measure_of(set)
        }))
    }

    /// Scalar multiple `c · μ*`.
    pub fn smul(&self, factor: ENNReal) -> OuterMeasure {
        Self::tabulate(self.universe(), |set| factor * self.measure_of(set))
    }

    /// Countable pointwise sum of a family; the empty family sums to zero.
    pub fn sum<'a, I>(universe: Universe, family: I) -> Result<OuterMeasure, MsrError>
    where
        I: IntoIterator<Item = &'a OuterMeasure>,
    {
        let family: Vec<&OuterMeasure> = family.into_iter().collect();
        for outer in &family {
            universe.check_same(&outer.universe())?;
        }
        Ok(Self::tabulate(universe, |set| {
            ENNReal::tsum(family.iter().map(|outer| outer.measure_of(set)))
        }))
    }

    /// Binary supremum, which is the pointwise maximum.
    pub fn sup(&self, other: &OuterMeasure) -> Result<OuterMeasure, MsrError> {
        Self::sup_all(self.universe(), [self, other])
    }

    /// Supremum of a family, computed pointwise; the empty family gives zero.
    pub fn sup_all<'a, I>(universe: Universe, family: I) -> Result<OuterMeasure, MsrError>
    where
        I: IntoIterator<Item = &'a OuterMeasure>,
    {
        let family: Vec<&OuterMeasure> = family.into_iter().collect();
        for outer in &family {
            universe.check_same(&outer.universe())?;
        }
        Ok(Self::tabulate(universe, |set| {
            ENNReal::sup(family.iter().map(|outer| outer.measure_of(set)))
        }))
    }

    /// Binary infimum.
    pub fn inf(&self, other: &OuterMeasure) -> Result<OuterMeasure, MsrError> {
        Self::inf_all(self.universe(), [self, other])
    }

    /// Infimum of a family: the cover construction applied to the pointwise
    /// minimum. The pointwise minimum itself is not subadditive in general.
    /// It is monotone, so covers only need disjoint pieces of the covered set.
    /// The empty family gives the top outer measure.
    pub fn inf_all<'a, I>(universe: Universe, family: I) -> Result<OuterMeasure, MsrError>
    where
        I: IntoIterator<Item = &'a OuterMeasure>,
    {
        let family: Vec<&OuterMeasure> = family.into_iter().collect();
        for outer in &family {
            universe.check_same(&outer.universe())?;
        }
        let costs: Vec<ENNReal> = universe
            .subsets()
            .map(|set| {
                if set.is_empty() {
                    ENNReal::ZERO
                } else {
                    ENNReal::inf(family.iter().map(|outer| outer.measure_of(set)))
                }
            })
            .collect();
        Ok(Self::from_values_unchecked(universe, partition_infimum(&costs)))
    }

    /// Pushforward along `map`: `(f_* μ*)(s) = μ*(f⁻¹ s)` on the codomain.
    pub fn map(&self, map: &PointMap) -> Result<OuterMeasure, MsrError> {
        self.universe().check_same(&map.domain())?;
        Ok(Self::tabulate(map.codomain(), |set| {
            self.measure_of(map.preimage(set))
        }))
    }

    /// Pullback along `map`: `(f^* μ*)(s) = μ*(f(s))` on the domain.
    pub fn comap(&self, map: &PointMap) -> Result<OuterMeasure, MsrError> {
        self.universe().check_same(&map.codomain())?;
        Ok(Self::tabulate(map.domain(), |set| {
            self.measure_of(map.image(set))
        }))
    }

    /// Restriction to `s`: `t ↦ μ*(t ∩ s)`.
    pub fn restrict(&self, set: PointSet) -> Result<OuterMeasure, MsrError> {
        self.universe().check_set(set)?;
        Ok(Self::tabulate(self.universe(), |t| self.measure_of(t.inter(set))))
    }
}
