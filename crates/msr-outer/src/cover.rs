//! The cover-and-sum construction of outer measures from seed data.
//!
//! `of_function(c)(s)` is the infimum of `Σ c(tᵢ)` over countable covers
//! `s ⊆ ⋃ tᵢ`. Over a finite universe a countable cover has finitely many
//! distinct members and repeating a member never lowers a sum of non-negative
//! terms, so the infimum is attained by a cover of distinct seeds. It is then
//! computed exactly by the recursion
//!
//! ```text
//! μ*(∅) = 0
//! μ*(s) = min { c(t) + μ*(s \ t) : t seed, min(s) ∈ t }
//! ```
//!
//! since whichever cover member contains the smallest point of `s` can be
//! peeled off first.

use std::collections::BTreeMap;

use msr_core::{ENNReal, ErrorInfo, MsrError, PointSet, SigmaAlgebra, Universe};

use crate::outer::OuterMeasure;

/// Partial seed data for the cover construction.
///
/// Sets without an explicit value are treated as `∞`, which is the same as
/// excluding them from covers. The empty set defaults to `0`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedFunction {
    universe: Universe,
    seeds: BTreeMap<PointSet, ENNReal>,
}

impl SeedFunction {
    /// Creates a seed with no informative sets.
    pub fn new(universe: Universe) -> Self {
        Self {
            universe,
            seeds: BTreeMap::new(),
        }
    }

    /// Assigns a value to a set.
    pub fn with(mut self, set: PointSet, value: ENNReal) -> Result<Self, MsrError> {
        self.insert(set, value)?;
        Ok(self)
    }

    /// Assigns a value to a set in place.
    pub fn insert(&mut self, set: PointSet, value: ENNReal) -> Result<(), MsrError> {
        self.universe.check_set(set)?;
        self.seeds.insert(set, value);
        Ok(())
    }

    /// Seed defined on the listed sets by `f`.
    pub fn from_fn<I, F>(universe: Universe, domain: I, mut f: F) -> Result<Self, MsrError>
    where
        I: IntoIterator<Item = PointSet>,
        F: FnMut(PointSet) -> ENNReal,
    {
        let mut seed = Self::new(universe);
        for set in domain {
            let value = f(set);
            seed.insert(set, value)?;
        }
        Ok(seed)
    }

    /// Seed defined on every subset by `f`.
    pub fn total<F>(universe: Universe, mut f: F) -> Self
    where
        F: FnMut(PointSet) -> ENNReal,
    {
        Self {
            universe,
            seeds: universe.subsets().map(|set| (set, f(set))).collect(),
        }
    }

    /// Universe of the seed.
    pub fn universe(&self) -> Universe {
        self.universe
    }

    /// Seed value: the explicit value, `0` for `∅`, `∞` otherwise.
    pub fn value(&self, set: PointSet) -> ENNReal {
        match self.seeds.get(&set) {
            Some(value) => *value,
            None if set.is_empty() => ENNReal::ZERO,
            None => ENNReal::TOP,
        }
    }

    /// Returns whether the set carries an explicit value.
    pub fn is_defined(&self, set: PointSet) -> bool {
        self.seeds.contains_key(&set)
    }

    /// Iterates over the explicit `(set, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PointSet, ENNReal)> + '_ {
        self.seeds.iter().map(|(set, value)| (*set, *value))
    }

    fn informative(&self) -> Vec<(PointSet, ENNReal)> {
        self.iter()
            .filter(|(set, value)| !set.is_empty() && !value.is_top())
            .collect()
    }
}

impl OuterMeasure {
    /// The largest outer measure bounded above by the seed, via the cover construction.
    ///
    /// Requires `c(∅) = 0`.
    pub fn of_function(seed: &SeedFunction) -> Result<OuterMeasure, MsrError> {
        let empty = seed.value(PointSet::EMPTY);
        if !empty.is_zero() {
            return Err(MsrError::Outer(
                ErrorInfo::new("seed-empty-nonzero", "seed must vanish on the empty set")
                    .with_context("value", empty.to_string())
                    .with_hint("use bounded_by to ignore the value on the empty set"),
            ));
        }
        Ok(cover_infimum(seed.universe(), &seed.informative()))
    }

    /// Like [`OuterMeasure::of_function`] but ignores the seed value on `∅`.
    ///
    /// The result is the largest outer measure `μ*` with `μ*(s) ≤ c(s)` for every
    /// non-empty `s`.
    pub fn bounded_by(seed: &SeedFunction) -> OuterMeasure {
        cover_infimum(seed.universe(), &seed.informative())
    }

    /// The cover construction seeded by one mass per atom of `sigma`, in atom order.
    ///
    /// Atoms partition the universe, so each point lies in exactly one seed and
    /// the cheapest cover of `s` is the family of atoms meeting it:
    /// `μ*(s) = Σ { w(a) : a ∩ s ≠ ∅ }`. Masses are summed in atom order.
    pub fn from_atom_weights(
        sigma: &SigmaAlgebra,
        weights: &[ENNReal],
    ) -> Result<OuterMeasure, MsrError> {
        let atoms = sigma.atoms();
        if weights.len() != atoms.len() {
            return Err(MsrError::Outer(
                ErrorInfo::new("atom-weight-count", "one weight is required per atom")
                    .with_context("atoms", atoms.len().to_string())
                    .with_context("weights", weights.len().to_string()),
            ));
        }
        let mut sums = vec![ENNReal::ZERO; 1usize << atoms.len()];
        for mask in 1..sums.len() {
            let high = highest_bit(mask);
            sums[mask] = sums[mask ^ (1 << high)] + weights[high];
        }
        let values = hull_masks(sigma).into_iter().map(|mask| sums[mask]).collect();
        Ok(OuterMeasure::from_values_unchecked(sigma.universe(), values))
    }
}

pub(crate) fn highest_bit(mask: usize) -> usize {
    (usize::BITS - 1 - mask.leading_zeros()) as usize
}

/// For every subset, the mask of atom indices its measurable hull is made of.
pub(crate) fn hull_masks(sigma: &SigmaAlgebra) -> Vec<usize> {
    let universe = sigma.universe();
    let mut point_bits = vec![0usize; universe.size() as usize];
    for (idx, atom) in sigma.atoms().iter().enumerate() {
        for point in atom.points() {
            point_bits[point as usize] = 1 << idx;
        }
    }
    let mut masks = vec![0usize; universe.num_subsets()];
    for set in 1..masks.len() {
        let low = set.trailing_zeros() as usize;
        masks[set] = masks[set & (set - 1)] | point_bits[low];
    }
    masks
}

/// Cheapest partition of every mask into pieces priced by `costs`.
///
/// Equals the cover infimum whenever `costs` is monotone: a cover can be cut
/// down to disjoint pieces of the covered mask without raising its price.
/// Runs in `O(3^k)` for `2^k` masks.
pub(crate) fn partition_infimum(costs: &[ENNReal]) -> Vec<ENNReal> {
    let mut best = vec![ENNReal::TOP; costs.len()];
    if let Some(first) = best.first_mut() {
        *first = ENNReal::ZERO;
    }
    for mask in 1..costs.len() {
        let low = mask & mask.wrapping_neg();
        let rest = mask ^ low;
        let mut sub = rest;
        let mut value = ENNReal::TOP;
        loop {
            let piece = sub | low;
            value = value.min(costs[piece] + best[mask ^ piece]);
            if sub == 0 {
                break;
            }
            sub = (sub - 1) & rest;
        }
        best[mask] = value;
    }
    best
}

/// Computes the cover infimum for every subset of the universe.
pub(crate) fn cover_infimum(universe: Universe, seeds: &[(PointSet, ENNReal)]) -> OuterMeasure {
    let size = universe.size() as usize;
    let mut by_point: Vec<Vec<(PointSet, ENNReal)>> = vec![Vec::new(); size];
    for (set, value) in seeds {
        for point in set.points() {
            by_point[point as usize].push((*set, *value));
        }
    }

    let mut values = vec![ENNReal::TOP; universe.num_subsets()];
    values[0] = ENNReal::ZERO;
    for mask in 1..universe.num_subsets() {
        let set = PointSet::from_bits(mask as u32);
        let Some(low) = set.lowest() else {
            continue;
        };
        // `rest` always drops `low`, so it precedes `mask` and is already final.
        let best = by_point[low as usize]
            .iter()
            .map(|(seed, cost)| *cost + values[set.diff(*seed).index()])
            .fold(ENNReal::TOP, ENNReal::min);
        values[mask] = best;
    }

    tracing::debug!(
        universe = universe.size(),
        seeds = seeds.len(),
        "cover construction complete"
    );
    OuterMeasure::from_values_unchecked(universe, values)
}
