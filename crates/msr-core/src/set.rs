//! Finite universes, point sets and maps between universes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, MsrError};

/// Largest supported universe. Outer measures are stored as total tables over
/// the power set, so the table has `2^MAX_POINTS` entries.
pub const MAX_POINTS: u8 = 16;

/// Identifier of a point within a [`Universe`].
pub type Point = u8;

/// A finite universe `{0, …, size-1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Universe {
    size: u8,
}

impl TryFrom<u8> for Universe {
    type Error = MsrError;

    fn try_from(size: u8) -> Result<Self, Self::Error> {
        Universe::new(size)
    }
}

impl From<Universe> for u8 {
    fn from(value: Universe) -> Self {
        value.size
    }
}

impl Universe {
    /// Creates a universe with `size` points.
    pub fn new(size: u8) -> Result<Self, MsrError> {
        if size > MAX_POINTS {
            return Err(MsrError::Sigma(
                ErrorInfo::new("universe-too-large", "universe exceeds the supported size")
                    .with_context("size", size.to_string())
                    .with_context("max", MAX_POINTS.to_string()),
            ));
        }
        Ok(Self { size })
    }

    /// Number of points.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Number of subsets, `2^size`.
    pub fn num_subsets(&self) -> usize {
        1usize << self.size
    }

    /// The whole space.
    pub fn full(&self) -> PointSet {
        PointSet(((1u64 << self.size) - 1) as u32)
    }

    /// Iterates over every subset in increasing mask order.
    pub fn subsets(&self) -> impl Iterator<Item = PointSet> {
        (0..self.num_subsets()).map(|mask| PointSet(mask as u32))
    }

    /// Iterates over every point.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        0..self.size
    }

    /// Returns whether the point lies in the universe.
    pub fn contains_point(&self, point: Point) -> bool {
        point < self.size
    }

    /// Returns whether the set only mentions points of the universe.
    pub fn contains_set(&self, set: PointSet) -> bool {
        set.is_subset(self.full())
    }

    /// Rejects sets that mention points outside the universe.
    pub fn check_set(&self, set: PointSet) -> Result<(), MsrError> {
        if self.contains_set(set) {
            Ok(())
        } else {
            Err(MsrError::Sigma(
                ErrorInfo::new("set-out-of-universe", "set mentions points outside the universe")
                    .with_context("set", set.to_string())
                    .with_context("size", self.size.to_string()),
            ))
        }
    }

    /// Rejects a mismatch between two universes.
    pub fn check_same(&self, other: &Universe) -> Result<(), MsrError> {
        if self == other {
            Ok(())
        } else {
            Err(MsrError::Sigma(
                ErrorInfo::new("universe-mismatch", "operands live on different universes")
                    .with_context("left", self.size.to_string())
                    .with_context("right", other.size.to_string()),
            ))
        }
    }
}

/// A subset of a finite universe, stored as a bitmask.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointSet(u32);

impl PointSet {
    /// The empty set.
    pub const EMPTY: PointSet = PointSet(0);

    /// Creates a set from its raw mask.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw mask.
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Index of the set in a power-set table.
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// The singleton `{point}`; empty for points beyond the mask width.
    pub fn singleton(point: Point) -> Self {
        Self(1u32.checked_shl(u32::from(point)).unwrap_or(0))
    }

    /// Builds a set from a list of points.
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        points
            .into_iter()
            .fold(Self::EMPTY, |acc, point| acc.union(Self::singleton(point)))
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of points in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns whether the point belongs to the set.
    pub fn contains(&self, point: Point) -> bool {
        point < 32 && self.0 & (1u32 << point) != 0
    }

    /// Set union.
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Set intersection.
    pub fn inter(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Set difference `self \ other`.
    pub fn diff(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Symmetric difference.
    pub fn sym_diff(self, other: Self) -> Self {
        Self(self.0 ^ other.0)
    }

    /// Complement relative to the universe.
    pub fn complement(self, universe: &Universe) -> Self {
        universe.full().diff(self)
    }

    /// Returns whether `self ⊆ other`.
    pub fn is_subset(&self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Returns whether the sets share no point.
    pub fn is_disjoint(&self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    /// Smallest point of the set.
    pub fn lowest(&self) -> Option<Point> {
        if self.is_empty() {
            None
        } else {
            Some(self.0.trailing_zeros() as Point)
        }
    }

    /// Iterates over the points in increasing order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let bits = self.0;
        (0..32u8).filter(move |point| bits & (1u32 << point) != 0)
    }

    /// Iterates over every subset of `self`, including `∅` and `self`.
    pub fn subsets(&self) -> impl Iterator<Item = PointSet> {
        let full = self.0;
        let mut next = Some(0u32);
        std::iter::from_fn(move || {
            let current = next?;
            next = if current == full {
                None
            } else {
                Some((current.wrapping_sub(full)) & full)
            };
            Some(PointSet(current))
        })
    }
}

impl fmt::Debug for PointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for PointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, point) in self.points().enumerate() {
            if idx > 0 {
                write!(f, ",")?;
            }
            write!(f, "{point}")?;
        }
        write!(f, "}}")
    }
}

/// Disjointification: `tᵢ = sᵢ \ ⋃_{j<i} sⱼ`.
///
/// The result is pairwise disjoint, has the same union as the input, and
/// `⋃_{j≤i} tⱼ = ⋃_{j≤i} sⱼ` for every prefix.
pub fn disjointed(sets: &[PointSet]) -> Vec<PointSet> {
    let mut seen = PointSet::EMPTY;
    sets.iter()
        .map(|set| {
            let fresh = set.diff(seen);
            seen = seen.union(*set);
            fresh
        })
        .collect()
}

/// A total function between two finite universes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointMap {
    domain: Universe,
    codomain: Universe,
    images: Vec<Point>,
}

impl PointMap {
    /// Creates a map from the image of every domain point.
    pub fn new(domain: Universe, codomain: Universe, images: Vec<Point>) -> Result<Self, MsrError> {
        if images.len() != domain.size() as usize {
            return Err(MsrError::Sigma(
                ErrorInfo::new("map-arity", "map must assign an image to every domain point")
                    .with_context("expected", domain.size().to_string())
                    .with_context("actual", images.len().to_string()),
            ));
        }
        if let Some(bad) = images.iter().find(|image| !codomain.contains_point(**image)) {
            return Err(MsrError::Sigma(
                ErrorInfo::new("map-out-of-codomain", "image lies outside the codomain")
                    .with_context("image", bad.to_string())
                    .with_context("codomain", codomain.size().to_string()),
            ));
        }
        Ok(Self {
            domain,
            codomain,
            images,
        })
    }

    /// The identity map.
    pub fn identity(universe: Universe) -> Self {
        Self {
            domain: universe,
            codomain: universe,
            images: universe.points().collect(),
        }
    }

    /// The constant map onto `point`.
    pub fn constant(domain: Universe, codomain: Universe, point: Point) -> Result<Self, MsrError> {
        Self::new(domain, codomain, vec![point; domain.size() as usize])
    }

    /// Domain universe.
    pub fn domain(&self) -> Universe {
        self.domain
    }

    /// Codomain universe.
    pub fn codomain(&self) -> Universe {
        self.codomain
    }

    /// Image of a single point.
    pub fn apply(&self, point: Point) -> Point {
        self.images[point as usize]
    }

    /// Image `f(s)`.
    pub fn image(&self, set: PointSet) -> PointSet {
        PointSet::from_points(set.points().map(|point| self.apply(point)))
    }

    /// Preimage `f⁻¹(s)`.
    pub fn preimage(&self, set: PointSet) -> PointSet {
        PointSet::from_points(
            self.domain
                .points()
                .filter(|point| set.contains(self.apply(*point))),
        )
    }

    /// Composition `next ∘ self`.
    pub fn then(&self, next: &PointMap) -> Result<PointMap, MsrError> {
        self.codomain.check_same(&next.domain)?;
        Ok(PointMap {
            domain: self.domain,
            codomain: next.codomain,
            images: self.images.iter().map(|point| next.apply(*point)).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsets_enumerates_power_set() {
        let set = PointSet::from_points([0, 2, 3]);
        let subsets: Vec<_> = set.subsets().collect();
        assert_eq!(subsets.len(), 8);
        assert!(subsets.iter().all(|sub| sub.is_subset(set)));
        assert_eq!(subsets.first(), Some(&PointSet::EMPTY));
        assert_eq!(subsets.last(), Some(&set));
    }

    #[test]
    fn preimage_of_constant_map() {
        let universe = Universe::new(3).unwrap();
        let map = PointMap::constant(universe, universe, 1).unwrap();
        assert_eq!(map.preimage(PointSet::singleton(1)), universe.full());
        assert_eq!(map.preimage(PointSet::singleton(0)), PointSet::EMPTY);
    }

    #[test]
    fn display_lists_points() {
        assert_eq!(PointSet::from_points([2, 0]).to_string(), "{0,2}");
        assert_eq!(PointSet::EMPTY.to_string(), "{}");
    }

    #[test]
    fn disjointed_preserves_prefix_unions() {
        let sets = [
            PointSet::from_points([0, 1]),
            PointSet::from_points([1, 2]),
            PointSet::from_points([0, 3]),
        ];
        let pieces = disjointed(&sets);
        assert_eq!(
            pieces,
            vec![
                PointSet::from_points([0, 1]),
                PointSet::singleton(2),
                PointSet::singleton(3),
            ]
        );
    }

    #[test]
    fn singleton_beyond_mask_width_is_empty() {
        assert_eq!(PointSet::singleton(31).len(), 1);
        assert!(PointSet::singleton(32).is_empty());
        assert!(PointSet::singleton(Point::MAX).is_empty());
        assert!(!PointSet::singleton(40).contains(40));
    }

    #[test]
    fn universe_limit_enforced() {
        let err = Universe::new(MAX_POINTS + 1).unwrap_err();
        assert_eq!(err.code(), "universe-too-large");
    }
}
