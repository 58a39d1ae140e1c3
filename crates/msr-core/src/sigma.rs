//! Sigma-algebras over finite universes.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, MsrError};
use crate::set::{Point, PointMap, PointSet, Universe};

fn sigma_error(code: &str, message: impl Into<String>) -> MsrError {
    MsrError::Sigma(ErrorInfo::new(code, message.into()))
}

/// A family of measurable sets closed under complement and countable union.
///
/// Over a finite universe a sigma-algebra is exactly the family of unions of
/// its atoms (minimal non-empty members), so both are kept: the sorted member
/// list answers membership queries and the atoms drive hulls and kernels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SigmaRepr", into = "SigmaRepr")]
pub struct SigmaAlgebra {
    universe: Universe,
    members: Vec<PointSet>,
    atoms: Vec<PointSet>,
}

#[derive(Serialize, Deserialize)]
struct SigmaRepr {
    universe: Universe,
    members: Vec<PointSet>,
}

impl TryFrom<SigmaRepr> for SigmaAlgebra {
    type Error = MsrError;

    fn try_from(repr: SigmaRepr) -> Result<Self, Self::Error> {
        SigmaAlgebra::from_sets(repr.universe, repr.members)
    }
}

impl From<SigmaAlgebra> for SigmaRepr {
    fn from(sigma: SigmaAlgebra) -> Self {
        SigmaRepr {
            universe: sigma.universe,
            members: sigma.members,
        }
    }
}

impl SigmaAlgebra {
    /// Validates an explicit family of sets and wraps it as a sigma-algebra.
    ///
    /// The family must contain `∅` and be closed under complement and union;
    /// over a finite universe pairwise union closure gives countable union
    /// closure.
    pub fn from_sets<I>(universe: Universe, sets: I) -> Result<Self, MsrError>
    where
        I: IntoIterator<Item = PointSet>,
    {
        let mut members: Vec<PointSet> = sets.into_iter().collect();
        for set in &members {
            universe.check_set(*set)?;
        }
        members.sort_unstable();
        members.dedup();

        if members.binary_search(&PointSet::EMPTY).is_err() {
            return Err(sigma_error("not-sigma-algebra", "family does not contain the empty set"));
        }
        for set in &members {
            let complement = set.complement(&universe);
            if members.binary_search(&complement).is_err() {
                return Err(MsrError::Sigma(
                    ErrorInfo::new("not-sigma-algebra", "family is not closed under complement")
                        .with_context("set", set.to_string()),
                ));
            }
        }
        for (idx, a) in members.iter().enumerate() {
            for b in &members[idx + 1..] {
                if members.binary_search(&a.union(*b)).is_err() {
                    return Err(MsrError::Sigma(
                        ErrorInfo::new("not-sigma-algebra", "family is not closed under union")
                            .with_context("left", a.to_string())
                            .with_context("right", b.to_string()),
                    ));
                }
            }
        }

        let atoms = atoms_of(&universe, &members);
        Ok(Self {
            universe,
            members,
            atoms,
        })
    }

    /// Builds the sigma-algebra whose atoms are the blocks of a partition.
    pub fn from_partition<I>(universe: Universe, blocks: I) -> Result<Self, MsrError>
    where
        I: IntoIterator<Item = PointSet>,
    {
        let mut atoms: Vec<PointSet> = blocks.into_iter().collect();
        let mut covered = PointSet::EMPTY;
        for block in &atoms {
            universe.check_set(*block)?;
            if block.is_empty() {
                return Err(sigma_error("invalid-partition", "partition blocks must be non-empty"));
            }
            if !block.is_disjoint(covered) {
                return Err(MsrError::Sigma(
                    ErrorInfo::new("invalid-partition", "partition blocks overlap")
                        .with_context("block", block.to_string()),
                ));
            }
            covered = covered.union(*block);
        }
        if covered != universe.full() {
            return Err(MsrError::Sigma(
                ErrorInfo::new("invalid-partition", "partition does not cover the universe")
                    .with_context("missing", universe.full().diff(covered).to_string()),
            ));
        }
        atoms.sort_unstable();
        Ok(Self::from_atoms(universe, atoms))
    }

    /// Smallest sigma-algebra containing every generator.
    pub fn generate_from<I>(universe: Universe, generators: I) -> Result<Self, MsrError>
    where
        I: IntoIterator<Item = PointSet>,
    {
        let mut blocks = if universe.size() == 0 {
            Vec::new()
        } else {
            vec![universe.full()]
        };
        let mut count = 0usize;
        for generator in generators {
            universe.check_set(generator)?;
            count += 1;
            blocks = blocks
                .into_iter()
                .flat_map(|block| [block.inter(generator), block.diff(generator)])
                .filter(|block| !block.is_empty())
                .collect();
        }
        blocks.sort_unstable();
        tracing::debug!(
            universe = universe.size(),
            generators = count,
            atoms = blocks.len(),
            "generated sigma-algebra"
        );
        Ok(Self::from_atoms(universe, blocks))
    }

    /// The discrete sigma-algebra: every subset is measurable.
    pub fn powerset(universe: Universe) -> Self {
        let atoms = universe.points().map(PointSet::singleton).collect();
        Self::from_atoms(universe, atoms)
    }

    /// The trivial sigma-algebra `{∅, α}`.
    pub fn trivial(universe: Universe) -> Self {
        let atoms = if universe.size() == 0 {
            Vec::new()
        } else {
            vec![universe.full()]
        };
        Self::from_atoms(universe, atoms)
    }

    fn from_atoms(universe: Universe, atoms: Vec<PointSet>) -> Self {
        let mut members = Vec::with_capacity(1usize << atoms.len());
        for choice in 0u32..(1u32 << atoms.len()) {
            let set = atoms
                .iter()
                .enumerate()
                .filter(|(idx, _)| choice & (1u32 << idx) != 0)
                .fold(PointSet::EMPTY, |acc, (_, atom)| acc.union(*atom));
            members.push(set);
        }
        members.sort_unstable();
        Self {
            universe,
            members,
            atoms,
        }
    }

    /// Universe the sigma-algebra lives on.
    pub fn universe(&self) -> Universe {
        self.universe
    }

    /// Returns whether the set is measurable.
    pub fn is_measurable(&self, set: PointSet) -> bool {
        self.members.binary_search(&set).is_ok()
    }

    /// All measurable sets in increasing mask order.
    pub fn members(&self) -> &[PointSet] {
        &self.members
    }

    /// The atoms, pairwise disjoint and covering the universe.
    pub fn atoms(&self) -> &[PointSet] {
        &self.atoms
    }

    /// Atom containing the point.
    pub fn atom_of(&self, point: Point) -> Option<PointSet> {
        self.atoms.iter().copied().find(|atom| atom.contains(point))
    }

    /// Smallest measurable superset of `set`.
    pub fn measurable_hull(&self, set: PointSet) -> PointSet {
        self.atoms
            .iter()
            .filter(|atom| !atom.is_disjoint(set))
            .fold(PointSet::EMPTY, |acc, atom| acc.union(*atom))
    }

    /// Largest measurable subset of `set`.
    pub fn measurable_kernel(&self, set: PointSet) -> PointSet {
        self.atoms
            .iter()
            .filter(|atom| atom.is_subset(set))
            .fold(PointSet::EMPTY, |acc, atom| acc.union(*atom))
    }

    /// Returns whether every member of `self` is measurable in `other`.
    pub fn is_sub_of(&self, other: &SigmaAlgebra) -> bool {
        self.universe == other.universe
            && self.atoms.iter().all(|atom| other.is_measurable(*atom))
    }

    /// Rejects operands that do not share the same sigma-algebra.
    pub fn check_same(&self, other: &SigmaAlgebra) -> Result<(), MsrError> {
        if self == other {
            Ok(())
        } else {
            Err(MsrError::Measure(
                ErrorInfo::new("sigma-mismatch", "operands use different sigma-algebras")
                    .with_context("left_atoms", self.atoms.len().to_string())
                    .with_context("right_atoms", other.atoms.len().to_string()),
            ))
        }
    }

    /// Preimage sigma-algebra `{f⁻¹(t) : t measurable in target}` on the domain of `f`.
    pub fn comap(target: &SigmaAlgebra, map: &PointMap) -> Result<Self, MsrError> {
        target.universe.check_same(&map.codomain())?;
        let mut blocks: Vec<PointSet> = target
            .atoms
            .iter()
            .map(|atom| map.preimage(*atom))
            .filter(|block| !block.is_empty())
            .collect();
        blocks.sort_unstable();
        Ok(Self::from_atoms(map.domain(), blocks))
    }

    /// Returns whether preimages of measurable sets of `target` are measurable here.
    pub fn is_measurable_map(&self, map: &PointMap, target: &SigmaAlgebra) -> bool {
        map.domain() == self.universe
            && map.codomain() == target.universe
            && target
                .atoms
                .iter()
                .all(|atom| self.is_measurable(map.preimage(*atom)))
    }
}

fn atoms_of(universe: &Universe, members: &[PointSet]) -> Vec<PointSet> {
    let mut atoms: Vec<PointSet> = universe
        .points()
        .map(|point| {
            members
                .iter()
                .filter(|member| member.contains(point))
                .fold(universe.full(), |acc, member| acc.inter(*member))
        })
        .collect();
    atoms.sort_unstable();
    atoms.dedup();
    atoms
}
