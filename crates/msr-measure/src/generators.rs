use std::sync::Arc;

use msr_core::{ENNReal, ErrorInfo, MsrError, PointSet, RngHandle, SigmaAlgebra, Universe};
use rand::Rng;

use crate::premeasure::Premeasure;

/// Generates a sigma-algebra by assigning every point to one of at most
/// `max_atoms` blocks. Empty blocks are dropped.
pub fn gen_partition_sigma(
    universe: Universe,
    max_atoms: usize,
    rng: &mut RngHandle,
) -> Result<SigmaAlgebra, MsrError> {
    if max_atoms == 0 && universe.size() > 0 {
        return Err(MsrError::Sigma(ErrorInfo::new(
            "empty-partition",
            "partition generator requires at least one block",
        )));
    }
    let mut blocks = vec![PointSet::EMPTY; max_atoms];
    for point in universe.points() {
        let slot = rng.gen_range(0..max_atoms);
        blocks[slot] = blocks[slot].union(PointSet::singleton(point));
    }
    blocks.retain(|block| !block.is_empty());
    SigmaAlgebra::from_partition(universe, blocks)
}

/// Generates a premeasure with integer atom weights in `0..=max_weight`.
///
/// Integer weights keep sums exact, which lets property tests compare values
/// with [`msr_core::Tolerance::exact`].
pub fn gen_premeasure(
    sigma: Arc<SigmaAlgebra>,
    max_weight: u32,
    rng: &mut RngHandle,
) -> Result<Premeasure, MsrError> {
    let weights: Vec<ENNReal> = (0..sigma.atoms().len())
        .map(|_| ENNReal::from(rng.gen_range(0..=max_weight)))
        .collect();
    Premeasure::from_atom_weights(sigma, &weights)
}
