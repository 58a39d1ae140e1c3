use msr_core::{ENNReal, SchemaVersion, SigmaAlgebra};
use sha2::{Digest, Sha256};

use crate::measure::Measure;

fn update_sigma(hasher: &mut Sha256, sigma: &SigmaAlgebra) {
    hasher.update((sigma.universe().size() as u64).to_le_bytes());
    hasher.update((sigma.atoms().len() as u64).to_le_bytes());
    for atom in sigma.atoms() {
        hasher.update((atom.bits() as u64).to_le_bytes());
    }
}

fn update_value(hasher: &mut Sha256, value: ENNReal) {
    if value.is_top() {
        hasher.update([1u8]);
    } else {
        hasher.update([0u8]);
        hasher.update(value.to_f64().to_bits().to_le_bytes());
    }
}

fn finish(hasher: Sha256) -> String {
    let digest = hasher.finalize();
    digest
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<String>()
}

/// Computes the canonical structural hash of a sigma-algebra.
pub fn canonical_sigma_hash(sigma: &SigmaAlgebra) -> String {
    let mut hasher = Sha256::new();
    update_sigma(&mut hasher, sigma);
    finish(hasher)
}

/// Computes the canonical hash of a measure: schema, sigma-algebra and the
/// mass of every atom. A measure is determined by its atom weights.
pub fn canonical_measure_hash(measure: &Measure) -> String {
    let mut hasher = Sha256::new();
    let version = SchemaVersion::default();
    hasher.update((version.major as u64).to_le_bytes());
    hasher.update((version.minor as u64).to_le_bytes());
    hasher.update((version.patch as u64).to_le_bytes());
    update_sigma(&mut hasher, measure.sigma());
    for weight in measure.atom_weights() {
        update_value(&mut hasher, weight);
    }
    finish(hasher)
}

impl Measure {
    /// Canonical hash of the measure, see [`canonical_measure_hash`].
    pub fn canonical_hash(&self) -> String {
        canonical_measure_hash(self)
    }
}
