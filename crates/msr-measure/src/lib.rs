#![deny(missing_docs)]
#![doc = "Measures on finite universes: the canonical extension of a premeasure, promotion of outer measures, the measure lattice and module structure, pushforward, restriction and completion."]

/// Sums, lattice operations, pushforward and restriction.
pub mod combinators;
/// Null-measurable sets and completion.
pub mod completion;
/// Deterministic random sigma-algebras and premeasures.
pub mod generators;
/// Canonical hashing helpers for sigma-algebras and measures.
pub mod hash;
/// The measure value type and promotion from outer measures.
pub mod measure;
/// Premeasures on a sigma-algebra.
pub mod premeasure;
/// Serialization routines for JSON and binary round-trips.
pub mod serde;

pub use generators::{gen_partition_sigma, gen_premeasure};
pub use hash::{canonical_measure_hash, canonical_sigma_hash};
pub use measure::{Measure, ToMeasure};
pub use premeasure::Premeasure;
pub use self::serde::{
    from_bytes, from_json, outer_from_json, outer_to_json, sigma_from_json, sigma_to_json, to_bytes,
    to_json,
};
