#![deny(missing_docs)]
#![doc = "Core value types for the msr measure construction stack: extended non-negative reals, finite universes and point sets, sigma-algebras, tolerances and structured errors."]

pub mod ennreal;
pub mod errors;
pub mod policy;
pub mod provenance;
pub mod rng;
pub mod set;
pub mod sigma;

pub use ennreal::ENNReal;
pub use errors::{ErrorInfo, MsrError};
pub use policy::Tolerance;
pub use provenance::SchemaVersion;
pub use rng::{derive_substream_seed, RngHandle};
pub use set::{disjointed, Point, PointMap, PointSet, Universe, MAX_POINTS};
pub use sigma::SigmaAlgebra;
