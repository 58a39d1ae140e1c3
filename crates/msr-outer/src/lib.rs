#![deny(missing_docs)]
#![doc = "Outer measures over finite universes: the cover-and-sum construction, the outer measure lattice, trimming against a sigma-algebra, and Caratheodory's splitting criterion."]

/// Lattice, module and pushforward operations.
pub mod algebra;
/// Caratheodory criterion and sigma-algebra.
pub mod caratheodory;
/// Seed functions and the cover construction.
pub mod cover;
/// The outer measure value type and its axioms.
pub mod outer;
/// Measurable-cover trimming.
pub mod trim;

pub use cover::SeedFunction;
pub use outer::OuterMeasure;
