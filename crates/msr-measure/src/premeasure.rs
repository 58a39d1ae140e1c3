use std::collections::BTreeMap;
use std::sync::Arc;

use msr_core::{ENNReal, ErrorInfo, MsrError, PointSet, SigmaAlgebra, Tolerance};
use msr_outer::SeedFunction;

fn premeasure_error(code: &str, message: impl Into<String>) -> MsrError {
    MsrError::Premeasure(ErrorInfo::new(code, message.into()))
}

/// A set function defined exactly on the measurable sets, vanishing on `∅` and
/// countably additive over disjoint measurable sequences.
///
/// On a finite sigma-algebra every measurable set is a disjoint union of
/// atoms, so countable additivity is checked as agreement of each value with
/// the sum of its atoms' values, within the tolerance the premeasure was
/// validated with.
#[derive(Debug, Clone, PartialEq)]
pub struct Premeasure {
    sigma: Arc<SigmaAlgebra>,
    values: BTreeMap<PointSet, ENNReal>,
    tol: Tolerance,
}

impl Premeasure {
    /// Validates explicit values, one per measurable set.
    pub fn new<I>(sigma: Arc<SigmaAlgebra>, values: I, tol: &Tolerance) -> Result<Self, MsrError>
    where
        I: IntoIterator<Item = (PointSet, ENNReal)>,
    {
        let mut table = BTreeMap::new();
        for (set, value) in values {
            if !sigma.is_measurable(set) {
                return Err(MsrError::Premeasure(
                    ErrorInfo::new("not-measurable", "premeasure assigns a value to a non-measurable set")
                        .with_context("set", set.to_string()),
                ));
            }
            table.insert(set, value);
        }
        if let Some(missing) = sigma.members().iter().find(|set| !table.contains_key(*set)) {
            return Err(MsrError::Premeasure(
                ErrorInfo::new("missing-value", "premeasure must be defined on every measurable set")
                    .with_context("set", missing.to_string()),
            ));
        }
        let premeasure = Self {
            sigma,
            values: table,
            tol: *tol,
        };
        premeasure.validate()?;
        tracing::debug!(
            universe = premeasure.sigma.universe().size(),
            measurable = premeasure.values.len(),
            "validated premeasure"
        );
        Ok(premeasure)
    }

    /// Evaluates `f` on every measurable set and validates the result.
    pub fn from_fn<F>(sigma: Arc<SigmaAlgebra>, mut f: F, tol: &Tolerance) -> Result<Self, MsrError>
    where
        F: FnMut(PointSet) -> ENNReal,
    {
        let values: Vec<(PointSet, ENNReal)> =
            sigma.members().iter().map(|set| (*set, f(*set))).collect();
        Self::new(sigma, values, tol)
    }

    /// Builds the premeasure that assigns the given weight to each atom, in
    /// atom order. Additivity holds exactly by construction.
    pub fn from_atom_weights(sigma: Arc<SigmaAlgebra>, weights: &[ENNReal]) -> Result<Self, MsrError> {
        if weights.len() != sigma.atoms().len() {
            return Err(MsrError::Premeasure(
                ErrorInfo::new("atom-weight-count", "one weight is required per atom")
                    .with_context("atoms", sigma.atoms().len().to_string())
                    .with_context("weights", weights.len().to_string()),
            ));
        }
        let values = sigma
            .members()
            .iter()
            .map(|set| {
                let value = ENNReal::tsum(
                    sigma
                        .atoms()
                        .iter()
                        .zip(weights)
                        .filter(|(atom, _)| atom.is_subset(*set))
                        .map(|(_, weight)| *weight),
                );
                (*set, value)
            })
            .collect();
        Ok(Self {
            sigma,
            values,
            tol: Tolerance::exact(),
        })
    }

    fn validate(&self) -> Result<(), MsrError> {
        let empty = self.value(PointSet::EMPTY);
        if !empty.is_zero() {
            return Err(MsrError::Premeasure(
                ErrorInfo::new("invalid-premeasure", "premeasure of the empty set must be 0")
                    .with_context("value", empty.to_string()),
            ));
        }
        let weights = self.atom_weights();
        for (set, value) in &self.values {
            let split = self.atom_sum(*set, &weights);
            if !value.approx_eq(&split, &self.tol) {
                return Err(MsrError::Premeasure(
                    ErrorInfo::new("invalid-premeasure", "premeasure is not additive")
                        .with_context("set", set.to_string())
                        .with_context("value", value.to_string())
                        .with_context("atom_sum", split.to_string()),
                ));
            }
        }
        Ok(())
    }

    fn atom_sum(&self, set: PointSet, weights: &[ENNReal]) -> ENNReal {
        ENNReal::tsum(
            self.sigma
                .atoms()
                .iter()
                .zip(weights)
                .filter(|(atom, _)| atom.is_subset(set))
                .map(|(_, weight)| *weight),
        )
    }

    /// Sigma-algebra the premeasure is defined on.
    pub fn sigma(&self) -> &Arc<SigmaAlgebra> {
        &self.sigma
    }

    /// Tolerance the values were validated with.
    pub fn tolerance(&self) -> &Tolerance {
        &self.tol
    }

    /// Value of each atom, in atom order.
    pub fn atom_weights(&self) -> Vec<ENNReal> {
        self.sigma
            .atoms()
            .iter()
            .map(|atom| self.value(*atom))
            .collect()
    }

    /// Value on a measurable set; `∞` off the sigma-algebra.
    pub fn value(&self, set: PointSet) -> ENNReal {
        self.values.get(&set).copied().unwrap_or(ENNReal::TOP)
    }

    /// The premeasure as seed data for the cover construction.
    pub fn seed(&self) -> Result<SeedFunction, MsrError> {
        SeedFunction::from_fn(
            self.sigma.universe(),
            self.values.keys().copied(),
            |set| self.value(set),
        )
        .map_err(|err| premeasure_error("seed-conversion", err.to_string()))
    }
}
