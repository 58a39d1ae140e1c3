use std::sync::Arc;

use msr_core::{ENNReal, ErrorInfo, MsrError, SchemaVersion, SigmaAlgebra};
use msr_outer::OuterMeasure;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::hash::canonical_sigma_hash;
use crate::measure::Measure;
use crate::premeasure::Premeasure;

#[derive(Debug, Serialize, Deserialize)]
struct SerializableMeasure {
    schema_version: SchemaVersion,
    measure_hash: String,
    sigma: SigmaAlgebra,
    atom_weights: Vec<ENNReal>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableSigma {
    schema_version: SchemaVersion,
    sigma_hash: String,
    sigma: SigmaAlgebra,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableOuter {
    schema_version: SchemaVersion,
    outer: OuterMeasure,
}

fn write_json<T: Serialize>(payload: &T) -> Result<String, MsrError> {
    serde_json::to_string_pretty(payload)
        .map_err(|err| MsrError::Serde(ErrorInfo::new("json-serialize", err.to_string())))
}

fn read_json<T: DeserializeOwned>(data: &str) -> Result<T, MsrError> {
    serde_json::from_str(data)
        .map_err(|err| MsrError::Serde(ErrorInfo::new("json-deserialize", err.to_string())))
}

fn check_schema(version: &SchemaVersion) -> Result<(), MsrError> {
    if SchemaVersion::default().is_compatible_with(version) {
        return Ok(());
    }
    Err(MsrError::Serde(
        ErrorInfo::new("schema-mismatch", "payload schema is not readable by this version")
            .with_context(
                "payload",
                format!("{}.{}.{}", version.major, version.minor, version.patch),
            ),
    ))
}

fn check_hash(expected: String, actual: String) -> Result<(), MsrError> {
    if expected == actual {
        return Ok(());
    }
    Err(MsrError::Serde(
        ErrorInfo::new("hash-mismatch", "payload hash does not match its contents")
            .with_context("expected", expected)
            .with_context("actual", actual),
    ))
}

/// Serializes a sigma-algebra to a schema-stamped JSON string.
pub fn sigma_to_json(sigma: &SigmaAlgebra) -> Result<String, MsrError> {
    write_json(&SerializableSigma {
        schema_version: SchemaVersion::default(),
        sigma_hash: canonical_sigma_hash(sigma),
        sigma: sigma.clone(),
    })
}

/// Restores a sigma-algebra; the closure axioms are checked again on load.
pub fn sigma_from_json(data: &str) -> Result<SigmaAlgebra, MsrError> {
    let payload: SerializableSigma = read_json(data)?;
    check_schema(&payload.schema_version)?;
    check_hash(payload.sigma_hash, canonical_sigma_hash(&payload.sigma))?;
    Ok(payload.sigma)
}

/// Serializes an outer measure to a schema-stamped JSON string.
pub fn outer_to_json(outer: &OuterMeasure) -> Result<String, MsrError> {
    write_json(&SerializableOuter {
        schema_version: SchemaVersion::default(),
        outer: outer.clone(),
    })
}

/// Restores an outer measure; the table is validated again on load.
pub fn outer_from_json(data: &str) -> Result<OuterMeasure, MsrError> {
    let payload: SerializableOuter = read_json(data)?;
    check_schema(&payload.schema_version)?;
    Ok(payload.outer)
}

/// Serializes a measure to a JSON string.
pub fn to_json(measure: &Measure) -> Result<String, MsrError> {
    write_json(&SerializableMeasure {
        schema_version: SchemaVersion::default(),
        measure_hash: measure.canonical_hash(),
        sigma: measure.sigma().as_ref().clone(),
        atom_weights: measure.atom_weights(),
    })
}

/// Restores a measure from a JSON string.
pub fn from_json(data: &str) -> Result<Measure, MsrError> {
    let payload: SerializableMeasure = read_json(data)?;
    check_schema(&payload.schema_version)?;
    let premeasure = Premeasure::from_atom_weights(Arc::new(payload.sigma), &payload.atom_weights)?;
    let measure = Measure::of_measurable(&premeasure)?;
    check_hash(payload.measure_hash, measure.canonical_hash())?;
    Ok(measure)
}

/// Serializes a measure into a binary blob.
pub fn to_bytes(measure: &Measure) -> Result<Vec<u8>, MsrError> {
    let json = to_json(measure)?;
    bincode::serialize(&json)
        .map_err(|err| MsrError::Serde(ErrorInfo::new("bincode-serialize", err.to_string())))
}

/// Rehydrates a measure from a binary blob.
pub fn from_bytes(bytes: &[u8]) -> Result<Measure, MsrError> {
    let json: String = bincode::deserialize(bytes)
        .map_err(|err| MsrError::Serde(ErrorInfo::new("bincode-deserialize", err.to_string())))?;
    from_json(&json)
}
