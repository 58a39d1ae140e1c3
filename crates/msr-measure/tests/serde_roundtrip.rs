use std::sync::Arc;

use msr_core::{ENNReal, PointSet, SigmaAlgebra, Universe};
use msr_measure::serde::{
    from_bytes, from_json, outer_from_json, outer_to_json, sigma_from_json, sigma_to_json, to_bytes,
    to_json,
};
use msr_measure::{Measure, Premeasure};
use serde_json::{json, Value};

fn build_measure() -> Measure {
    let universe = Universe::new(4).unwrap();
    let sigma = Arc::new(
        SigmaAlgebra::from_partition(
            universe,
            [PointSet::from_points([0, 3]), PointSet::singleton(1), PointSet::singleton(2)],
        )
        .unwrap(),
    );
    let weights = [ENNReal::from_u64(2), ENNReal::TOP, ENNReal::finite(0.25).unwrap()];
    Measure::of_measurable(&Premeasure::from_atom_weights(sigma, &weights).unwrap()).unwrap()
}

#[test]
fn json_round_trip() {
    let measure = build_measure();
    let json = to_json(&measure).unwrap();
    let restored = from_json(&json).unwrap();
    assert_eq!(measure.canonical_hash(), restored.canonical_hash());
    assert_eq!(measure, restored);
}

#[test]
fn binary_round_trip() {
    let measure = build_measure();
    let bytes = to_bytes(&measure).unwrap();
    let restored = from_bytes(&bytes).unwrap();
    assert_eq!(measure.canonical_hash(), restored.canonical_hash());
}

#[test]
fn tampered_payloads_are_rejected() {
    let measure = build_measure();
    let json = to_json(&measure).unwrap();
    let tampered = json.replacen("0.25", "0.5", 1);
    let err = from_json(&tampered).unwrap_err();
    assert_eq!(err.code(), "hash-mismatch");
    assert_eq!(from_json("{").unwrap_err().code(), "json-deserialize");
}

#[test]
fn sigma_round_trip_is_stamped_and_revalidated() {
    let measure = build_measure();
    let sigma = measure.sigma().as_ref();
    let json = sigma_to_json(sigma).unwrap();
    assert_eq!(&sigma_from_json(&json).unwrap(), sigma);

    let mut payload: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(payload["schema_version"]["major"], json!(1));
    payload["schema_version"]["major"] = json!(2);
    let err = sigma_from_json(&payload.to_string()).unwrap_err();
    assert_eq!(err.code(), "schema-mismatch");

    // Dropping the full set breaks closure under complement.
    let mut payload: Value = serde_json::from_str(&json).unwrap();
    let members = payload["sigma"]["members"].as_array_mut().unwrap();
    members.pop();
    let err = sigma_from_json(&payload.to_string()).unwrap_err();
    assert_eq!(err.code(), "json-deserialize");
}

#[test]
fn outer_round_trip_rejects_tables_that_break_the_axioms() {
    let measure = build_measure();
    let outer = measure.to_outer_measure();
    let json = outer_to_json(outer).unwrap();
    assert_eq!(&outer_from_json(&json).unwrap(), outer);

    // The full set drops below its subsets, so the table is no longer monotone.
    let mut payload: Value = serde_json::from_str(&json).unwrap();
    let values = payload["outer"]["values"].as_array_mut().unwrap();
    let last = values.len() - 1;
    values[last] = json!({ "finite": 0.0 });
    let err = outer_from_json(&payload.to_string()).unwrap_err();
    assert_eq!(err.code(), "json-deserialize");
    assert!(err.to_string().contains("invalid-outer-measure"));
}
