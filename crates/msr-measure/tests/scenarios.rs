use std::sync::Arc;

use msr_core::{ENNReal, PointMap, PointSet, SigmaAlgebra, Tolerance, Universe};
use msr_measure::{Measure, Premeasure};

fn alpha() -> Universe {
    Universe::new(3).unwrap()
}

fn powerset() -> Arc<SigmaAlgebra> {
    Arc::new(SigmaAlgebra::powerset(alpha()))
}

fn weighted(weights: [u32; 3]) -> Measure {
    let weights = weights.map(ENNReal::from);
    let premeasure = Premeasure::from_atom_weights(powerset(), &weights).unwrap();
    Measure::of_measurable(&premeasure).unwrap()
}

#[test]
fn extension_of_singleton_weights() {
    let premeasure = Premeasure::from_fn(
        powerset(),
        |set| ENNReal::tsum(set.points().map(|p| ENNReal::from(u32::from(p) + 1))),
        &Tolerance::exact(),
    )
    .unwrap();
    let measure = Measure::of_measurable(&premeasure).unwrap();
    assert_eq!(measure.measure_of(PointSet::from_points([0, 1])), ENNReal::from_u64(3));
    assert_eq!(measure.measure_of(PointSet::EMPTY), ENNReal::ZERO);
    assert_eq!(measure.measure_of(alpha().full()), ENNReal::from_u64(6));
    measure.check_invariants(&Tolerance::exact()).unwrap();
}

#[test]
fn sum_of_two_diracs() {
    let sigma = powerset();
    let measure = Measure::dirac(sigma.clone(), 0)
        .unwrap()
        .add(&Measure::dirac(sigma, 1).unwrap())
        .unwrap();
    assert_eq!(measure.measure_of(PointSet::singleton(0)), ENNReal::ONE);
    assert_eq!(measure.measure_of(PointSet::singleton(1)), ENNReal::ONE);
    assert_eq!(measure.measure_of(PointSet::singleton(2)), ENNReal::ZERO);
    assert_eq!(measure.measure_of(alpha().full()), ENNReal::from_u64(2));
}

#[test]
fn completion_measures_null_measurable_sets_by_their_measurable_part() {
    // Only {0} and {1,2} are measurable, and {1,2} carries no mass.
    let sigma = Arc::new(
        SigmaAlgebra::from_partition(alpha(), [PointSet::singleton(0), PointSet::from_points([1, 2])])
            .unwrap(),
    );
    let premeasure =
        Premeasure::from_atom_weights(sigma, &[ENNReal::ONE, ENNReal::ZERO]).unwrap();
    let measure = Measure::of_measurable(&premeasure).unwrap();
    let t = PointSet::singleton(0);
    let z = PointSet::singleton(2);
    assert!(measure.is_null(z));
    let s = t.union(z);
    assert!(!measure.is_measurable(s));
    assert!(measure.is_null_measurable(s));

    let completed = measure.completion().unwrap();
    assert!(completed.is_measurable(s));
    assert_eq!(completed.measure_of(s), measure.measure_of(t));
    assert_eq!(completed.measure_of(s), ENNReal::ONE);
}

#[test]
fn completion_of_a_powerset_measure_is_itself() {
    let measure = weighted([1, 0, 3]);
    assert!(measure.is_complete());
    assert_eq!(measure.completion().unwrap(), measure);
}

#[test]
fn pushforward_respects_identity_and_composition() {
    let measure = weighted([1, 2, 3]);
    let sigma = powerset();
    let identity = PointMap::identity(alpha());
    assert_eq!(measure.map(&identity, sigma.clone()).unwrap(), measure);

    let to_one = PointMap::constant(alpha(), alpha(), 1).unwrap();
    let to_two = PointMap::constant(alpha(), alpha(), 2).unwrap();
    for (f, g) in [(&identity, &to_one), (&to_one, &identity), (&to_one, &to_two)] {
        let stepwise = measure
            .map(f, sigma.clone())
            .unwrap()
            .map(g, sigma.clone())
            .unwrap();
        let composed = measure.map(&f.then(g).unwrap(), sigma.clone()).unwrap();
        assert_eq!(stepwise, composed);
    }

    let collapsed = measure.map(&to_two, sigma).unwrap();
    assert_eq!(collapsed.measure_of(PointSet::singleton(2)), ENNReal::from_u64(6));
    assert_eq!(collapsed.measure_of(PointSet::from_points([0, 1])), ENNReal::ZERO);
}

#[test]
fn non_measurable_maps_push_forward_to_zero() {
    let coarse = Arc::new(SigmaAlgebra::trivial(alpha()));
    let measure = Measure::count(coarse).unwrap();
    let identity = PointMap::identity(alpha());
    let pushed = measure.map(&identity, powerset()).unwrap();
    assert_eq!(pushed, Measure::zero(powerset()));
}
