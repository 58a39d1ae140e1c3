use std::sync::Arc;

use msr_core::{ENNReal, PointSet, RngHandle, SigmaAlgebra, Tolerance, Universe};
use msr_measure::{gen_partition_sigma, gen_premeasure, Measure, Premeasure};
use proptest::prelude::*;

fn weighted(sigma: &Arc<SigmaAlgebra>, weights: &[u32]) -> Measure {
    let weights: Vec<ENNReal> = weights.iter().copied().map(ENNReal::from).collect();
    Measure::of_measurable(&Premeasure::from_atom_weights(sigma.clone(), &weights).unwrap()).unwrap()
}

fn random_pair(seed: u64, n: u8) -> (Measure, Measure) {
    let universe = Universe::new(n).unwrap();
    let sigma = Arc::new(gen_partition_sigma(universe, 4, &mut RngHandle::substream(seed, 0)).unwrap());
    let first = gen_premeasure(sigma.clone(), 6, &mut RngHandle::substream(seed, 1)).unwrap();
    let second = gen_premeasure(sigma, 6, &mut RngHandle::substream(seed, 2)).unwrap();
    (
        Measure::of_measurable(&first).unwrap(),
        Measure::of_measurable(&second).unwrap(),
    )
}

#[test]
fn inf_and_sup_work_atom_by_atom() {
    let sigma = Arc::new(SigmaAlgebra::powerset(Universe::new(3).unwrap()));
    let mu = weighted(&sigma, &[1, 2, 0]);
    let nu = weighted(&sigma, &[0, 3, 1]);

    let inf = mu.inf(&nu).unwrap();
    assert_eq!(inf.atom_weights(), [0u32, 2, 0].map(ENNReal::from).to_vec());
    assert_eq!(inf.measure_of(sigma.universe().full()), ENNReal::from_u64(2));

    let sup = mu.sup(&nu).unwrap();
    assert_eq!(sup.atom_weights(), [1u32, 3, 1].map(ENNReal::from).to_vec());
    assert_eq!(sup.measure_of(sigma.universe().full()), ENNReal::from_u64(5));
}

#[test]
fn empty_families_give_the_lattice_bounds() {
    let sigma = Arc::new(SigmaAlgebra::powerset(Universe::new(2).unwrap()));
    assert_eq!(Measure::inf_all(sigma.clone(), &[]).unwrap(), Measure::top(sigma.clone()));
    assert_eq!(Measure::sup_all(sigma.clone(), &[]).unwrap(), Measure::zero(sigma.clone()));
    assert_eq!(Measure::sum(sigma.clone(), &[]).unwrap(), Measure::zero(sigma));
}

#[test]
fn operands_on_different_sigma_algebras_are_rejected() {
    let universe = Universe::new(2).unwrap();
    let fine = Arc::new(SigmaAlgebra::powerset(universe));
    let coarse = Arc::new(SigmaAlgebra::trivial(universe));
    let err = Measure::count(fine)
        .unwrap()
        .add(&Measure::count(coarse).unwrap())
        .unwrap_err();
    assert_eq!(err.code(), "sigma-mismatch");
}

#[test]
fn restriction_and_scaling() {
    let sigma = Arc::new(SigmaAlgebra::powerset(Universe::new(3).unwrap()));
    let mu = weighted(&sigma, &[1, 2, 3]);
    let restricted = mu.restrict(PointSet::from_points([1, 2])).unwrap();
    assert_eq!(restricted.measure_of(sigma.universe().full()), ENNReal::from_u64(5));
    assert!(restricted.is_null(PointSet::singleton(0)));

    let doubled = mu.smul(ENNReal::from_u64(2));
    assert_eq!(doubled.measure_of(PointSet::singleton(2)), ENNReal::from_u64(6));
    assert_eq!(mu.smul(ENNReal::TOP).measure_of(PointSet::EMPTY), ENNReal::ZERO);
}

proptest! {
    #[test]
    fn inf_and_sup_bound_their_operands(seed in any::<u64>(), n in 1u8..6) {
        let (mu, nu) = random_pair(seed, n);
        let inf = mu.inf(&nu).unwrap();
        let sup = mu.sup(&nu).unwrap();
        prop_assert!(inf.le(&mu).unwrap());
        prop_assert!(inf.le(&nu).unwrap());
        prop_assert!(mu.le(&sup).unwrap());
        prop_assert!(nu.le(&sup).unwrap());
        inf.check_invariants(&Tolerance::exact()).unwrap();
        sup.check_invariants(&Tolerance::exact()).unwrap();
    }

    #[test]
    fn addition_is_commutative_with_zero_identity(seed in any::<u64>(), n in 1u8..6) {
        let (mu, nu) = random_pair(seed, n);
        prop_assert_eq!(mu.add(&nu).unwrap(), nu.add(&mu).unwrap());
        let zero = Measure::zero(mu.sigma().clone());
        prop_assert_eq!(mu.add(&zero).unwrap(), mu.clone());
        let sum = mu.add(&nu).unwrap();
        sum.check_invariants(&Tolerance::exact()).unwrap();
        let tripled = mu.add(&nu).unwrap().add(&mu).unwrap();
        prop_assert_eq!(tripled, mu.add(&nu.add(&mu).unwrap()).unwrap());
    }

    #[test]
    fn outer_measures_of_measures_promote_back(seed in any::<u64>(), n in 1u8..6) {
        use msr_measure::ToMeasure;

        let (mu, _) = random_pair(seed, n);
        let promoted = mu
            .to_outer_measure()
            .to_measure(mu.sigma().clone(), &Tolerance::exact())
            .unwrap();
        prop_assert_eq!(promoted, mu);
    }

    #[test]
    fn completion_is_complete_and_agrees_on_measurable_sets(seed in any::<u64>(), n in 1u8..6) {
        let (mu, _) = random_pair(seed, n);
        let completed = mu.completion().unwrap();
        prop_assert!(completed.is_complete());
        prop_assert!(mu.sigma().is_sub_of(completed.sigma()));
        for set in mu.sigma().members() {
            prop_assert_eq!(completed.measure_of(*set), mu.measure_of(*set));
        }
        for set in mu.universe().subsets() {
            prop_assert_eq!(mu.is_null_measurable(set), completed.is_measurable(set));
        }
        for null in mu.null_part().subsets() {
            prop_assert!(completed.is_measurable(null));
            prop_assert!(completed.measure_of(null).is_zero());
        }
        completed.check_invariants(&Tolerance::exact()).unwrap();
    }
}
