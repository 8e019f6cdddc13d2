use alexander_engine::{all_ones, Laurent};
use proptest::prelude::*;

fn laurent_strategy() -> impl Strategy<Value = Laurent> {
    prop::collection::vec((-8i64..8, -20i64..20), 0..6)
        .prop_map(|terms| Laurent::from_terms(terms))
}

fn nonzero_laurent_strategy() -> impl Strategy<Value = Laurent> {
    laurent_strategy().prop_filter("divisor must be non-zero", |p| !p.is_zero())
}

proptest! {
    #[test]
    fn addition_commutes(a in laurent_strategy(), b in laurent_strategy()) {
        prop_assert_eq!(&a + &b, &b + &a);
    }

    #[test]
    fn multiplication_commutes(a in laurent_strategy(), b in laurent_strategy()) {
        prop_assert_eq!(a.multiply(&b), b.multiply(&a));
    }

    #[test]
    fn multiplication_associates(
        a in laurent_strategy(),
        b in laurent_strategy(),
        c in laurent_strategy(),
    ) {
        prop_assert_eq!(a.multiply(&b.multiply(&c)), a.multiply(&b).multiply(&c));
    }

    #[test]
    fn multiplication_distributes(
        a in laurent_strategy(),
        b in laurent_strategy(),
        c in laurent_strategy(),
    ) {
        prop_assert_eq!(a.multiply(&(&b + &c)), &a.multiply(&b) + &a.multiply(&c));
    }

    #[test]
    fn one_is_identity(a in laurent_strategy()) {
        let product = a.multiply(&Laurent::one());
        prop_assert!(product.is_simplified());
        prop_assert_eq!(product, a.simplify());
    }

    #[test]
    fn simplify_is_idempotent(a in laurent_strategy()) {
        let once = a.simplify();
        prop_assert!(once.is_simplified());
        prop_assert_eq!(once.simplify(), once);
    }

    #[test]
    fn subtraction_inverts_addition(a in laurent_strategy(), b in laurent_strategy()) {
        prop_assert!((&(&a + &b) - &b) == a);
        prop_assert!((&a - &a).is_zero());
    }

    #[test]
    fn exact_division_round_trips(q in laurent_strategy(), d in nonzero_laurent_strategy()) {
        let product = d.multiply(&q);
        prop_assert_eq!(product.divide(&d).unwrap(), q.simplify());
    }

    #[test]
    fn division_by_all_ones_round_trips(q in laurent_strategy(), n in 1u64..12) {
        let product = q.multiply(&all_ones(n));
        prop_assert_eq!(product.divide(&all_ones(n)).unwrap(), q);
    }

    #[test]
    fn symmetrize_is_stable(a in nonzero_laurent_strategy()) {
        let centred = a.symmetrize().unwrap();
        prop_assert_eq!(centred.symmetrize().unwrap(), centred.clone());
        prop_assert_eq!(centred.len(), a.len());
    }

    #[test]
    fn positive_normalize_starts_at_zero(a in nonzero_laurent_strategy()) {
        let positive = a.positive_normalize().unwrap();
        prop_assert_eq!(positive.min_exponent(), Some(0));
        prop_assert_eq!(
            positive.max_exponent().unwrap(),
            a.max_exponent().unwrap() - a.min_exponent().unwrap()
        );
    }

    #[test]
    fn evaluation_at_one_is_a_ring_map(a in laurent_strategy(), b in laurent_strategy()) {
        prop_assert_eq!(
            a.multiply(&b).evaluate_at_one(),
            a.evaluate_at_one() * b.evaluate_at_one()
        );
    }
}
