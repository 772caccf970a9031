// tests/ring_properties.rs
// Algebraic properties of the ring and the transforms over random inputs

use proptest::prelude::*;
use solmae_algorithms::poly::fft::{fft, ifft, max_abs_diff};
use solmae_algorithms::{Complex, NttPlan, Polynomial, RingContext};

const Q: u32 = 12289;
const N: usize = 64;

fn ring() -> RingContext {
    RingContext::new(Q, N).unwrap()
}

fn poly_strategy() -> impl Strategy<Value = Polynomial> {
    prop::collection::vec(-20_000i64..20_000, N).prop_map(|c| Polynomial::from_coeffs(ring(), &c))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ring_axioms(a in poly_strategy(), b in poly_strategy(), c in poly_strategy()) {
        prop_assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
        prop_assert_eq!(a.mul(&b).unwrap(), b.mul(&a).unwrap());
        prop_assert_eq!(
            a.mul(&b.add(&c).unwrap()).unwrap(),
            a.mul(&b).unwrap().add(&a.mul(&c).unwrap()).unwrap()
        );
        prop_assert_eq!(a.add(&a.neg()).unwrap(), Polynomial::zero(ring()));
        prop_assert_eq!(a.mul(&Polynomial::one(ring())).unwrap(), a.clone());
    }

    #[test]
    fn ntt_matches_schoolbook(a in poly_strategy(), b in poly_strategy()) {
        let plan = NttPlan::new(ring()).unwrap();
        prop_assert_eq!(a.mul_ntt(&b, &plan).unwrap(), a.mul(&b).unwrap());
        let back = plan.inverse_negacyclic(plan.forward_negacyclic(a.coeffs()).unwrap()).unwrap();
        prop_assert_eq!(back, a.to_vec());
    }

    #[test]
    fn cfft_roundtrip(values in prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3), N)) {
        let x: Vec<Complex> = values.iter().map(|&(re, im)| Complex::new(re, im)).collect();
        let back = ifft(&fft(&x).unwrap()).unwrap();
        prop_assert!(max_abs_diff(&x, &back).unwrap() <= 1e-9);
    }

    #[test]
    fn folding_matches_reduction_by_x_n_plus_1(coeffs in prop::collection::vec(-100i64..100, 0..(3 * N))) {
        let folded = Polynomial::from_coeffs(ring(), &coeffs);
        let mut expected = vec![0i64; N];
        for (idx, &c) in coeffs.iter().enumerate() {
            let sign = if (idx / N) % 2 == 0 { 1 } else { -1 };
            expected[idx % N] += sign * c;
        }
        let expected: Vec<u32> = expected.iter().map(|&v| v.rem_euclid(Q as i64) as u32).collect();
        prop_assert_eq!(folded.to_vec(), expected);
    }
}

#[test]
fn deserialized_values_keep_ring_invariants() {
    let p = Polynomial::from_coeffs(ring(), &[3, -1, 40_000]);
    let json = serde_json::to_string(&p).unwrap();
    let back: Polynomial = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
    assert_eq!(back.add(&back.neg()).unwrap(), Polynomial::zero(ring()));

    assert!(serde_json::from_str::<RingContext>(r#"{"q":0,"n":0}"#).is_err());
    assert!(serde_json::from_str::<Polynomial>(r#"{"ctx":{"q":12289,"n":2},"coeffs":[1,2,3]}"#).is_err());
    assert!(serde_json::from_str::<Polynomial>(r#"{"ctx":{"q":12289,"n":2},"coeffs":[1,12289]}"#).is_err());
}
