// arithmetic.rs
//! High/low bit decomposition and vector helpers for the signature.
//!
//! A coefficient `x` in `[0, q)` splits into `hi = x >> d` and
//! `lo = x - ((hi << d) mod q)`, so `((hi << d) + lo) mod q == x` always holds.

use solmae_algorithms::modular::reduce;
use solmae_algorithms::Polynomial;
use solmae_params::pqc::solmae::SolmaeSchemeParams;

use crate::error::{Error as SignError, Result};

/// Check the compile-time parameters once before any key material is made
///
/// High bits are stored one per byte, so `(q - 1) >> d` must fit in a `u8`,
/// and matrix indices are hashed as 16-bit words.
pub(crate) fn check_parameters<P: SolmaeSchemeParams>() -> Result<()> {
    if P::Q < 2 || ((P::Q - 1) >> P::D_PARAM) > u8::MAX as u32 {
        return Err(SignError::Configuration(format!(
            "{}: (q - 1) >> d does not fit in a byte for q = {}, d = {}",
            P::NAME,
            P::Q,
            P::D_PARAM
        )));
    }
    if P::K_DIM == 0 || P::K_DIM > u16::MAX as usize {
        return Err(SignError::Configuration(format!(
            "{}: module dimension {} out of range",
            P::NAME,
            P::K_DIM
        )));
    }
    if P::ETA == 0 {
        return Err(SignError::Configuration(format!("{}: eta must be positive", P::NAME)));
    }
    Ok(())
}

/// Coefficient-wise `x >> d` as bytes
///
/// Callers guarantee through [`check_parameters`] that every value fits.
pub(crate) fn high_bits(poly: &Polynomial, d: u32) -> Vec<u8> {
    poly.coeffs().iter().map(|&x| (x >> d) as u8).collect()
}

/// Split `t` into its high-bit bytes and low-bit residuals
pub(crate) fn power2round(t: &Polynomial, d: u32) -> (Vec<u8>, Vec<i32>) {
    let q = t.context().q();
    t.coeffs()
        .iter()
        .map(|&x| {
            let hi = x >> d;
            let lo = x as i64 - ((hi as u64) << d) as i64 % q as i64;
            (hi as u8, lo as i32)
        })
        .unzip()
}

/// Inverse of [`power2round`]: `((hi << d) + lo) mod q`
pub fn reconstruct(t1: &[u8], t0: &[i32], d: u32, q: u32) -> Vec<u32> {
    t1.iter()
        .zip(t0)
        .map(|(&hi, &lo)| reduce(((hi as i64) << d) + lo as i64, q as u64) as u32)
        .collect()
}

/// Element-wise sum of two polynomial vectors
pub(crate) fn add_vectors(a: &[Polynomial], b: &[Polynomial]) -> Result<Vec<Polynomial>> {
    if a.len() != b.len() {
        return Err(SignError::Internal(format!(
            "vector lengths differ: {} and {}",
            a.len(),
            b.len()
        )));
    }
    a.iter()
        .zip(b)
        .map(|(x, y)| x.add(y).map_err(SignError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use solmae_algorithms::RingContext;
    use solmae_params::pqc::solmae::Solmae256Params;

    const Q: u32 = 12289;
    const D: u32 = 6;

    #[test]
    fn test_power2round_examples() {
        let ctx = RingContext::new(Q, 4).unwrap();
        let t = Polynomial::from_reduced(ctx, vec![0, 63, 64, Q - 1]).unwrap();
        let (t1, t0) = power2round(&t, D);
        assert_eq!(t1, vec![0, 0, 1, 192]);
        assert_eq!(t0, vec![0, 63, 0, 0]);
        assert_eq!(reconstruct(&t1, &t0, D, Q), t.to_vec());
    }

    #[test]
    fn test_power2round_reconstructs_every_coefficient() {
        let ctx = RingContext::new(Q, 1).unwrap();
        for x in 0..Q {
            let t = Polynomial::from_reduced(ctx, vec![x]).unwrap();
            let (t1, t0) = power2round(&t, D);
            assert!((0..64).contains(&t0[0]));
            assert_eq!(reconstruct(&t1, &t0, D, Q), vec![x]);
        }
    }

    #[test]
    fn test_high_bits_matches_power2round() {
        let ctx = RingContext::new(Q, 8).unwrap();
        let t = Polynomial::from_coeffs(ctx, &[5, -5, 700, 12000, 1, 2, 3, 4]);
        assert_eq!(high_bits(&t, D), power2round(&t, D).0);
    }

    #[test]
    fn test_parameter_check() {
        assert!(check_parameters::<Solmae256Params>().is_ok());
    }

    #[test]
    fn test_add_vectors_length_mismatch() {
        let ctx = RingContext::new(Q, 4).unwrap();
        let one = vec![Polynomial::one(ctx)];
        assert!(add_vectors(&one, &[]).is_err());
        let two = add_vectors(&one, &one).unwrap();
        assert_eq!(two[0].coeffs(), &[2, 0, 0, 0]);
    }
}
