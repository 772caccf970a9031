//! Uniform and bounded ("crown") ring elements and RLWE pair generation

use rand::RngCore;
use tracing::debug;

use crate::error::Result;
use crate::poly::params::RingContext;
use crate::poly::polynomial::Polynomial;
use crate::poly::sampling::{expand_seed_to_mod_q, uniform_mod_q, uniform_small};

/// Suffix appended to the seed when expanding the public element `a`
pub const SEEDED_A_SUFFIX: &[u8] = b"A";

/// Ring element with coefficients uniform in `[0, q)`
pub fn uniform_poly<R: RngCore>(ctx: RingContext, rng: &mut R) -> Result<Polynomial> {
    Polynomial::from_reduced(ctx, uniform_mod_q(ctx.n(), ctx.q(), rng)?)
}

/// Two independent [`uniform_poly`] draws
pub fn uniform_pair<R: RngCore>(ctx: RingContext, rng: &mut R) -> Result<(Polynomial, Polynomial)> {
    Ok((uniform_poly(ctx, rng)?, uniform_poly(ctx, rng)?))
}

/// Ring element with centred coefficients uniform in `[-radius, radius]`
pub fn crown_sample<R: RngCore>(ctx: RingContext, radius: u32, rng: &mut R) -> Result<Polynomial> {
    Ok(Polynomial::from_coeffs(ctx, &uniform_small(ctx.n(), radius, rng)?))
}

/// Two independent [`crown_sample`] draws
pub fn crown_pair<R: RngCore>(
    ctx: RingContext,
    radius: u32,
    rng: &mut R,
) -> Result<(Polynomial, Polynomial)> {
    Ok((crown_sample(ctx, radius, rng)?, crown_sample(ctx, radius, rng)?))
}

/// Ring-LWE instance `(a, s, b = a·s + e)` with uniform `a`
///
/// `s` and `e` are crown samples of the given radius.
pub fn pairgen<R: RngCore>(
    ctx: RingContext,
    radius: u32,
    rng: &mut R,
) -> Result<(Polynomial, Polynomial, Polynomial)> {
    let s = crown_sample(ctx, radius, rng)?;
    let e = crown_sample(ctx, radius, rng)?;
    let a = uniform_poly(ctx, rng)?;
    let b = a.mul(&s)?.add(&e)?;
    debug!("Generated RLWE pair in {} with radius {}", ctx, radius);
    Ok((a, s, b))
}

/// Ring-LWE instance whose `a` is expanded deterministically from `seed`
pub fn pairgen_seeded<R: RngCore>(
    ctx: RingContext,
    seed: &[u8],
    radius: u32,
    rng: &mut R,
) -> Result<(Polynomial, Polynomial, Polynomial)> {
    let mut a_seed = Vec::with_capacity(seed.len() + SEEDED_A_SUFFIX.len());
    a_seed.extend_from_slice(seed);
    a_seed.extend_from_slice(SEEDED_A_SUFFIX);
    let a = Polynomial::from_reduced(ctx, expand_seed_to_mod_q(&a_seed, ctx.n(), ctx.q())?)?;

    let s = crown_sample(ctx, radius, rng)?;
    let e = crown_sample(ctx, radius, rng)?;
    let b = a.mul(&s)?.add(&e)?;
    Ok((a, s, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const RADIUS: u32 = 3;

    fn ctx() -> RingContext {
        RingContext::new(12289, 64).unwrap()
    }

    #[test]
    fn test_uniform_and_crown_bounds() {
        let mut rng = StdRng::seed_from_u64(2025);
        let (f, g) = uniform_pair(ctx(), &mut rng).unwrap();
        assert_eq!(f.coeffs().len(), 64);
        assert_ne!(f, g);

        let (s, e) = crown_pair(ctx(), RADIUS, &mut rng).unwrap();
        assert!(s.infinity_norm() <= RADIUS as u64);
        assert!(e.infinity_norm() <= RADIUS as u64);
    }

    #[test]
    fn test_pairgen_relation() {
        let mut rng = StdRng::seed_from_u64(2025);
        let (a, s, b) = pairgen(ctx(), RADIUS, &mut rng).unwrap();
        let e = b.sub(&a.mul(&s).unwrap()).unwrap();
        assert!(s.infinity_norm() <= RADIUS as u64);
        assert!(e.infinity_norm() <= RADIUS as u64);
        assert_eq!(a.mul(&s).unwrap().add(&e).unwrap(), b);
    }

    #[test]
    fn test_pairgen_seeded_fixes_a() {
        let seed = b"unit-test-seed";
        let mut rng = StdRng::seed_from_u64(1);
        let (a1, s1, b1) = pairgen_seeded(ctx(), seed, RADIUS, &mut rng).unwrap();
        let (a2, _, _) = pairgen_seeded(ctx(), seed, RADIUS, &mut rng).unwrap();

        let expected = expand_seed_to_mod_q(b"unit-test-seedA", 64, 12289).unwrap();
        assert_eq!(a1.coeffs(), &expected[..]);
        assert_eq!(a1, a2);

        let e = b1.sub(&a1.mul(&s1).unwrap()).unwrap();
        assert!(e.infinity_norm() <= RADIUS as u64);
    }
}
