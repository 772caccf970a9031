//! Key generation, signing and verification
//!
//! Keys:
//! - `t = A·s + e` with A expanded from `rho`, `s` and `e` small
//! - `t1 = t >> d` is published, `t0` stays in the secret key
//! - `tr = H(rho ‖ t1)` binds every challenge to the public key
//!
//! Signing commits to `w1 = HighBits(A·y)` and derives the challenge from
//! `tr`, the message, `w1` and `z`. Verification recomputes that challenge.

use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use tracing::{debug, instrument};
use zeroize::Zeroize;

use solmae_algorithms::hash::{h_challenge, h_pk_bind, h_seed_expand, h_to_small_poly};
use solmae_algorithms::{NttPlan, Polynomial, RingContext};
use solmae_params::pqc::solmae::SolmaeSchemeParams;

use super::arithmetic::{add_vectors, check_parameters, high_bits, power2round};
use super::encoding::{challenge_transcript, public_key_bytes};
use super::matrix::{expand_matrix_a, matrix_vector_mul};
use super::{SolmaePublicKey, SolmaeSecretKey, SolmaeSignature};
use crate::error::{Error as SignError, Result};

fn ring<P: SolmaeSchemeParams>() -> Result<(RingContext, NttPlan)> {
    check_parameters::<P>()?;
    let ctx = RingContext::for_scheme::<P>()?;
    let plan = NttPlan::new(ctx)?;
    Ok((ctx, plan))
}

/// `K_DIM` small polynomials, each from its own fresh seed
fn small_vector<P, R>(ctx: RingContext, rng: &mut R) -> Result<Vec<Polynomial>>
where
    P: SolmaeSchemeParams,
    R: RngCore + CryptoRng,
{
    let mut out = Vec::with_capacity(P::K_DIM);
    let mut seed = vec![0u8; P::SEED_BYTES];
    for _ in 0..P::K_DIM {
        rng.fill_bytes(&mut seed);
        let mut coeffs: Vec<i64> = h_to_small_poly(&seed, P::N, P::ETA)?
            .into_iter()
            .map(i64::from)
            .collect();
        out.push(Polynomial::from_coeffs(ctx, &coeffs));
        coeffs.zeroize();
    }
    seed.zeroize();
    Ok(out)
}

/// Generate a key pair
#[instrument(level = "debug", skip_all, fields(algorithm = P::NAME))]
pub fn keygen<P, R>(rng: &mut R) -> Result<(SolmaePublicKey, SolmaeSecretKey)>
where
    P: SolmaeSchemeParams,
    R: RngCore + CryptoRng,
{
    let (ctx, plan) = ring::<P>()?;

    // Step 1: rho from a fresh seed
    let mut seed = vec![0u8; P::SEED_BYTES];
    rng.fill_bytes(&mut seed);
    let rho = h_seed_expand(&seed, P::SEED_BYTES);
    seed.zeroize();

    // Step 2: secrets
    let s = small_vector::<P, R>(ctx, rng)?;
    let e = small_vector::<P, R>(ctx, rng)?;

    // Step 3: t = A·s + e
    let a = expand_matrix_a(&rho, P::K_DIM, ctx)?;
    let t = add_vectors(&matrix_vector_mul(&a, &s, &plan)?, &e)?;

    // Step 4: split t
    let (t1, t0): (Vec<_>, Vec<_>) = t.iter().map(|ti| power2round(ti, P::D_PARAM)).unzip();

    // Step 5: tr = H(rho ‖ t1)
    let pk = SolmaePublicKey { rho, t1 };
    let tr = h_pk_bind(&public_key_bytes(&pk)).to_vec();

    debug!("Generated {} key pair", P::NAME);
    Ok((
        pk.clone(),
        SolmaeSecretKey {
            s,
            e,
            t0,
            tr,
            pk,
        },
    ))
}

fn check_secret_key<P: SolmaeSchemeParams>(sk: &SolmaeSecretKey, ctx: RingContext) -> Result<()> {
    if sk.s.len() != P::K_DIM || sk.e.len() != P::K_DIM || sk.t0.len() != P::K_DIM {
        return Err(SignError::InvalidSecretKey(format!(
            "expected {} polynomials per vector",
            P::K_DIM
        )));
    }
    if sk.s.iter().chain(&sk.e).any(|p| p.context() != ctx) {
        return Err(SignError::InvalidSecretKey(format!(
            "secret polynomials are not over {}",
            ctx
        )));
    }
    if sk.tr.len() != P::TR_BYTES {
        return Err(SignError::InvalidSecretKey(format!(
            "tr has {} bytes, expected {}",
            sk.tr.len(),
            P::TR_BYTES
        )));
    }
    check_public_key::<P>(&sk.pk).map_err(|e| SignError::InvalidSecretKey(e.to_string()))
}

/// Sign `message`
///
/// Every call draws fresh commitment seeds from `rng`, so two signatures
/// on the same message differ.
#[instrument(level = "debug", skip_all, fields(algorithm = P::NAME, message_len = message.len()))]
pub fn sign<P, R>(sk: &SolmaeSecretKey, message: &[u8], rng: &mut R) -> Result<SolmaeSignature>
where
    P: SolmaeSchemeParams,
    R: RngCore + CryptoRng,
{
    let (ctx, plan) = ring::<P>()?;
    check_secret_key::<P>(sk, ctx)?;

    let a = expand_matrix_a(&sk.pk.rho, P::K_DIM, ctx)?;

    // Step 1: commitment
    let mut y = small_vector::<P, R>(ctx, rng)?;
    let w = matrix_vector_mul(&a, &y, &plan)?;
    let w1: Vec<Vec<u8>> = w.iter().map(|wi| high_bits(wi, P::D_PARAM)).collect();

    // Step 2: response
    let z: Vec<Vec<u32>> = y.iter().map(Polynomial::to_vec).collect();
    y.zeroize();

    // Step 3: challenge
    let transcript = challenge_transcript(message, &w1, &z);
    let c = h_challenge(&sk.tr, &transcript, P::CHALLENGE_BYTES);

    Ok(SolmaeSignature { z, c, w1 })
}

/// Shape check of a public key against the parameter set
pub(crate) fn check_public_key<P: SolmaeSchemeParams>(pk: &SolmaePublicKey) -> Result<()> {
    if pk.rho.len() != P::SEED_BYTES {
        return Err(SignError::InvalidPublicKey(format!(
            "rho has {} bytes, expected {}",
            pk.rho.len(),
            P::SEED_BYTES
        )));
    }
    if pk.t1.len() != P::K_DIM {
        return Err(SignError::InvalidPublicKey(format!(
            "t1 has {} rows, expected {}",
            pk.t1.len(),
            P::K_DIM
        )));
    }
    if let Some(row) = pk.t1.iter().find(|row| row.len() != P::N) {
        return Err(SignError::InvalidPublicKey(format!(
            "t1 row has {} entries, expected {}",
            row.len(),
            P::N
        )));
    }
    let max_hi = (P::Q - 1) >> P::D_PARAM;
    if pk.t1.iter().flatten().any(|&b| b as u32 > max_hi) {
        return Err(SignError::InvalidPublicKey(format!(
            "t1 entry exceeds {}",
            max_hi
        )));
    }
    Ok(())
}

/// Why a signature does not fit the parameter set, if it does not
pub(crate) fn signature_shape_error<P: SolmaeSchemeParams>(sig: &SolmaeSignature) -> Option<&'static str> {
    if sig.c.len() != P::CHALLENGE_BYTES {
        return Some("challenge length");
    }
    if sig.w1.len() != P::K_DIM || sig.w1.iter().any(|row| row.len() != P::N) {
        return Some("w1 shape");
    }
    if sig.z.len() != P::K_DIM || sig.z.iter().any(|zi| zi.len() != P::N) {
        return Some("z shape");
    }
    if sig.z.iter().flatten().any(|&x| x >= P::Q) {
        return Some("z coefficient out of range");
    }
    None
}

/// Verify `sig` on `message`
///
/// `Ok(false)` for any rejected signature; `Err` only when `pk` itself is
/// malformed.
#[instrument(level = "debug", skip_all, fields(algorithm = P::NAME, message_len = message.len()))]
pub fn verify<P: SolmaeSchemeParams>(
    pk: &SolmaePublicKey,
    message: &[u8],
    sig: &SolmaeSignature,
) -> Result<bool> {
    check_parameters::<P>()?;
    check_public_key::<P>(pk)?;

    if let Some(reason) = signature_shape_error::<P>(sig) {
        debug!("Rejected signature: {}", reason);
        return Ok(false);
    }

    let tr = h_pk_bind(&public_key_bytes(pk));
    let transcript = challenge_transcript(message, &sig.w1, &sig.z);
    let expected = h_challenge(&tr, &transcript, P::CHALLENGE_BYTES);

    let accepted = bool::from(expected.as_slice().ct_eq(sig.c.as_slice()));
    if !accepted {
        debug!("Rejected signature: challenge mismatch");
    }
    Ok(accepted)
}
