//! Byte layouts for public keys, signatures and the signing transcript
//!
//! - public key: `rho ‖ t1[0] ‖ … ‖ t1[k-1]`, one byte per high-bit coefficient
//! - signature: `c ‖ w1[0] ‖ … ‖ w1[k-1] ‖ z`, z as 2-byte big-endian words
//! - compact signature: as above, with each z vector packed into
//!   `Z_COMPACT_BITS` signed bits per coefficient

use solmae_algorithms::poly::serialize::{compress, decompress};
use solmae_algorithms::modular::centered;
use solmae_params::pqc::solmae::SolmaeSchemeParams;

use super::sign::signature_shape_error;
use super::{SolmaePublicKey, SolmaeSignature};
use crate::error::{Error as SignError, Result};

/// `rho ‖ t1`, the bytes bound into `tr`
pub fn public_key_bytes(pk: &SolmaePublicKey) -> Vec<u8> {
    let mut out = Vec::with_capacity(pk.rho.len() + pk.t1.iter().map(Vec::len).sum::<usize>());
    out.extend_from_slice(&pk.rho);
    for row in &pk.t1 {
        out.extend_from_slice(row);
    }
    out
}

/// Parse a public key of exactly `P::PUBLIC_KEY_BYTES` bytes
pub fn public_key_from_bytes<P: SolmaeSchemeParams>(bytes: &[u8]) -> Result<SolmaePublicKey> {
    if bytes.len() != P::PUBLIC_KEY_BYTES {
        return Err(SignError::InvalidKeySize {
            expected: P::PUBLIC_KEY_BYTES,
            actual: bytes.len(),
        });
    }
    let (rho, rest) = bytes.split_at(P::SEED_BYTES);
    Ok(SolmaePublicKey {
        rho: rho.to_vec(),
        t1: rest.chunks_exact(P::N).map(<[u8]>::to_vec).collect(),
    })
}

/// z coefficients as 2-byte big-endian words, vector by vector
///
/// Callers guarantee every coefficient is below q.
pub(crate) fn z_bytes(z: &[Vec<u32>]) -> Vec<u8> {
    z.iter()
        .flatten()
        .flat_map(|&x| (x as u16).to_be_bytes())
        .collect()
}

/// `message ‖ w1 ‖ z_bytes`, hashed together with `tr` into the challenge
pub(crate) fn challenge_transcript(message: &[u8], w1: &[Vec<u8>], z: &[Vec<u32>]) -> Vec<u8> {
    let mut out = message.to_vec();
    for row in w1 {
        out.extend_from_slice(row);
    }
    out.extend(z_bytes(z));
    out
}

fn check_encodable<P: SolmaeSchemeParams>(sig: &SolmaeSignature) -> Result<()> {
    match signature_shape_error::<P>(sig) {
        Some(reason) => Err(SignError::Encoding(format!("cannot encode signature: {}", reason))),
        None => Ok(()),
    }
}

fn push_c_and_w1(out: &mut Vec<u8>, sig: &SolmaeSignature) {
    out.extend_from_slice(&sig.c);
    for row in &sig.w1 {
        out.extend_from_slice(row);
    }
}

/// Plain signature encoding
///
/// Fails unless the signature has the shape of `P` and every z coefficient
/// is below q.
pub fn signature_bytes<P: SolmaeSchemeParams>(sig: &SolmaeSignature) -> Result<Vec<u8>> {
    check_encodable::<P>(sig)?;
    let mut out = Vec::with_capacity(P::SIGNATURE_BYTES);
    push_c_and_w1(&mut out, sig);
    out.extend(z_bytes(&sig.z));
    Ok(out)
}

fn split_c_and_w1<P: SolmaeSchemeParams>(bytes: &[u8]) -> (Vec<u8>, Vec<Vec<u8>>, &[u8]) {
    let (c, rest) = bytes.split_at(P::CHALLENGE_BYTES);
    let (w1, rest) = rest.split_at(P::K_DIM * P::N);
    (
        c.to_vec(),
        w1.chunks_exact(P::N).map(<[u8]>::to_vec).collect(),
        rest,
    )
}

/// Parse a plain signature of exactly `P::SIGNATURE_BYTES` bytes
///
/// Every z coefficient must be below q.
pub fn signature_from_bytes<P: SolmaeSchemeParams>(bytes: &[u8]) -> Result<SolmaeSignature> {
    if bytes.len() != P::SIGNATURE_BYTES {
        return Err(SignError::InvalidSignatureSize {
            expected: P::SIGNATURE_BYTES,
            actual: bytes.len(),
        });
    }
    let (c, w1, z_raw) = split_c_and_w1::<P>(bytes);

    let mut z = Vec::with_capacity(P::K_DIM);
    for row in z_raw.chunks_exact(P::N * P::Z_COEFF_BYTES) {
        let coeffs: Vec<u32> = row
            .chunks_exact(2)
            .map(|w| u16::from_be_bytes([w[0], w[1]]) as u32)
            .collect();
        if let Some(bad) = coeffs.iter().find(|&&x| x >= P::Q) {
            return Err(SignError::Deserialization(format!(
                "z coefficient {} is not below q = {}",
                bad,
                P::Q
            )));
        }
        z.push(coeffs);
    }
    Ok(SolmaeSignature { z, c, w1 })
}

/// Compact signature encoding
///
/// Lossless while every centred z coefficient fits in `Z_COMPACT_BITS`
/// signed bits; larger values saturate.
pub fn compact_signature_bytes<P: SolmaeSchemeParams>(sig: &SolmaeSignature) -> Result<Vec<u8>> {
    check_encodable::<P>(sig)?;
    let slen = P::Z_COMPACT_BITS * P::N;
    let mut out = Vec::with_capacity(P::COMPACT_SIGNATURE_BYTES);
    push_c_and_w1(&mut out, sig);
    for zi in &sig.z {
        let values: Vec<i64> = zi.iter().map(|&x| centered(x as i64, P::Q as u64)).collect();
        out.extend(compress(&values, slen, P::Q)?);
    }
    Ok(out)
}

/// Parse a compact signature of exactly `P::COMPACT_SIGNATURE_BYTES` bytes
pub fn compact_signature_from_bytes<P: SolmaeSchemeParams>(bytes: &[u8]) -> Result<SolmaeSignature> {
    if bytes.len() != P::COMPACT_SIGNATURE_BYTES {
        return Err(SignError::InvalidSignatureSize {
            expected: P::COMPACT_SIGNATURE_BYTES,
            actual: bytes.len(),
        });
    }
    let slen = P::Z_COMPACT_BITS * P::N;
    let (c, w1, z_raw) = split_c_and_w1::<P>(bytes);
    let z = z_raw
        .chunks_exact((slen + 7) / 8)
        .map(|chunk| decompress(chunk, slen, P::N, P::Q))
        .collect::<solmae_algorithms::Result<Vec<_>>>()?;
    Ok(SolmaeSignature { z, c, w1 })
}
