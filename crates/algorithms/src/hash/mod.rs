//! Domain-separated hashing and extendable output
//!
//! Every input is framed before it reaches the primitive: the domain tag
//! (when present) and then each part are written as a 4-byte big-endian
//! length followed by the bytes themselves. SHA-256 comes from `sha2`,
//! SHAKE128/256 from `sha3`.

use sha2::{Digest, Sha256};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake256};

use crate::error::Result;
use crate::poly::sampling::sample_cbd;

/// Message-to-integer hashing
pub const DOMAIN_MSG: &[u8] = b"HMSG";
/// Public-key binding
pub const DOMAIN_PK: &[u8] = b"HPK";
/// Challenge derivation
pub const DOMAIN_CHALLENGE: &[u8] = b"HCH";
/// Seed expansion
pub const DOMAIN_SEED: &[u8] = b"HSEED";
/// Continuation blocks of small-polynomial sampling
pub const DOMAIN_POLY: &[u8] = b"HPOLY";
/// Public matrix expansion
pub const DOMAIN_MATRIX: &[u8] = b"HMAT";

/// Digest size of [`h_sha256`]
pub const SHA256_BYTES: usize = 32;

fn frame<F: FnMut(&[u8])>(parts: &[&[u8]], domain: &[u8], mut absorb: F) {
    if !domain.is_empty() {
        absorb(&(domain.len() as u32).to_be_bytes());
        absorb(domain);
    }
    for part in parts {
        absorb(&(part.len() as u32).to_be_bytes());
        absorb(part);
    }
}

/// SHA-256 over the framed parts
pub fn h_sha256(parts: &[&[u8]], domain: &[u8]) -> [u8; SHA256_BYTES] {
    let mut hasher = Sha256::new();
    frame(parts, domain, |bytes| Digest::update(&mut hasher, bytes));
    hasher.finalize().into()
}

/// [`h_sha256`] read as a big-endian integer and reduced modulo `m`
pub fn h_sha256_int(parts: &[&[u8]], m: u64, domain: &[u8]) -> Result<u64> {
    crate::error::validate::domain(m > 0, "h_sha256_int", "modulus must be positive")?;
    let digest = h_sha256(parts, domain);
    let m = m as u128;
    // Horner over bytes keeps the accumulator below 2^72
    Ok(digest
        .iter()
        .fold(0u128, |acc, &b| ((acc << 8) | b as u128) % m) as u64)
}

/// SHAKE128 over the framed parts, squeezed to `outlen` bytes
pub fn xof_shake128(parts: &[&[u8]], outlen: usize, domain: &[u8]) -> Vec<u8> {
    let mut xof = Shake128::default();
    frame(parts, domain, |bytes| xof.update(bytes));
    let mut out = vec![0u8; outlen];
    xof.finalize_xof().read(&mut out);
    out
}

/// SHAKE256 over the framed parts, squeezed to `outlen` bytes
pub fn xof_shake256(parts: &[&[u8]], outlen: usize, domain: &[u8]) -> Vec<u8> {
    let mut xof = Shake256::default();
    frame(parts, domain, |bytes| xof.update(bytes));
    let mut out = vec![0u8; outlen];
    xof.finalize_xof().read(&mut out);
    out
}

/// Hash a message to an element of `[0, q)`
pub fn h_msg_to_int_mod_q(msg: &[u8], q: u32) -> Result<u32> {
    Ok(h_sha256_int(&[msg], q as u64, DOMAIN_MSG)? as u32)
}

/// Binding value `tr` of an encoded public key
pub fn h_pk_bind(pk_bytes: &[u8]) -> [u8; SHA256_BYTES] {
    h_sha256(&[pk_bytes], DOMAIN_PK)
}

/// Challenge bytes from the key binding `mu` and the signing transcript
pub fn h_challenge(mu: &[u8], transcript: &[u8], out_bytes: usize) -> Vec<u8> {
    xof_shake128(&[mu, transcript], out_bytes, DOMAIN_CHALLENGE)
}

/// Expand a seed to `out_bytes` pseudo-random bytes
pub fn h_seed_expand(seed: &[u8], out_bytes: usize) -> Vec<u8> {
    xof_shake128(&[seed], out_bytes, DOMAIN_SEED)
}

/// Byte stream for entry `(i, j)` of the public matrix
pub fn h_matrix_entry(rho: &[u8], i: u16, j: u16, out_bytes: usize) -> Vec<u8> {
    xof_shake128(&[rho, &i.to_be_bytes(), &j.to_be_bytes()], out_bytes, DOMAIN_MATRIX)
}

/// `n` centred binomial coefficients with parameter `eta` derived from `seed`
///
/// The first block comes from [`h_seed_expand`]; if it falls short, 32-byte
/// blocks keyed by the number of coefficients produced so far are appended.
pub fn h_to_small_poly(seed: &[u8], n: usize, eta: u32) -> Result<Vec<i32>> {
    let nbytes = (n * 2 * eta as usize + 7) / 8;
    let mut coeffs = sample_cbd(&h_seed_expand(seed, nbytes), eta)?;
    while coeffs.len() < n {
        let counter = (coeffs.len() as u32).to_be_bytes();
        let block = xof_shake128(&[seed, &counter], 32, DOMAIN_POLY);
        coeffs.extend(sample_cbd(&block, eta)?);
    }
    coeffs.truncate(n);
    Ok(coeffs)
}
