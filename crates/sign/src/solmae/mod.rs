//! SOLMAE-style lattice signature over Z_q[x]/(x^n + 1)
//!
//! The public matrix A is expanded from a 32-byte seed `rho`, the secret is a
//! pair of short vectors `(s, e)` and the public key carries the high bits of
//! `t = A·s + e`. Signatures are Fiat-Shamir transcripts `(c, w1, z)`.
//!
//! Submodules:
//! - `arithmetic.rs`: high/low bit split and vector helpers
//! - `matrix.rs`: expansion of A and NTT-domain matrix-vector products
//! - `encoding.rs`: byte layouts of keys, signatures and the transcript
//! - `sign.rs`: `keygen`, `sign` and `verify`

use core::fmt;
use core::marker::PhantomData;

use zeroize::{Zeroize, ZeroizeOnDrop};

use solmae_algorithms::Polynomial;
use solmae_params::pqc::solmae::{Solmae256Params, Solmae512Params, SolmaeSchemeParams};

mod arithmetic;
mod encoding;
mod matrix;
mod sign;

pub use arithmetic::reconstruct;
pub use encoding::{
    compact_signature_bytes, compact_signature_from_bytes, public_key_bytes, public_key_from_bytes,
    signature_bytes, signature_from_bytes,
};
pub use sign::{keygen, sign, verify};

use crate::error::Result;

/// Public key `(rho, t1)`
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolmaePublicKey {
    /// Seed of the public matrix A
    pub rho: Vec<u8>,
    /// High bits of `t`, one byte per coefficient, one row per module index
    pub t1: Vec<Vec<u8>>,
}

/// Secret key
///
/// Holds the short vectors, the low bits of `t`, `tr` and a copy of the
/// public key. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SolmaeSecretKey {
    pub(crate) s: Vec<Polynomial>,
    pub(crate) e: Vec<Polynomial>,
    pub(crate) t0: Vec<Vec<i32>>,
    pub(crate) tr: Vec<u8>,
    pub(crate) pk: SolmaePublicKey,
}

impl SolmaeSecretKey {
    /// The matching public key
    pub fn public_key(&self) -> &SolmaePublicKey {
        &self.pk
    }

    /// `H(rho ‖ t1)`
    pub fn tr(&self) -> &[u8] {
        &self.tr
    }

    /// Low bits of `t`, so that `(t1 << d) + t0 == t (mod q)`
    pub fn t0(&self) -> &[Vec<i32>] {
        &self.t0
    }
}

impl fmt::Debug for SolmaeSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolmaeSecretKey")
            .field("pk", &self.pk)
            .finish_non_exhaustive()
    }
}

/// Signature `(z, c, w1)`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolmaeSignature {
    /// Response vectors, coefficients in `[0, q)`
    pub z: Vec<Vec<u32>>,
    /// Challenge bytes
    pub c: Vec<u8>,
    /// High bits of the commitment `A·y`
    pub w1: Vec<Vec<u8>>,
}

/// SOLMAE signature scheme over the parameter set `P`
pub struct Solmae<P: SolmaeSchemeParams> {
    _params: PhantomData<P>,
}

impl<P: SolmaeSchemeParams> Solmae<P> {
    /// Serialize a public key
    pub fn public_key_to_bytes(pk: &SolmaePublicKey) -> Vec<u8> {
        public_key_bytes(pk)
    }

    /// Parse a public key
    pub fn public_key_from_bytes(bytes: &[u8]) -> Result<SolmaePublicKey> {
        public_key_from_bytes::<P>(bytes)
    }

    /// Serialize a signature
    pub fn signature_to_bytes(sig: &SolmaeSignature) -> Result<Vec<u8>> {
        signature_bytes::<P>(sig)
    }

    /// Parse a signature
    pub fn signature_from_bytes(bytes: &[u8]) -> Result<SolmaeSignature> {
        signature_from_bytes::<P>(bytes)
    }

    /// Serialize a signature with the compact response encoding
    pub fn signature_to_compact_bytes(sig: &SolmaeSignature) -> Result<Vec<u8>> {
        compact_signature_bytes::<P>(sig)
    }

    /// Parse a compact signature
    pub fn signature_from_compact_bytes(bytes: &[u8]) -> Result<SolmaeSignature> {
        compact_signature_from_bytes::<P>(bytes)
    }
}

#[cfg(feature = "std")]
impl<P: SolmaeSchemeParams> solmae_api::Signature for Solmae<P> {
    type PublicKey = SolmaePublicKey;
    type SecretKey = SolmaeSecretKey;
    type SignatureData = SolmaeSignature;
    type KeyPair = (Self::PublicKey, Self::SecretKey);

    fn name() -> &'static str {
        P::NAME
    }

    fn keypair<R: rand::CryptoRng + rand::RngCore>(
        rng: &mut R,
    ) -> solmae_api::Result<Self::KeyPair> {
        Ok(keygen::<P, R>(rng)?)
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        keypair.0.clone()
    }

    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
        keypair.1.clone()
    }

    fn sign(message: &[u8], secret_key: &Self::SecretKey) -> solmae_api::Result<Self::SignatureData> {
        let mut rng = rand::rngs::OsRng;
        Ok(sign::<P, _>(secret_key, message, &mut rng)?)
    }

    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> solmae_api::Result<bool> {
        Ok(verify::<P>(public_key, message, signature)?)
    }
}

/// n = 256
pub type Solmae256 = Solmae<Solmae256Params>;
/// n = 512
pub type Solmae512 = Solmae<Solmae512Params>;
