//! HMAC-SHA-256 deterministic random bit generator and entropy sources
//!
//! The generator follows the HMAC_DRBG update/generate construction without
//! a reseed counter: the state starts at `K = 0x00..`, `V = 0x01..` and is
//! updated with the seed. Output depends only on the seed and the sequence of
//! calls, which makes it suitable for deterministic expansion and for
//! reproducible tests.

use hmac::{Hmac, Mac};
use rand::{CryptoRng, RngCore};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

type HmacSha256 = Hmac<Sha256>;

/// Size of the `K` and `V` state words
pub const DRBG_STATE_BYTES: usize = 32;

fn hmac_sha256(key: &[u8; DRBG_STATE_BYTES], chunks: &[&[u8]]) -> [u8; DRBG_STATE_BYTES] {
    let Ok(mut mac) = <HmacSha256 as Mac>::new_from_slice(key) else {
        unreachable!("HMAC accepts keys of any length")
    };
    for chunk in chunks {
        mac.update(chunk);
    }
    mac.finalize().into_bytes().into()
}

/// HMAC-DRBG over SHA-256
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct HmacDrbg {
    k: [u8; DRBG_STATE_BYTES],
    v: [u8; DRBG_STATE_BYTES],
}

impl core::fmt::Debug for HmacDrbg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HmacDrbg").finish_non_exhaustive()
    }
}

impl HmacDrbg {
    /// Instantiate from seed material
    pub fn new(seed: &[u8]) -> Self {
        let mut drbg = Self {
            k: [0x00; DRBG_STATE_BYTES],
            v: [0x01; DRBG_STATE_BYTES],
        };
        drbg.update(Some(seed));
        drbg
    }

    /// Mix `provided` into the state
    ///
    /// With `None` only the first half of the update runs; `Some(&[])`
    /// runs both halves.
    pub fn update(&mut self, provided: Option<&[u8]>) {
        let data = provided.unwrap_or(&[]);
        self.k = hmac_sha256(&self.k, &[&self.v, &[0x00u8], data]);
        self.v = hmac_sha256(&self.k, &[&self.v]);
        if let Some(data) = provided {
            self.k = hmac_sha256(&self.k, &[&self.v, &[0x01u8], data]);
            self.v = hmac_sha256(&self.k, &[&self.v]);
        }
    }

    /// Produce `n` bytes, mixing in optional additional input
    pub fn generate(&mut self, n: usize, additional: Option<&[u8]>) -> Vec<u8> {
        if let Some(add) = additional.filter(|a| !a.is_empty()) {
            self.update(Some(add));
        }
        let mut out = Vec::with_capacity(n + DRBG_STATE_BYTES);
        while out.len() < n {
            self.v = hmac_sha256(&self.k, &[&self.v]);
            out.extend_from_slice(&self.v);
        }
        self.update(additional);
        out.truncate(n);
        out
    }
}

impl RngCore for HmacDrbg {
    fn next_u32(&mut self) -> u32 {
        let bytes = self.generate(4, None);
        u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    fn next_u64(&mut self) -> u64 {
        let bytes = self.generate(8, None);
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes);
        u64::from_be_bytes(word)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let bytes = self.generate(dest.len(), None);
        dest.copy_from_slice(&bytes);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for HmacDrbg {}

/// Where a sampler draws its randomness from
#[derive(Debug, Clone)]
pub enum EntropySource {
    /// Operating system entropy
    #[cfg(feature = "std")]
    Os,
    /// Deterministic stream from a seeded generator
    Drbg(HmacDrbg),
}

impl EntropySource {
    /// Deterministic source seeded with `seed`
    pub fn from_seed(seed: &[u8]) -> Self {
        Self::Drbg(HmacDrbg::new(seed))
    }

    /// True for seeded sources
    pub fn is_deterministic(&self) -> bool {
        matches!(self, Self::Drbg(_))
    }
}

#[cfg(feature = "std")]
impl Default for EntropySource {
    fn default() -> Self {
        Self::Os
    }
}

impl RngCore for EntropySource {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_be_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_be_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        match self {
            #[cfg(feature = "std")]
            Self::Os => rand::rngs::OsRng.fill_bytes(dest),
            Self::Drbg(drbg) => drbg.fill_bytes(dest),
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        match self {
            #[cfg(feature = "std")]
            Self::Os => rand::rngs::OsRng.try_fill_bytes(dest),
            Self::Drbg(drbg) => drbg.try_fill_bytes(dest),
        }
    }
}

impl CryptoRng for EntropySource {}
