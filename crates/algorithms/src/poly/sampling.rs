//! sampling.rs - Integer samplers over Z and Z_q
//!
//! Contains the cumulative-distribution-table (CDT) discrete Gaussian, the
//! centered binomial distribution, uniform sampling modulo q and the bounded
//! uniform "crown" distribution.

use rand::RngCore;
use tracing::debug;

use crate::drbg::HmacDrbg;
use crate::error::{Error, Result};

/// 2^64 as a float, the fixed-point scale of the CDT
const CDT_SCALE: f64 = 18_446_744_073_709_551_616.0;

/// Cumulative table of the half discrete Gaussian `|X|`, `X ~ D_{Z,σ}`
///
/// Entry `x` holds `P(|X| <= x)` scaled by 2^64, for `x` in `0..=cutoff`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCdtTable"))]
pub struct CdtTable {
    sigma: f64,
    cutoff: usize,
    cdf_scaled: Vec<u64>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCdtTable {
    sigma: f64,
    cutoff: usize,
    cdf_scaled: Vec<u64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCdtTable> for CdtTable {
    type Error = Error;

    fn try_from(raw: RawCdtTable) -> Result<Self> {
        if !(raw.sigma.is_finite() && raw.sigma > 0.0) {
            return Err(Error::domain("CdtTable", format!("sigma {} must be positive", raw.sigma)));
        }
        if raw.cutoff == 0 || raw.cdf_scaled.len() != raw.cutoff + 1 {
            return Err(Error::Length {
                context: "CdtTable",
                expected: raw.cutoff.max(1) + 1,
                actual: raw.cdf_scaled.len(),
            });
        }
        if raw.cdf_scaled.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::domain("CdtTable", "cumulative values decrease"));
        }
        Ok(Self {
            sigma: raw.sigma,
            cutoff: raw.cutoff,
            cdf_scaled: raw.cdf_scaled,
        })
    }
}

impl CdtTable {
    /// Build the table for standard deviation `sigma`, truncated at
    /// `max(1, ceil(sigma * tailcut))`
    pub fn build(sigma: f64, tailcut: f64) -> Result<Self> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(Error::domain("CdtTable::build", format!("sigma {} must be positive", sigma)));
        }
        if !(tailcut.is_finite() && tailcut > 0.0) {
            return Err(Error::domain(
                "CdtTable::build",
                format!("tailcut {} must be positive", tailcut),
            ));
        }
        let cutoff = ((sigma * tailcut).ceil() as usize).max(1);

        let two_sigma_sq = 2.0 * sigma * sigma;
        let weights: Vec<f64> = (0..=cutoff)
            .map(|x| (-((x * x) as f64) / two_sigma_sq).exp())
            .collect();
        let z = weights[0] + 2.0 * weights[1..].iter().sum::<f64>();

        let mut cdf_scaled = Vec::with_capacity(cutoff + 1);
        let mut cum = 0.0;
        for (x, &w) in weights.iter().enumerate() {
            cum += if x == 0 { w / z } else { 2.0 * w / z };
            // float to int casts saturate, 2^64 maps to u64::MAX
            cdf_scaled.push((cum * CDT_SCALE).round().clamp(0.0, CDT_SCALE) as u64);
        }
        for i in 1..cdf_scaled.len() {
            cdf_scaled[i] = cdf_scaled[i].max(cdf_scaled[i - 1]);
        }

        debug!("Built CDT table sigma={} cutoff={}", sigma, cutoff);
        Ok(Self {
            sigma,
            cutoff,
            cdf_scaled,
        })
    }

    /// Standard deviation
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Largest magnitude the table can return
    pub fn cutoff(&self) -> usize {
        self.cutoff
    }

    /// Scaled cumulative values, non-decreasing
    pub fn cdf_scaled(&self) -> &[u64] {
        &self.cdf_scaled
    }

    /// Map one uniform 64-bit word to a signed sample
    ///
    /// The magnitude is the smallest index whose cumulative value reaches
    /// `u`; the sign comes from the lowest bit of `u`.
    pub fn sample_u64(&self, u: u64) -> i64 {
        let (mut lo, mut hi) = (0usize, self.cutoff);
        while lo < hi {
            let mid = (lo + hi) / 2;
            if self.cdf_scaled[mid] >= u {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        let x = lo as i64;
        if u & 1 == 0 {
            x
        } else {
            -x
        }
    }

    /// Draw `n` samples, one 64-bit word each
    pub fn sample_vec<R: RngCore>(&self, n: usize, rng: &mut R) -> Vec<i64> {
        (0..n).map(|_| self.sample_u64(rng.next_u64())).collect()
    }
}

/// Centered binomial samples from a byte string
///
/// Bits are consumed most significant first across the whole buffer; each
/// sample is the popcount of `eta` bits minus the popcount of the next `eta`.
/// Trailing bits that cannot form a full sample are ignored.
pub fn sample_cbd(bytes: &[u8], eta: u32) -> Result<Vec<i32>> {
    if eta == 0 {
        return Err(Error::domain("sample_cbd", "eta must be positive"));
    }
    let eta = eta as usize;
    let nbits = bytes.len() * 8;
    let bit = |pos: usize| ((bytes[pos / 8] >> (7 - pos % 8)) & 1) as i32;

    let mut out = Vec::with_capacity(nbits / (2 * eta));
    let mut pos = 0;
    while pos + 2 * eta <= nbits {
        let a: i32 = (pos..pos + eta).map(bit).sum();
        let b: i32 = (pos + eta..pos + 2 * eta).map(bit).sum();
        out.push(a - b);
        pos += 2 * eta;
    }
    Ok(out)
}

/// `n` centered binomial samples drawn from `rng`
pub fn sample_cbd_random<R: RngCore>(n: usize, eta: u32, rng: &mut R) -> Result<Vec<i32>> {
    let mut buf = vec![0u8; (n * 2 * eta as usize + 7) / 8];
    rng.fill_bytes(&mut buf);
    let mut coeffs = sample_cbd(&buf, eta)?;
    while coeffs.len() < n {
        let mut extra = [0u8; 32];
        rng.fill_bytes(&mut extra);
        coeffs.extend(sample_cbd(&extra, eta)?);
    }
    coeffs.truncate(n);
    Ok(coeffs)
}

/// Bytes needed to hold values below `m`, and the rejection limit
fn rejection_window(m: u64) -> (usize, u128) {
    let nbytes = ((64 - m.leading_zeros() as usize) + 7) / 8;
    let range = 1u128 << (8 * nbytes);
    (nbytes, range - range % m as u128)
}

fn be_bytes_to_u128(bytes: &[u8]) -> u128 {
    bytes.iter().fold(0u128, |acc, &b| (acc << 8) | b as u128)
}

/// Uniform integer in `[0, m)` by rejection over big-endian byte strings
pub fn random_uint_below<R: RngCore>(m: u64, rng: &mut R) -> Result<u64> {
    if m == 0 {
        return Err(Error::domain("random_uint_below", "modulus must be positive"));
    }
    let (nbytes, limit) = rejection_window(m);
    let mut buf = [0u8; 8];
    loop {
        rng.fill_bytes(&mut buf[..nbytes]);
        let x = be_bytes_to_u128(&buf[..nbytes]);
        if x < limit {
            return Ok((x % m as u128) as u64);
        }
    }
}

/// `n` values uniform in `[0, q)`
pub fn uniform_mod_q<R: RngCore>(n: usize, q: u32, rng: &mut R) -> Result<Vec<u32>> {
    (0..n)
        .map(|_| random_uint_below(q as u64, rng).map(|x| x as u32))
        .collect()
}

/// `n` values uniform in `[-bound, bound]`
pub fn uniform_small<R: RngCore>(n: usize, bound: u32, rng: &mut R) -> Result<Vec<i64>> {
    let width = 2 * bound as u64 + 1;
    (0..n)
        .map(|_| random_uint_below(width, rng).map(|x| x as i64 - bound as i64))
        .collect()
}

/// Deterministically expand `seed` into `n` values uniform in `[0, q)`
///
/// Draws big-endian words from an HMAC-DRBG seeded with `seed` and rejects
/// values above the largest multiple of q.
pub fn expand_seed_to_mod_q(seed: &[u8], n: usize, q: u32) -> Result<Vec<u32>> {
    if q == 0 {
        return Err(Error::domain("expand_seed_to_mod_q", "modulus must be positive"));
    }
    let (nbytes, limit) = rejection_window(q as u64);
    let mut drbg = HmacDrbg::new(seed);
    let mut out = Vec::with_capacity(n);
    while out.len() < n {
        let chunk = drbg.generate(nbytes, None);
        let x = be_bytes_to_u128(&chunk);
        if x < limit {
            out.push((x % q as u128) as u32);
        }
    }
    Ok(out)
}
