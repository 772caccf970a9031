//! params.rs - Ring configuration carried by every polynomial

use core::fmt;

use solmae_params::pqc::solmae::SolmaeSchemeParams;

use crate::error::{Error, Result};

/// Configuration of the ring Z_q[x]/(x^n + 1)
///
/// A `RingContext` is an immutable value shared by copy. Every polynomial
/// carries the context it was created in, and binary operations reject
/// operands from different contexts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRingContext"))]
pub struct RingContext {
    q: u32,
    n: usize,
}

/// Wire form of [`RingContext`], checked by `RingContext::new` on the way in
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawRingContext {
    q: u32,
    n: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRingContext> for RingContext {
    type Error = Error;

    fn try_from(raw: RawRingContext) -> Result<Self> {
        Self::new(raw.q, raw.n)
    }
}

impl RingContext {
    /// Create a ring context
    ///
    /// `q` must be greater than 1 and below 2^31; `n` must be a power of two.
    pub fn new(q: u32, n: usize) -> Result<Self> {
        if q <= 1 || q >= 1 << 31 {
            return Err(Error::config(
                "RingContext::new",
                format!("modulus {} outside (1, 2^31)", q),
            ));
        }
        if !n.is_power_of_two() {
            return Err(Error::config(
                "RingContext::new",
                format!("degree {} is not a power of two", n),
            ));
        }
        Ok(Self { q, n })
    }

    /// Ring of a signature parameter set
    pub fn for_scheme<P: SolmaeSchemeParams>() -> Result<Self> {
        Self::new(P::Q, P::N)
    }

    /// Coefficient modulus
    #[inline(always)]
    pub fn q(&self) -> u32 {
        self.q
    }

    /// Number of coefficients
    #[inline(always)]
    pub fn n(&self) -> usize {
        self.n
    }

    /// True when a negacyclic NTT of length n exists modulo q
    pub fn supports_ntt(&self) -> bool {
        (self.q as u64 - 1) % (2 * self.n as u64) == 0 && is_prime(self.q as u64)
    }

    /// Fail with a configuration error unless `other` is the same ring
    pub fn ensure_same(&self, other: &RingContext, context: &'static str) -> Result<()> {
        if self != other {
            return Err(Error::config(
                context,
                format!("operands from ring {} and ring {}", self, other),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for RingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Z_{}[x]/(x^{} + 1)", self.q, self.n)
    }
}

/// Trial-division primality test
pub fn is_prime(m: u64) -> bool {
    if m < 2 {
        return false;
    }
    if m % 2 == 0 {
        return m == 2;
    }
    let mut d = 3u64;
    while d * d <= m {
        if m % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
