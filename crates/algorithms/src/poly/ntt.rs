//! ntt.rs - Number Theoretic Transform over Z_q
//!
//! Iterative radix-2 Cooley-Tukey transform with a bit-reversal shuffle in
//! front of the butterfly stages. Negacyclic convolution modulo x^n + 1 is
//! obtained by twisting with powers of a primitive 2n-th root of unity ψ
//! before the forward transform and untwisting with ψ^{-1} after the inverse.
//!
//! ## Table layout
//! `roots` holds one run of twiddles per butterfly stage, stage lengths
//! 2, 4, ..., n. The stage of length `len` contributes `len / 2` entries
//! `1, w, w^2, ...` with `w = ω^(n / len)` and `ω = ψ^2`, so both tables
//! have `n - 1` entries in total.

use tracing::debug;

use super::params::RingContext;
use crate::error::{validate, Error, Result};
use crate::modular::{add_mod, inv_mod, mul_mod, pow_mod, sub_mod};

/// Distinct prime factors of `n` in increasing order
pub fn factorize(n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    let mut x = n;
    let mut d = 2u64;
    while d * d <= x {
        if x % d == 0 {
            factors.push(d);
            while x % d == 0 {
                x /= d;
            }
        }
        d += if d == 2 { 1 } else { 2 };
    }
    if x > 1 {
        factors.push(x);
    }
    factors
}

/// Element of exact multiplicative order `order` modulo the prime `m`
///
/// Searches for a generator `g` of Z_m^*, then returns `g^((m-1)/order)`.
/// Fails with a domain error when `order` does not divide `m - 1` or when no
/// element of the requested order can be found.
pub fn find_primitive_root(m: u64, order: u64) -> Result<u64> {
    if m < 3 || order == 0 || (m - 1) % order != 0 {
        return Err(Error::domain(
            "find_primitive_root",
            format!("order {} does not divide {} - 1", order, m),
        ));
    }
    let phi = m - 1;
    let phi_primes = factorize(phi);

    let generator = (2..m)
        .find(|&g| phi_primes.iter().all(|&p| pow_mod(g, phi / p, m) != 1))
        .ok_or_else(|| {
            Error::domain(
                "find_primitive_root",
                format!("no generator of the unit group modulo {}", m),
            )
        })?;

    let cofactor = phi / order;
    let order_primes = factorize(order);
    let mut h = pow_mod(generator, cofactor, m);
    let mut multiplier = 2u64;
    while order_primes.iter().any(|&p| pow_mod(h, order / p, m) == 1) {
        if multiplier >= m {
            return Err(Error::domain(
                "find_primitive_root",
                format!("no element of order {} modulo {}", order, m),
            ));
        }
        h = pow_mod(generator, cofactor * multiplier, m);
        multiplier += 1;
    }

    if pow_mod(h, order, m) != 1 {
        return Err(Error::domain(
            "find_primitive_root",
            format!("modulus {} is not prime", m),
        ));
    }
    Ok(h)
}

/// Bit-reversal permutation of `0..n`
pub fn bitrev_permutation(n: usize) -> Result<Vec<usize>> {
    validate::power_of_two("bitrev_permutation", n)?;
    let bits = n.trailing_zeros();
    if bits == 0 {
        return Ok(vec![0]);
    }
    Ok((0..n)
        .map(|i| i.reverse_bits() >> (usize::BITS - bits))
        .collect())
}

/// Per-stage forward and inverse twiddles plus the bit-reversal permutation
pub fn precompute_roots(m: u32, n: usize, psi: u32) -> Result<(Vec<u32>, Vec<u32>, Vec<usize>)> {
    validate::power_of_two("precompute_roots", n)?;
    let q = m as u64;
    let omega = pow_mod(psi as u64, 2, q);

    let mut roots = Vec::with_capacity(n.saturating_sub(1));
    let mut roots_inv = Vec::with_capacity(n.saturating_sub(1));
    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let w_len = pow_mod(omega, (n / len) as u64, q);
        let w_len_inv = inv_mod(w_len as i64, q)?;

        let mut w = 1u64;
        for _ in 0..half {
            roots.push(w as u32);
            w = mul_mod(w as i64, w_len as i64, q);
        }
        let mut w = 1u64;
        for _ in 0..half {
            roots_inv.push(w as u32);
            w = mul_mod(w as i64, w_len_inv as i64, q);
        }
        len <<= 1;
    }

    Ok((roots, roots_inv, bitrev_permutation(n)?))
}

/// Powers `ψ^i` and `ψ^{-i}` for `i in 0..n`
pub fn precompute_twists(m: u32, n: usize, psi: u32) -> Result<(Vec<u32>, Vec<u32>)> {
    let q = m as u64;
    let psi_inv = inv_mod(psi as i64, q)?;
    let mut tw_fwd = vec![1u32; n];
    let mut tw_inv = vec![1u32; n];
    for i in 1..n {
        tw_fwd[i] = mul_mod(tw_fwd[i - 1] as i64, psi as i64, q) as u32;
        tw_inv[i] = mul_mod(tw_inv[i - 1] as i64, psi_inv as i64, q) as u32;
    }
    Ok((tw_fwd, tw_inv))
}

#[inline]
fn bitrev_shuffle(a: &mut [u32], perm: &[usize]) {
    for i in 0..a.len() {
        let j = perm[i];
        if j > i {
            a.swap(i, j);
        }
    }
}

fn check_tables(operation: &'static str, n: usize, roots: &[u32], bitrev: &[usize]) -> Result<()> {
    validate::power_of_two(operation, n)?;
    validate::length(operation, bitrev.len(), n)?;
    validate::length(operation, roots.len(), n - 1)
}

fn butterflies(a: &mut [u32], q: u64, roots: &[u32]) {
    let n = a.len();
    let mut stage = 0;
    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let layer = &roots[stage..stage + half];
        for start in (0..n).step_by(len) {
            for j in 0..half {
                let u = a[start + j] as i64;
                let v = mul_mod(a[start + j + half] as i64, layer[j] as i64, q) as i64;
                a[start + j] = add_mod(u, v, q) as u32;
                a[start + j + half] = sub_mod(u, v, q) as u32;
            }
        }
        stage += half;
        len <<= 1;
    }
}

/// Forward transform in place
///
/// `a` must hold reduced values; the output is in natural order.
pub fn ntt_inplace(a: &mut [u32], m: u32, roots: &[u32], bitrev: &[usize]) -> Result<()> {
    check_tables("ntt_inplace", a.len(), roots, bitrev)?;
    bitrev_shuffle(a, bitrev);
    butterflies(a, m as u64, roots);
    Ok(())
}

/// Inverse transform in place, including the final scaling by `n^{-1}`
pub fn intt_inplace(a: &mut [u32], m: u32, roots_inv: &[u32], bitrev: &[usize]) -> Result<()> {
    check_tables("intt_inplace", a.len(), roots_inv, bitrev)?;
    let q = m as u64;
    bitrev_shuffle(a, bitrev);
    butterflies(a, q, roots_inv);
    let n_inv = inv_mod(a.len() as i64, q)? as i64;
    for x in a.iter_mut() {
        *x = mul_mod(*x as i64, n_inv, q) as u32;
    }
    Ok(())
}

/// Precomputed tables for negacyclic transforms in one ring
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NttPlan {
    ctx: RingContext,
    psi: u32,
    roots: Vec<u32>,
    roots_inv: Vec<u32>,
    bitrev: Vec<usize>,
    tw_fwd: Vec<u32>,
    tw_inv: Vec<u32>,
}

impl NttPlan {
    /// Build every table for `ctx`
    ///
    /// Fails with a domain error unless `2n` divides `q - 1` and `q` is prime.
    pub fn new(ctx: RingContext) -> Result<Self> {
        let (q, n) = (ctx.q(), ctx.n());
        if (q as u64 - 1) % (2 * n as u64) != 0 {
            return Err(Error::domain(
                "NttPlan::new",
                format!("2n = {} does not divide q - 1 = {}", 2 * n, q - 1),
            ));
        }
        let psi = find_primitive_root(q as u64, 2 * n as u64)? as u32;
        let (roots, roots_inv, bitrev) = precompute_roots(q, n, psi)?;
        let (tw_fwd, tw_inv) = precompute_twists(q, n, psi)?;
        debug!("Built NTT plan for q={} n={} (psi={})", q, n, psi);

        Ok(Self {
            ctx,
            psi,
            roots,
            roots_inv,
            bitrev,
            tw_fwd,
            tw_inv,
        })
    }

    /// Ring this plan was built for
    pub fn context(&self) -> RingContext {
        self.ctx
    }

    /// Primitive 2n-th root of unity used for the twists
    pub fn psi(&self) -> u32 {
        self.psi
    }

    /// Forward per-stage twiddles
    pub fn roots(&self) -> &[u32] {
        &self.roots
    }

    /// Inverse per-stage twiddles
    pub fn roots_inv(&self) -> &[u32] {
        &self.roots_inv
    }

    /// Bit-reversal permutation
    pub fn bitrev(&self) -> &[usize] {
        &self.bitrev
    }

    /// Powers of ψ
    pub fn twists(&self) -> &[u32] {
        &self.tw_fwd
    }

    /// Powers of ψ^{-1}
    pub fn inverse_twists(&self) -> &[u32] {
        &self.tw_inv
    }

    /// Cyclic forward transform in place
    pub fn forward(&self, a: &mut [u32]) -> Result<()> {
        ntt_inplace(a, self.ctx.q(), &self.roots, &self.bitrev)
    }

    /// Cyclic inverse transform in place
    pub fn inverse(&self, a: &mut [u32]) -> Result<()> {
        intt_inplace(a, self.ctx.q(), &self.roots_inv, &self.bitrev)
    }

    /// Twist by ψ^i and transform; pointwise products of the results are
    /// negacyclic products
    pub fn forward_negacyclic(&self, coeffs: &[u32]) -> Result<Vec<u32>> {
        validate::length("NttPlan::forward_negacyclic", coeffs.len(), self.ctx.n())?;
        let q = self.ctx.q() as u64;
        let mut a: Vec<u32> = coeffs
            .iter()
            .zip(&self.tw_fwd)
            .map(|(&c, &t)| mul_mod(c as i64, t as i64, q) as u32)
            .collect();
        self.forward(&mut a)?;
        Ok(a)
    }

    /// Inverse of [`NttPlan::forward_negacyclic`]
    pub fn inverse_negacyclic(&self, mut values: Vec<u32>) -> Result<Vec<u32>> {
        validate::length("NttPlan::inverse_negacyclic", values.len(), self.ctx.n())?;
        let q = self.ctx.q() as u64;
        self.inverse(&mut values)?;
        for (v, &t) in values.iter_mut().zip(&self.tw_inv) {
            *v = mul_mod(*v as i64, t as i64, q) as u32;
        }
        Ok(values)
    }

    /// Pointwise product of two transformed vectors
    pub fn pointwise(&self, a: &[u32], b: &[u32]) -> Result<Vec<u32>> {
        validate::same_size("NttPlan::pointwise", a.len(), b.len())?;
        let q = self.ctx.q() as u64;
        Ok(a.iter()
            .zip(b)
            .map(|(&x, &y)| mul_mod(x as i64, y as i64, q) as u32)
            .collect())
    }

    /// Pointwise `acc += a * b` on transformed vectors
    pub fn pointwise_accumulate(&self, acc: &mut [u32], a: &[u32], b: &[u32]) -> Result<()> {
        validate::same_size("NttPlan::pointwise_accumulate", a.len(), b.len())?;
        validate::same_size("NttPlan::pointwise_accumulate", acc.len(), a.len())?;
        let q = self.ctx.q() as u64;
        for ((r, &x), &y) in acc.iter_mut().zip(a).zip(b) {
            let prod = mul_mod(x as i64, y as i64, q);
            *r = add_mod(*r as i64, prod as i64, q) as u32;
        }
        Ok(())
    }
}

/// Product of `f` and `g` modulo `x^n + 1`, coefficients reduced mod q
pub fn negacyclic_convolution(f: &[u32], g: &[u32], plan: &NttPlan) -> Result<Vec<u32>> {
    validate::same_size("negacyclic_convolution", f.len(), g.len())?;
    let q = plan.ctx.q() as u64;
    let reduce = |v: &[u32]| -> Vec<u32> { v.iter().map(|&x| (x as u64 % q) as u32).collect() };

    let a = plan.forward_negacyclic(&reduce(f))?;
    let b = plan.forward_negacyclic(&reduce(g))?;
    let c = plan.pointwise(&a, &b)?;
    plan.inverse_negacyclic(c)
}

/// One-shot negacyclic product building a throwaway plan
pub fn poly_mul_ntt(f: &[u32], g: &[u32], q: u32) -> Result<Vec<u32>> {
    validate::same_size("poly_mul_ntt", f.len(), g.len())?;
    let ctx = RingContext::new(q, f.len())?;
    let plan = NttPlan::new(ctx)?;
    negacyclic_convolution(f, g, &plan)
}
