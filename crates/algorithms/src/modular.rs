//! Modular arithmetic over Z_m
//!
//! Inputs may be any signed integer; every result lies in `[0, m)`.
//! Intermediate products are computed in 128-bit arithmetic so moduli up to
//! 2^63 never overflow.

use crate::error::{Error, Result};

/// Reduce `a` into `[0, m)`
#[inline(always)]
pub fn reduce(a: i64, m: u64) -> u64 {
    debug_assert!(m > 0, "modulus must be positive");
    (a as i128).rem_euclid(m as i128) as u64
}

/// `(a + b) mod m`
#[inline(always)]
pub fn add_mod(a: i64, b: i64, m: u64) -> u64 {
    let sum = reduce(a, m) as u128 + reduce(b, m) as u128;
    (sum % m as u128) as u64
}

/// `(a - b) mod m`
#[inline(always)]
pub fn sub_mod(a: i64, b: i64, m: u64) -> u64 {
    let diff = reduce(a, m) as i128 - reduce(b, m) as i128;
    diff.rem_euclid(m as i128) as u64
}

/// `(a * b) mod m`
#[inline(always)]
pub fn mul_mod(a: i64, b: i64, m: u64) -> u64 {
    let prod = reduce(a, m) as u128 * reduce(b, m) as u128;
    (prod % m as u128) as u64
}

/// `base^exp mod m` by square and multiply
pub fn pow_mod(base: u64, mut exp: u64, m: u64) -> u64 {
    debug_assert!(m > 0, "modulus must be positive");
    let m128 = m as u128;
    let mut acc: u128 = 1 % m128;
    let mut b = base as u128 % m128;
    while exp != 0 {
        if exp & 1 == 1 {
            acc = acc * b % m128;
        }
        b = b * b % m128;
        exp >>= 1;
    }
    acc as u64
}

/// Multiplicative inverse of `a` modulo `m` by the extended Euclidean algorithm
///
/// Fails with a domain error when `a ≡ 0 (mod m)` or when `gcd(a, m) != 1`.
pub fn inv_mod(a: i64, m: u64) -> Result<u64> {
    if m <= 1 {
        return Err(Error::domain("inv_mod", "modulus must be greater than 1"));
    }
    let a = reduce(a, m);
    if a == 0 {
        return Err(Error::domain(
            "inv_mod",
            format!("0 has no inverse modulo {}", m),
        ));
    }

    let (mut t, mut new_t): (i128, i128) = (0, 1);
    let (mut r, mut new_r): (i128, i128) = (m as i128, a as i128);
    while new_r != 0 {
        let quotient = r / new_r;
        (t, new_t) = (new_t, t - quotient * new_t);
        (r, new_r) = (new_r, r - quotient * new_r);
    }
    if r != 1 {
        return Err(Error::domain(
            "inv_mod",
            format!("{} is not invertible modulo {} (gcd {})", a, m, r),
        ));
    }
    Ok(t.rem_euclid(m as i128) as u64)
}

/// Representative of `a mod m` in `(-m/2, m/2]`
#[inline(always)]
pub fn centered(a: i64, m: u64) -> i64 {
    let r = reduce(a, m);
    if r > m / 2 {
        r as i64 - m as i64
    } else {
        r as i64
    }
}
