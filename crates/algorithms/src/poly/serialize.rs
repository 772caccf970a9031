//! serialize.rs - Fixed-width packing of centred coefficients
//!
//! Each value is centred modulo q, saturated to a signed `b`-bit range and
//! written in two's complement, least significant bit first.

use crate::error::{validate, Error, Result};
use crate::modular::centered;

/// Widest supported field
pub const MAX_FIELD_BITS: usize = 32;

fn field_width(operation: &'static str, slen: usize, count: usize) -> Result<usize> {
    let b = slen / count;
    if b == 0 {
        return Err(Error::domain(
            operation,
            format!("{} bits cannot hold {} values", slen, count),
        ));
    }
    if b > MAX_FIELD_BITS {
        return Err(Error::domain(
            operation,
            format!("field width {} exceeds {} bits", b, MAX_FIELD_BITS),
        ));
    }
    Ok(b)
}

/// Pack `values` into exactly `ceil(slen / 8)` bytes
///
/// The field width is `slen / values.len()`. Values whose centred
/// representative falls outside `[-2^(b-1), 2^(b-1) - 1]` are clamped.
pub fn compress(values: &[i64], slen: usize, q: u32) -> Result<Vec<u8>> {
    if values.is_empty() {
        return Ok(Vec::new());
    }
    let b = field_width("compress", slen, values.len())?;
    let min_v = -(1i64 << (b - 1));
    let max_v = (1i64 << (b - 1)) - 1;
    let mask = (1u64 << b) - 1;

    let mut out = Vec::with_capacity((slen + 7) / 8);
    let mut acc = 0u64;
    let mut acc_bits = 0usize;
    for &a in values {
        let v = centered(a, q as u64).clamp(min_v, max_v);
        acc |= ((v as u64) & mask) << acc_bits;
        acc_bits += b;
        while acc_bits >= 8 {
            out.push(acc as u8);
            acc >>= 8;
            acc_bits -= 8;
        }
    }
    if acc_bits > 0 {
        out.push(acc as u8);
    }
    out.resize((slen + 7) / 8, 0);
    Ok(out)
}

/// Unpack `d` values of width `slen / d` and map them into `[0, q)`
pub fn decompress(data: &[u8], slen: usize, d: usize, q: u32) -> Result<Vec<u32>> {
    if d == 0 {
        return Ok(Vec::new());
    }
    let b = field_width("decompress", slen, d)?;
    let need = (slen + 7) / 8;
    validate::min_length("decompress", data.len(), need)?;

    let mask = (1u64 << b) - 1;
    let sign_bit = 1u64 << (b - 1);
    let mut out = Vec::with_capacity(d);
    let mut bytes = data[..need].iter();
    let mut acc = 0u64;
    let mut acc_bits = 0usize;
    while out.len() < d {
        while acc_bits < b {
            // b * d <= slen, so the first `need` bytes always suffice
            let byte = bytes.next().copied().unwrap_or(0);
            acc |= (byte as u64) << acc_bits;
            acc_bits += 8;
        }
        let raw = acc & mask;
        acc >>= b;
        acc_bits -= b;

        let v = if raw & sign_bit != 0 {
            raw as i64 - (1i64 << b)
        } else {
            raw as i64
        };
        out.push(crate::modular::reduce(v, q as u64) as u32);
    }
    Ok(out)
}
