//! Validation utilities for lattice primitives

use super::{Error, Result};

/// Validate a length
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::Length {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate a minimum length
#[inline(always)]
pub fn min_length(context: &'static str, actual: usize, min: usize) -> Result<()> {
    if actual < min {
        return Err(Error::Length {
            context,
            expected: min,
            actual,
        });
    }
    Ok(())
}

/// Validate that a transform size is a non-zero power of two
#[inline(always)]
pub fn power_of_two(operation: &'static str, n: usize) -> Result<()> {
    if !n.is_power_of_two() {
        return Err(Error::domain(
            operation,
            format!("length {} is not a power of two", n),
        ));
    }
    Ok(())
}

/// Validate that two inputs of an element-wise operation have the same size
#[inline(always)]
pub fn same_size(operation: &'static str, left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(Error::domain(
            operation,
            format!("size mismatch ({} vs {})", left, right),
        ));
    }
    Ok(())
}

/// Validate a domain condition
#[inline(always)]
pub fn domain(condition: bool, operation: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::domain(operation, reason));
    }
    Ok(())
}
