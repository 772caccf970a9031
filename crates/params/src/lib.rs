//! Constant values and parameter sets for the solmae library

#![no_std]
#![forbid(unsafe_code)]

pub mod pqc;
