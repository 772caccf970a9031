//! Constants for post-quantum lattice schemes

pub mod solmae;
