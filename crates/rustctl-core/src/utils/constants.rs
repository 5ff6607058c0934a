//! Engine constants and defaults

pub use rustctl_types::constants::*;

/// Real part of the seed whose powers start the Durand-Kerner iteration
pub const ROOT_SEED_RE: f64 = 0.3;

/// Imaginary part of the root seed, non-zero to break the real-axis symmetry
pub const ROOT_SEED_IM: f64 = 0.9;

/// Relative tolerance for two polynomials to be considered proportional
pub const FACTOR_TOLERANCE: f64 = 1e-12;

/// Root estimates closer than this, relative to their modulus, are tried as
/// one multiple root
pub const CLUSTER_RADIUS: f64 = 0.1;

/// Newton steps spent refining a multiple root
pub const POLISH_ITERATIONS: usize = 20;
