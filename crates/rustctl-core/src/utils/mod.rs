//! Shared numeric helpers and constants

pub mod constants;

/// Relative comparison of two floats, exact equality included
pub(crate) fn nearly_equal(a: f64, b: f64, tolerance: f64) -> bool {
    a == b || (a - b).abs() <= tolerance * a.abs().max(b.abs())
}
