//! Engine errors

use thiserror::Error;

/// Which side of a transfer function an operation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Numerator,
    Denominator,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Numerator => f.write_str("numerator"),
            Side::Denominator => f.write_str("denominator"),
        }
    }
}

/// Errors raised by the polynomial and transfer-function engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControlError {
    #[error("The exponent should be a non-negative integer, got {0}")]
    InvalidExponent(f64),

    #[error("{element} expects {expected} values, got {got}")]
    ParameterCount {
        element: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{characteristic} of {element} must be at least {min_value}, got {value}")]
    InvalidCharacteristic {
        element: &'static str,
        characteristic: &'static str,
        min_value: f64,
        value: f64,
    },

    #[error("The {0} is not expanded")]
    NotExpanded(Side),

    #[error("Cannot invert the zero complex number")]
    ZeroInversion,

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Root finding did not converge after {iterations} iterations")]
    ConvergenceFailure { iterations: usize },

    #[error("Complex root {real}{imag:+}i has no conjugate")]
    UnmatchedConjugate { real: f64, imag: f64 },

    #[error("{element} has no characteristic at index {index}")]
    CharacteristicIndex { element: &'static str, index: usize },

    #[error("\"{0}\" is not a valid element type")]
    UnknownElement(String),

    #[error("No element at index {index} (chain has {len})")]
    ElementIndex { index: usize, len: usize },

    #[error("Invalid sweep: {0}")]
    InvalidSweep(String),
}

pub type Result<T> = std::result::Result<T, ControlError>;
