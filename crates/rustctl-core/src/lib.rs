//! rustctl-core - Transfer-function engine for control-loop analysis
//!
//! Polynomials with real coefficients, transfer functions kept in factored
//! form, and the analyses drawn from them: Bode/Nyquist/Black-Nichols
//! responses, stability margins, straight-line asymptotes and simulated
//! responses to impulse, step and ramp inputs.
//!
//! # Architecture
//!
//! Every value is immutable once built; operations return new values.
//! - [`Polynomial`] - ascending-power coefficients, Durand-Kerner roots
//! - [`TransferFunction`] - products of polynomials over products of polynomials
//! - [`ElementKind`] / [`SimpleElements`] - catalog of elementary blocks and chains of them
//! - [`FrequencyResponseCalculator`] / [`TimeResponseCalculator`] - analyses
//!
//! # Example
//!
//! ```rust
//! use rustctl_core::prelude::*;
//!
//! // K / (s (1 + s)²) with K = 1
//! let mut chain = SimpleElements::new();
//! chain.add(ElementKind::Integrator);
//! chain.add(ElementKind::FirstOrder);
//! chain.add(ElementKind::FirstOrder);
//!
//! let tf = chain.transfer_function().unwrap();
//! let calculator = FrequencyResponseCalculator::new(&tf);
//! let response = calculator.polar_response(0.01, 100.0, 1001).unwrap();
//!
//! let gain_margin = calculator.gain_margin(&response).unwrap();
//! assert!((gain_margin.frequency - 1.0).abs() < 1e-3);
//! assert!((gain_margin.margin() - 6.0206).abs() < 1e-2);
//! ```

pub mod analysis;
pub mod complex;
pub mod elements;
pub mod error;
pub mod polynomial;
pub mod roots;
pub mod tex;
pub mod transfer_function;
pub mod utils;

pub use analysis::{FrequencyResponseCalculator, TimeResponseCalculator};
pub use complex::{Complex64, ComplexExt};
pub use elements::{Characteristic, ElementKind, SimpleElement, SimpleElements};
pub use error::{ControlError, Result, Side};
pub use polynomial::Polynomial;
pub use roots::RootFactor;
pub use transfer_function::TransferFunction;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::analysis::{
        asymptotic_changes, gain_margin, phase_margin, unwrap_phase, FrequencyResponseCalculator,
        TimeResponseCalculator,
    };
    pub use crate::complex::{Complex64, ComplexExt};
    pub use crate::elements::{ElementKind, SimpleElement, SimpleElements};
    pub use crate::error::{ControlError, Result};
    pub use crate::polynomial::Polynomial;
    pub use crate::transfer_function::TransferFunction;
    pub use rustctl_types::*;
}
