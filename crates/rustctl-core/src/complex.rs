//! Complex numbers
//!
//! The engine works on [`num_complex::Complex64`]; this module adds the few
//! operations whose failure modes the engine wants to report instead of
//! propagating NaN.

pub use num_complex::Complex64;

use crate::error::{ControlError, Result};

/// Checked polar-form helpers on [`Complex64`]
pub trait ComplexExt: Sized {
    /// `conj(z) / |z|²`, failing on `z = 0`
    fn try_invert(&self) -> Result<Self>;

    /// `r^e · exp(j·e·θ)`
    fn power(&self, exponent: f64) -> Self;
}

impl ComplexExt for Complex64 {
    fn try_invert(&self) -> Result<Self> {
        let squared_abs = self.norm_sqr();
        if squared_abs == 0.0 {
            return Err(ControlError::ZeroInversion);
        }

        Ok(Complex64::new(self.re / squared_abs, -self.im / squared_abs))
    }

    fn power(&self, exponent: f64) -> Self {
        Complex64::from_polar(self.norm().powf(exponent), exponent * self.arg())
    }
}
