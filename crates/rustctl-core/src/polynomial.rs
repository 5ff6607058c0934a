//! Real-coefficient polynomials in the Laplace variable `s`
//!
//! Coefficients are stored in **ascending powers** of s:
//! - `[a_0, a_1, ..., a_n]` represents `a_0 + a_1*s + ... + a_n*s^n`
//!
//! A polynomial always holds at least one coefficient; the zero polynomial is
//! `[0]`. Values are immutable: every operation returns a new polynomial.
//!
//! References:
//! - Ogata, K. (2010). Modern Control Engineering (5th ed.). Section 7.2
//! - Franklin, G.F., Powell, J.D. (2019). Feedback Control of Dynamic Systems (8th ed.). Section 6.1

use std::fmt;
use std::ops::{Add, Mul};

use num_complex::Complex64;
use rustctl_types::RootSettings;
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, Result};
use crate::roots::{self, RootFactor};
use crate::utils::nearly_equal;

/// Polynomial with real coefficients in ascending powers of s
///
/// # Example
///
/// ```rust
/// use rustctl_core::Polynomial;
///
/// // 2 + 5s
/// let p = Polynomial::new(vec![2.0, 5.0]);
///
/// // (2 + 5s)^3 = 8 + 60s + 150s^2 + 125s^3
/// let cube = p.pow(3);
/// assert_eq!(cube.coefficients(), &[8.0, 60.0, 150.0, 125.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from ascending coefficients; an empty list gives `[0]`
    pub fn new(coefficients: impl Into<Vec<f64>>) -> Self {
        let mut coefficients = coefficients.into();
        if coefficients.is_empty() {
            coefficients.push(0.0);
        }

        Self { coefficients }
    }

    /// The zero polynomial `[0]`
    pub fn zero() -> Self {
        Self::new(vec![0.0])
    }

    /// The unit polynomial `[1]`
    pub fn one() -> Self {
        Self::constant(1.0)
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// `s^order`
    pub fn monomial(order: usize) -> Self {
        let mut coefficients = vec![0.0; order + 1];
        coefficients[order] = 1.0;
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Coefficient of `s^index`, 0 beyond the stored coefficients
    pub fn at(&self, index: usize) -> f64 {
        self.coefficients.get(index).copied().unwrap_or(0.0)
    }

    /// Copy with the coefficient of `s^index` replaced, zero-padding as needed
    pub fn change(&self, index: usize, value: f64) -> Self {
        let mut coefficients = self.coefficients.clone();
        if coefficients.len() <= index {
            coefficients.resize(index + 1, 0.0);
        }
        coefficients[index] = value;

        Self { coefficients }
    }

    /// Number of stored coefficients minus one
    pub fn order(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn non_zero_count(&self) -> usize {
        self.coefficients.iter().filter(|&&c| c != 0.0).count()
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.iter().all(|&c| c == 0.0)
    }

    /// Index of the first non-zero coefficient, i.e. the multiplicity of the
    /// root `s = 0`. `None` for the zero polynomial.
    pub fn zero_multiplicity(&self) -> Option<usize> {
        self.coefficients.iter().position(|&c| c != 0.0)
    }

    /// Index of the last non-zero coefficient
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.iter().rposition(|&c| c != 0.0)
    }

    /// First non-zero coefficient, 0 for the zero polynomial
    pub fn lowest_coefficient(&self) -> f64 {
        self.zero_multiplicity().map_or(0.0, |index| self.coefficients[index])
    }

    /// Last non-zero coefficient, 0 for the zero polynomial
    pub fn highest_coefficient(&self) -> f64 {
        self.degree().map_or(0.0, |index| self.coefficients[index])
    }

    /// Drop the `s^k` factor, `k` being the zero multiplicity
    pub fn without_zero_roots(&self) -> Self {
        match self.zero_multiplicity() {
            Some(k) if k > 0 => Self::new(&self.coefficients[k..]),
            _ => self.clone(),
        }
    }

    pub fn add(&self, other: &Polynomial) -> Self {
        let len = self.coefficients.len().max(other.coefficients.len());
        let coefficients = (0..len).map(|i| self.at(i) + other.at(i)).collect::<Vec<_>>();

        Self { coefficients }
    }

    /// Multiply every coefficient by `factor`
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            coefficients: self.coefficients.iter().map(|&c| factor * c).collect(),
        }
    }

    /// Polynomial product (coefficient convolution)
    pub fn multiply(&self, other: &Polynomial) -> Self {
        let mut coefficients = vec![0.0; self.coefficients.len() + other.coefficients.len() - 1];

        for (i, &a) in self.coefficients.iter().enumerate() {
            for (j, &b) in other.coefficients.iter().enumerate() {
                coefficients[i + j] += a * b;
            }
        }

        Self { coefficients }
    }

    /// `self^exponent` by repeated multiplication
    pub fn pow(&self, exponent: u32) -> Self {
        (0..exponent).fold(Self::one(), |result, _| result.multiply(self))
    }

    /// Checked power for exponents coming from untyped input
    ///
    /// Fails with [`ControlError::InvalidExponent`] unless `exponent` is a
    /// non-negative integer.
    pub fn power(&self, exponent: f64) -> Result<Self> {
        if exponent < 0.0 || exponent.fract() != 0.0 || exponent > u32::MAX as f64 {
            return Err(ControlError::InvalidExponent(exponent));
        }

        Ok(self.pow(exponent as u32))
    }

    /// Horner evaluation at an arbitrary complex argument
    pub fn evaluate(&self, z: Complex64) -> Complex64 {
        self.coefficients
            .iter()
            .rev()
            .fold(Complex64::new(0.0, 0.0), |accumulator, &c| accumulator * z + c)
    }

    /// Value at `s = jw`
    ///
    /// Powers of `j` cycle through `1, j, -1, -j`, so each term lands on the
    /// real or imaginary axis with a known sign.
    pub fn complex_value(&self, w: f64) -> Complex64 {
        let mut real = 0.0;
        let mut imaginary = 0.0;

        for (order, &value) in self.coefficients.iter().enumerate() {
            let multiplied_value = value * w.powi(order as i32);

            match order % 4 {
                0 => real += multiplied_value,
                1 => imaginary += multiplied_value,
                2 => real -= multiplied_value,
                _ => imaginary -= multiplied_value,
            }
        }

        Complex64::new(real, imaginary)
    }

    /// Scalar `k` such that `self == k * other`, if the two are proportional
    pub fn factor_of(&self, other: &Polynomial) -> Option<f64> {
        self.factor_of_with(other, crate::utils::constants::FACTOR_TOLERANCE)
    }

    /// [`factor_of`](Self::factor_of) with an explicit relative tolerance
    pub fn factor_of_with(&self, other: &Polynomial, tolerance: f64) -> Option<f64> {
        if self.order() != other.order() {
            return None;
        }

        let (Some(index), Some(other_index)) = (self.zero_multiplicity(), other.zero_multiplicity())
        else {
            return None;
        };

        let factor = self.coefficients[index] / other.coefficients[other_index];
        let proportional = self
            .coefficients
            .iter()
            .enumerate()
            .all(|(order, &value)| nearly_equal(value, factor * other.at(order), tolerance));

        proportional.then_some(factor)
    }

    /// Backward-difference discretization
    ///
    /// Substitutes `s ≈ (1 - z⁻¹)/dt` in every term; the result is expressed
    /// in ascending powers of `z⁻¹`.
    pub fn recursive(&self, dt: f64) -> Self {
        let derivation = Polynomial::new(vec![1.0, -1.0]);

        self.coefficients
            .iter()
            .enumerate()
            .fold(Polynomial::zero(), |polynomial, (order, &value)| {
                let term = derivation
                    .pow(order as u32)
                    .scale(value / dt.powi(order as i32));
                polynomial.add(&term)
            })
    }

    /// Pulsation at which the lowest and highest order terms have equal magnitude
    ///
    /// `None` for monomials and for the zero polynomial.
    pub fn characteristic_frequency(&self) -> Option<f64> {
        let low = self.zero_multiplicity()?;
        let high = self.degree()?;
        if low == high {
            return None;
        }

        let ratio = (self.coefficients[low] / self.coefficients[high]).abs();
        Some(ratio.powf(1.0 / (high - low) as f64))
    }

    /// All complex roots, sorted by ascending modulus
    pub fn roots(&self) -> Result<Vec<Complex64>> {
        self.roots_with(&RootSettings::default())
    }

    /// [`roots`](Self::roots) with explicit root finder settings
    pub fn roots_with(&self, settings: &RootSettings) -> Result<Vec<Complex64>> {
        let Some(low) = self.zero_multiplicity() else {
            return Err(ControlError::DegenerateInput(
                "the zero polynomial has no finite set of roots".to_string(),
            ));
        };
        let high = self.degree().unwrap_or(low);

        let mut result = vec![Complex64::new(0.0, 0.0); low];
        result.extend(roots::durand_kerner(&self.coefficients[low..=high], settings)?);
        roots::sort_by_modulus(&mut result);

        Ok(result)
    }

    /// Split into real first and second order factors
    ///
    /// The result starts with `s^k` when the polynomial has `k` roots at the
    /// origin, then a constant factor, then one `(1, -1/r)` factor per real
    /// root and one `(1, -2Re(r)/|r|², 1/|r|²)` factor per conjugate pair, by
    /// ascending root modulus. The product of the factors is the polynomial.
    pub fn factorize(&self) -> Result<Vec<Polynomial>> {
        self.factorize_with(&RootSettings::default())
    }

    /// [`factorize`](Self::factorize) with explicit root finder settings
    pub fn factorize_with(&self, settings: &RootSettings) -> Result<Vec<Polynomial>> {
        let Some(low) = self.zero_multiplicity() else {
            return Err(ControlError::DegenerateInput(
                "cannot factorize the zero polynomial".to_string(),
            ));
        };
        let high = self.degree().unwrap_or(low);

        let mut factors = Vec::new();
        if low > 0 {
            factors.push(Polynomial::monomial(low));
        }
        factors.push(Polynomial::constant(self.coefficients[low]));

        let reduced = &self.coefficients[low..=high];
        let mut found = roots::durand_kerner(reduced, settings)?;
        roots::sort_by_modulus(&mut found);

        for factor in roots::pair_conjugates(found, settings.tolerance)? {
            factors.push(match factor {
                RootFactor::Real(root) => Polynomial::new(vec![1.0, -1.0 / root]),
                RootFactor::Conjugate(root) => {
                    let squared_abs = root.norm_sqr();
                    Polynomial::new(vec![1.0, -2.0 * root.re / squared_abs, 1.0 / squared_abs])
                }
            });
        }

        Ok(factors)
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Vec<f64>> for Polynomial {
    fn from(coefficients: Vec<f64>) -> Self {
        Self::new(coefficients)
    }
}

impl From<&[f64]> for Polynomial {
    fn from(coefficients: &[f64]) -> Self {
        Self::new(coefficients)
    }
}

impl From<Polynomial> for Vec<f64> {
    fn from(polynomial: Polynomial) -> Self {
        polynomial.coefficients
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, other: &Polynomial) -> Polynomial {
        Polynomial::add(self, other)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, other: &Polynomial) -> Polynomial {
        self.multiply(other)
    }
}

impl Mul<f64> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, factor: f64) -> Polynomial {
        self.scale(factor)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for (order, &value) in self.coefficients.iter().enumerate() {
            if value == 0.0 {
                continue;
            }

            if first {
                write!(f, "{value}")?;
            } else if value < 0.0 {
                write!(f, " - {}", -value)?;
            } else {
                write!(f, " + {value}")?;
            }
            first = false;

            match order {
                0 => {}
                1 => f.write_str("s")?,
                _ => write!(f, "s^{order}")?,
            }
        }

        if first {
            f.write_str("0")?;
        }

        Ok(())
    }
}
