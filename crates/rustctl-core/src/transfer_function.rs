//! Transfer functions in factored form
//!
//! A transfer function is kept as two lists of polynomials,
//!
//! ```text
//!        N₁(s) · N₂(s) · ... · Nₖ(s)
//! H(s) = ---------------------------
//!        D₁(s) · D₂(s) · ... · Dₘ(s)
//! ```
//!
//! and is only multiplied out on request ([`TransferFunction::expanded`]).
//! Keeping the factors separate lets the Bode asymptotes be read from each
//! factor and lets proportional factors cancel when two transfer functions
//! are chained.

use rustctl_types::{LoopType, RootSettings};
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, Result, Side};
use crate::polynomial::Polynomial;
use crate::utils::constants::FACTOR_TOLERANCE;

/// SISO transfer function as a ratio of polynomial products
///
/// # Example
///
/// ```rust
/// use rustctl_core::{Polynomial, TransferFunction};
///
/// // 3(1 + 5s) / (2 + 5s + 7s²)
/// let tf = TransferFunction::new(
///     vec![Polynomial::new(vec![3.0]), Polynomial::new(vec![1.0, 5.0])],
///     vec![Polynomial::new(vec![2.0, 5.0, 7.0])],
/// );
///
/// let closed_loop = tf.closed_loop();
/// assert_eq!(closed_loop.numerator().unwrap().coefficients(), &[3.0, 15.0]);
/// assert_eq!(closed_loop.denominator().unwrap().coefficients(), &[5.0, 20.0, 7.0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferFunction {
    numerators: Vec<Polynomial>,
    denominators: Vec<Polynomial>,
}

impl TransferFunction {
    pub fn new(numerators: Vec<Polynomial>, denominators: Vec<Polynomial>) -> Self {
        Self {
            numerators,
            denominators,
        }
    }

    /// `numerator / denominator` with a single polynomial on each side
    pub fn from_polynomials(numerator: Polynomial, denominator: Polynomial) -> Self {
        Self::new(vec![numerator], vec![denominator])
    }

    /// The unit transfer function (empty products)
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn numerators(&self) -> &[Polynomial] {
        &self.numerators
    }

    pub fn denominators(&self) -> &[Polynomial] {
        &self.denominators
    }

    /// The single numerator polynomial
    ///
    /// An empty product reads as `[1]`. Fails with
    /// [`ControlError::NotExpanded`] when the numerator holds several factors;
    /// call [`expanded`](Self::expanded) first.
    pub fn numerator(&self) -> Result<Polynomial> {
        single(&self.numerators, Side::Numerator)
    }

    /// The single denominator polynomial; see [`numerator`](Self::numerator)
    pub fn denominator(&self) -> Result<Polynomial> {
        single(&self.denominators, Side::Denominator)
    }

    /// Relative degree: `Σ deg(Dᵢ) - Σ deg(Nᵢ)`
    pub fn order(&self) -> i64 {
        let numerator: usize = self.numerators.iter().map(Polynomial::order).sum();
        let denominator: usize = self.denominators.iter().map(Polynomial::order).sum();

        denominator as i64 - numerator as i64
    }

    /// Net number of integrators (positive) or differentiators (negative)
    ///
    /// Zero polynomials contribute nothing.
    pub fn zero_multiplicity(&self) -> i64 {
        let count = |list: &[Polynomial]| -> i64 {
            list.iter()
                .filter_map(Polynomial::zero_multiplicity)
                .map(|k| k as i64)
                .sum()
        };

        count(&self.denominators) - count(&self.numerators)
    }

    /// Limit of `H(s)·s^zero_multiplicity` as `s → 0`
    pub fn static_gain(&self) -> f64 {
        let (numerator, denominator) = self.expanded_parts();
        numerator.lowest_coefficient() / denominator.lowest_coefficient()
    }

    /// Chain two transfer functions
    ///
    /// Factor lists are concatenated, then every numerator proportional to a
    /// denominator is replaced by the constant ratio and that denominator is
    /// dropped. Each numerator cancels at most one denominator.
    pub fn multiply(&self, other: &TransferFunction) -> Self {
        let numerators = self
            .numerators
            .iter()
            .chain(other.numerators.iter())
            .cloned()
            .collect();
        let denominators = self
            .denominators
            .iter()
            .chain(other.denominators.iter())
            .cloned()
            .collect();

        simplify(numerators, denominators, FACTOR_TOLERANCE)
    }

    /// Multiply out both sides and drop the `s^k` factor they share
    pub fn expanded(&self) -> Self {
        let (numerator, denominator) = self.expanded_parts();
        Self::from_polynomials(numerator, denominator)
    }

    /// Expanded numerator and denominator
    pub fn expanded_parts(&self) -> (Polynomial, Polynomial) {
        let product = |list: &[Polynomial]| {
            list.iter()
                .fold(Polynomial::one(), |result, factor| result.multiply(factor))
        };

        let numerator = product(&self.numerators);
        let denominator = product(&self.denominators);

        let shared = numerator
            .zero_multiplicity()
            .unwrap_or(0)
            .min(denominator.zero_multiplicity().unwrap_or(0));

        if shared > 0 {
            (
                Polynomial::new(&numerator.coefficients()[shared..]),
                Polynomial::new(&denominator.coefficients()[shared..]),
            )
        } else {
            (numerator, denominator)
        }
    }

    /// Unity-feedback closed loop `N / (N + D)` of the expanded open loop
    pub fn closed_loop(&self) -> Self {
        let (numerator, denominator) = self.expanded_parts();
        let closed_denominator = numerator.add(&denominator);

        Self::from_polynomials(numerator, closed_denominator)
    }

    /// Open loop as is, or its unity-feedback closed loop
    pub fn for_loop(&self, loop_type: LoopType) -> Self {
        match loop_type {
            LoopType::Open => self.clone(),
            LoopType::Closed => self.closed_loop(),
        }
    }

    /// Difference equation for a backward-difference discretization
    ///
    /// Both sides are discretized with [`Polynomial::recursive`] and divided
    /// by the denominator's constant term, so that
    ///
    /// ```text
    /// y[k] = Σᵢ bᵢ·u[k-i] - Σ_{i≥1} aᵢ·y[k-i]
    /// ```
    ///
    /// with `bᵢ`/`aᵢ` the returned numerator/denominator coefficients.
    pub fn recursive(&self, dt: f64) -> Self {
        let (numerator, denominator) = self.expanded_parts();

        let numerator = numerator.recursive(dt);
        let denominator = denominator.recursive(dt);
        let normalization = 1.0 / denominator.at(0);

        Self::from_polynomials(numerator.scale(normalization), denominator.scale(normalization))
    }

    /// Pole/zero form of the expanded transfer function
    pub fn factorize(&self) -> Result<Self> {
        self.factorize_with(&RootSettings::default())
    }

    /// [`factorize`](Self::factorize) with explicit root finder settings
    ///
    /// Both sides are split into real first and second order factors; their
    /// constant factors are merged into a single leading numerator constant
    /// and proportional factors cancel within `settings.tolerance`.
    pub fn factorize_with(&self, settings: &RootSettings) -> Result<Self> {
        let (numerator, denominator) = self.expanded_parts();

        let mut numerators = numerator.factorize_with(settings)?;
        let mut denominators = denominator.factorize_with(settings)?;

        let gain = take_constant(&mut numerators) / take_constant(&mut denominators);
        numerators.insert(0, Polynomial::constant(gain));

        Ok(simplify(numerators, denominators, settings.tolerance))
    }
}

fn single(list: &[Polynomial], side: Side) -> Result<Polynomial> {
    match list {
        [] => Ok(Polynomial::one()),
        [polynomial] => Ok(polynomial.clone()),
        _ => Err(ControlError::NotExpanded(side)),
    }
}

/// Remove the order-0 factors of a factor list and return their product
fn take_constant(factors: &mut Vec<Polynomial>) -> f64 {
    let mut constant = 1.0;
    factors.retain(|factor| {
        if factor.order() == 0 {
            constant *= factor.at(0);
            false
        } else {
            true
        }
    });
    constant
}

fn simplify(
    mut numerators: Vec<Polynomial>,
    mut denominators: Vec<Polynomial>,
    tolerance: f64,
) -> TransferFunction {
    for numerator in numerators.iter_mut() {
        let cancelled = denominators
            .iter()
            .enumerate()
            .find_map(|(j, denominator)| {
                numerator
                    .factor_of_with(denominator, tolerance)
                    .map(|factor| (j, factor))
            });

        if let Some((j, factor)) = cancelled {
            *numerator = Polynomial::constant(factor);
            denominators.remove(j);
        }
    }

    TransferFunction::new(numerators, denominators)
}
