//! Durand-Kerner root finding and conjugate pairing
//!
//! All roots of a polynomial of degree n are refined simultaneously. Starting
//! from n distinct complex estimates, each iteration applies the Weierstrass
//! correction
//!
//! ```text
//! Δᵢ = P(rᵢ) / ∏_{j≠i} (rᵢ - rⱼ)        rᵢ ← rᵢ - Δᵢ
//! ```
//!
//! to every estimate, P being the monic version of the polynomial. Iteration
//! stops once the largest relative correction `|Δᵢ|/|rᵢ|` drops below the
//! tolerance, or when the iteration cap is reached.
//!
//! References:
//! - Kerner, I.O. (1966). Ein Gesamtschrittverfahren zur Berechnung der Nullstellen von Polynomen.
//! - Press, W.H. et al. (2007). Numerical Recipes (3rd ed.). Section 9.5

use log::{debug, warn};
use num_complex::Complex64;
use rustctl_types::RootSettings;

use crate::complex::ComplexExt;
use crate::error::{ControlError, Result};
use crate::utils::constants::{CLUSTER_RADIUS, POLISH_ITERATIONS, ROOT_SEED_IM, ROOT_SEED_RE};

/// A real first or second order factor of a real polynomial
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RootFactor {
    Real(f64),
    /// Conjugate pair, stored as the member with positive imaginary part
    Conjugate(Complex64),
}

/// Roots of `coefficients[0] + coefficients[1]*s + ...`
///
/// The highest coefficient must be non-zero. Returns an empty list for
/// constants.
pub fn durand_kerner(coefficients: &[f64], settings: &RootSettings) -> Result<Vec<Complex64>> {
    let Some(&leading) = coefficients.last() else {
        return Ok(Vec::new());
    };
    if leading == 0.0 {
        return Err(ControlError::DegenerateInput(
            "leading coefficient is zero".to_string(),
        ));
    }

    let degree = coefficients.len() - 1;
    if degree == 0 {
        return Ok(Vec::new());
    }

    let monic: Vec<f64> = coefficients.iter().map(|&c| c / leading).collect();

    let seed = Complex64::new(ROOT_SEED_RE, ROOT_SEED_IM);
    let mut roots: Vec<Complex64> = (0..degree).map(|i| seed.powu(i as u32)).collect();

    for iteration in 1..=settings.max_iterations {
        let mut max_correction: f64 = 0.0;

        for i in 0..degree {
            let root = roots[i];
            let product = roots
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(Complex64::new(1.0, 0.0), |product, (_, &other)| product * (root - other));

            let inverse = product.try_invert().map_err(|_| {
                ControlError::DegenerateInput("two root estimates coincide".to_string())
            })?;
            let correction = horner(&monic, root) * inverse;

            roots[i] = root - correction;
            max_correction = max_correction.max(correction.norm() / roots[i].norm());
        }

        if roots.iter().any(|r| !r.is_finite()) {
            return Err(ControlError::DegenerateInput(
                "root iteration diverged".to_string(),
            ));
        }

        if max_correction < settings.tolerance {
            debug!("Durand-Kerner converged in {iteration} iterations (degree {degree})");
            return Ok(polish_clusters(&monic, roots));
        }
    }

    if settings.require_convergence {
        return Err(ControlError::ConvergenceFailure {
            iterations: settings.max_iterations,
        });
    }

    warn!(
        "Durand-Kerner stopped after {} iterations without reaching tolerance {:e}; returning last estimates",
        settings.max_iterations, settings.tolerance
    );
    Ok(polish_clusters(&monic, roots))
}

/// `c[0] + c[1]*z + c[2]*z² + ...`
fn horner(coefficients: &[f64], z: Complex64) -> Complex64 {
    coefficients
        .iter()
        .rev()
        .fold(Complex64::new(0.0, 0.0), |accumulator, &c| accumulator * z + c)
}

fn derivative(coefficients: &[f64]) -> Vec<f64> {
    coefficients
        .iter()
        .enumerate()
        .skip(1)
        .map(|(k, &c)| k as f64 * c)
        .collect()
}

/// Newton iteration on the (m-1)-th derivative, which has a simple root
/// where the polynomial has a root of multiplicity m
fn multiple_root(monic: &[f64], multiplicity: usize, start: Complex64) -> Complex64 {
    let mut f = monic.to_vec();
    for _ in 1..multiplicity {
        f = derivative(&f);
    }
    let slope = derivative(&f);

    let mut z = start;
    for _ in 0..POLISH_ITERATIONS {
        let df = horner(&slope, z);
        if df.norm_sqr() == 0.0 {
            break;
        }

        let step = horner(&f, z) / df;
        z -= step;
        if step.norm() <= f64::EPSILON * z.norm() {
            break;
        }
    }
    z
}

/// Largest coefficient gap between `∏(s - rᵢ)` and `monic`, relative to the
/// largest coefficient of `monic`
fn reconstruction_error(monic: &[f64], roots: &[Complex64]) -> f64 {
    let mut product = vec![Complex64::new(1.0, 0.0)];
    for &root in roots {
        let mut next = vec![Complex64::new(0.0, 0.0); product.len() + 1];
        for (k, &c) in product.iter().enumerate() {
            next[k + 1] += c;
            next[k] -= c * root;
        }
        product = next;
    }

    let scale = monic.iter().fold(0.0_f64, |m, c| m.max(c.abs()));
    let gap = monic
        .iter()
        .zip(&product)
        .fold(0.0_f64, |m, (&c, &p)| m.max((p - c).norm()));
    gap / scale
}

/// Collapse clusters of estimates onto multiple roots
///
/// Durand-Kerner converges only linearly towards a root of multiplicity m and
/// leaves its m estimates scattered around it. Estimates within
/// `CLUSTER_RADIUS·|a|` of an estimate `a` form a cluster, which is replaced
/// by a single m-fold root refined from the centroid. A replacement is kept
/// only if it brings `∏(s - rᵢ)` closer to `monic`.
pub fn polish_clusters(monic: &[f64], roots: Vec<Complex64>) -> Vec<Complex64> {
    let mut roots = roots;
    let mut error = reconstruction_error(monic, &roots);
    let mut unvisited: Vec<usize> = (0..roots.len()).collect();

    while let Some(&first) = unvisited.first() {
        let center = roots[first];
        let radius = CLUSTER_RADIUS * center.norm();
        let (cluster, rest): (Vec<usize>, Vec<usize>) = std::mem::take(&mut unvisited)
            .into_iter()
            .partition(|&k| (roots[k] - center).norm() <= radius);
        unvisited = rest;

        if cluster.len() < 2 {
            continue;
        }

        let centroid =
            cluster.iter().map(|&k| roots[k]).sum::<Complex64>() / cluster.len() as f64;
        let z = multiple_root(monic, cluster.len(), centroid);
        if !z.is_finite() {
            continue;
        }

        let mut candidate = roots.clone();
        for &k in &cluster {
            candidate[k] = z;
        }

        let candidate_error = reconstruction_error(monic, &candidate);
        if candidate_error < error {
            debug!(
                "Merged {} root estimates into {z} (error {error:e} -> {candidate_error:e})",
                cluster.len()
            );
            roots = candidate;
            error = candidate_error;
        }
    }

    roots
}

/// Sort by ascending modulus, then by imaginary part
pub fn sort_by_modulus(roots: &mut [Complex64]) {
    roots.sort_by(|a, b| a.norm().total_cmp(&b.norm()).then(a.im.total_cmp(&b.im)));
}

/// Group roots into real roots and conjugate pairs
///
/// Roots whose imaginary part is within `tolerance` of their modulus are
/// real. Every other root must find a partner `b` with `Im(a) ≈ -Im(b)` and
/// `Re(a) ≈ Re(b)` within `√tolerance·|a|`; the closest candidate wins. A
/// near-real root left without partner is demoted to a real root.
pub fn pair_conjugates(roots: Vec<Complex64>, tolerance: f64) -> Result<Vec<RootFactor>> {
    let loose_tolerance = tolerance.sqrt();
    let mut remaining = roots;
    let mut factors = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        let root = remaining.remove(0);
        let scale = root.norm();

        if root.im.abs() <= tolerance * scale {
            factors.push(RootFactor::Real(root.re));
            continue;
        }

        let partner = remaining
            .iter()
            .enumerate()
            .map(|(k, other)| (k, (root.im + other.im).abs() + (root.re - other.re).abs()))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match partner {
            Some((k, distance)) if distance <= loose_tolerance * scale => {
                let other = remaining.remove(k);
                factors.push(RootFactor::Conjugate(Complex64::new(
                    0.5 * (root.re + other.re),
                    0.5 * (root.im - other.im).abs(),
                )));
            }
            _ if root.im.abs() <= loose_tolerance * scale => {
                warn!("Root {root} has no conjugate; treating it as real");
                factors.push(RootFactor::Real(root.re));
            }
            _ => {
                return Err(ControlError::UnmatchedConjugate {
                    real: root.re,
                    imag: root.im,
                })
            }
        }
    }

    Ok(factors)
}
