//! Polynomial root finding and factorization
//!
//! Durand-Kerner roots are cross-checked against the eigenvalues of the
//! companion matrix, and factorizations are multiplied back out.

use approx::assert_relative_eq;
use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustctl_core::{Complex64, ControlError, Polynomial};
use rustctl_types::RootSettings;

fn strict() -> RootSettings {
    RootSettings {
        max_iterations: 500,
        require_convergence: true,
        ..RootSettings::default()
    }
}

/// Monic polynomial with the given real roots and conjugate pairs
fn from_roots(real: &[f64], pairs: &[Complex64]) -> Polynomial {
    let linear = real.iter().map(|&r| Polynomial::new(vec![-r, 1.0]));
    let quadratic = pairs
        .iter()
        .map(|r| Polynomial::new(vec![r.norm_sqr(), -2.0 * r.re, 1.0]));

    linear
        .chain(quadratic)
        .fold(Polynomial::one(), |product, factor| product.multiply(&factor))
}

/// Eigenvalues of the companion matrix of a polynomial with non-zero leading coefficient
fn companion_eigenvalues(p: &Polynomial) -> Vec<Complex64> {
    let n = p.order();
    let leading = p.highest_coefficient();

    let mut companion = DMatrix::<f64>::zeros(n, n);
    for i in 0..n {
        companion[(i, n - 1)] = -p.at(i) / leading;
        if i + 1 < n {
            companion[(i + 1, i)] = 1.0;
        }
    }

    companion.complex_eigenvalues().iter().copied().collect()
}

fn assert_same_roots(found: &[Complex64], expected: &[Complex64], tolerance: f64) {
    assert_eq!(found.len(), expected.len());

    let mut remaining = expected.to_vec();
    for root in found {
        let (index, distance) = remaining
            .iter()
            .enumerate()
            .map(|(i, other)| (i, (root - other).norm()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();

        assert!(
            distance <= tolerance * root.norm().max(1.0),
            "root {root} has no match (closest at {distance:e})"
        );
        remaining.remove(index);
    }
}

#[test]
fn test_roots_match_companion_eigenvalues() {
    let polynomials = [
        from_roots(&[-1.0, -2.0, -4.0], &[Complex64::new(-1.0, 2.0)]),
        from_roots(&[0.5, -3.0], &[Complex64::new(-0.2, 5.0), Complex64::new(-2.0, 0.5)]),
        Polynomial::new(vec![3.0, -1.0, 4.0, 1.0, -5.0, 9.0]),
    ];

    for p in &polynomials {
        let roots = p.roots_with(&strict()).unwrap();
        let eigenvalues = companion_eigenvalues(p);

        assert_same_roots(&roots, &eigenvalues, 1e-5);
    }
}

#[test]
fn test_known_roots_are_found() {
    let pair = Complex64::new(-1.0, 2.0);
    let p = from_roots(&[-0.5, -3.0], &[pair]).scale(7.0);

    let roots = p.roots_with(&strict()).unwrap();
    let expected = [
        Complex64::new(-0.5, 0.0),
        pair,
        pair.conj(),
        Complex64::new(-3.0, 0.0),
    ];

    assert_same_roots(&roots, &expected, 1e-6);

    // Sorted by ascending modulus
    for pair in roots.windows(2) {
        assert!(pair[0].norm() <= pair[1].norm() + 1e-12);
    }
}

#[test]
fn test_roots_at_origin() {
    // s² (s + 2)
    let p = Polynomial::new(vec![0.0, 0.0, 2.0, 1.0]);
    let roots = p.roots().unwrap();

    assert_eq!(roots.len(), 3);
    assert_eq!(roots[0], Complex64::new(0.0, 0.0));
    assert_eq!(roots[1], Complex64::new(0.0, 0.0));
    assert_relative_eq!(roots[2].re, -2.0, epsilon = 1e-9);

    assert!(matches!(
        Polynomial::zero().roots(),
        Err(ControlError::DegenerateInput(_))
    ));
}

#[test]
fn test_roots_evaluate_to_zero() {
    let p = Polynomial::new(vec![2.0, -3.0, 0.5, 1.0, 0.25]);
    let scale: f64 = p.coefficients().iter().map(|c| c.abs()).sum();

    for root in p.roots_with(&strict()).unwrap() {
        let value = p.evaluate(root);
        assert!(value.norm() < 1e-6 * scale * root.norm().max(1.0).powi(4));
    }
}

#[test]
fn test_product_degree() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..50 {
        let degree_p = rng.gen_range(0..6);
        let degree_q = rng.gen_range(0..6);

        let random = |rng: &mut StdRng, degree: usize| {
            let mut coefficients: Vec<f64> = (0..degree).map(|_| rng.gen_range(-5.0..5.0)).collect();
            coefficients.push(rng.gen_range(0.5..2.0));
            Polynomial::new(coefficients)
        };

        let p = random(&mut rng, degree_p);
        let q = random(&mut rng, degree_q);
        let product = p.multiply(&q);

        assert_eq!(product.degree(), Some(degree_p + degree_q));
        assert_eq!(product.order(), p.order() + q.order());
    }
}

#[test]
fn test_factorize_reconstructs_polynomial() {
    // 3 s (s + 0.5)(s - 2)(s² + 2s + 5)
    let p = Polynomial::new(vec![0.0, 3.0])
        .multiply(&from_roots(&[-0.5, 2.0], &[Complex64::new(-1.0, 2.0)]));

    let factors = p.factorize_with(&strict()).unwrap();

    // s, constant, two real roots, one conjugate pair
    assert_eq!(factors.len(), 5);
    assert_eq!(factors[0], Polynomial::monomial(1));
    assert_relative_eq!(factors[1].at(0), p.lowest_coefficient(), max_relative = 1e-12);
    assert!(factors.iter().skip(2).all(|factor| factor.at(0) == 1.0));
    assert_eq!(factors[4].order(), 2);

    let product = factors
        .iter()
        .fold(Polynomial::one(), |product, factor| product.multiply(factor));

    assert_eq!(product.order(), p.order());
    for (a, b) in product.coefficients().iter().zip(p.coefficients()) {
        assert_relative_eq!(a, b, epsilon = 1e-6, max_relative = 1e-6);
    }
}

#[test]
fn test_factorize_repeated_roots_with_default_settings() {
    let lag = Polynomial::new(vec![1.0, 1.0]);
    let second_order = Polynomial::new(vec![1.0, 2.0 / 3.0, 1.0 / 9.0]);

    // (1 + s)³, (1 + s)⁴ and (1 + s/3)⁴
    let cases = [
        (lag.pow(3), 3, 1.0),
        (lag.pow(4), 4, 1.0),
        (second_order.pow(2), 4, 1.0 / 3.0),
    ];

    for (p, multiplicity, time_constant) in cases {
        let factors = p.factorize().unwrap();

        assert_eq!(factors.len(), multiplicity + 1);
        assert_relative_eq!(factors[0].at(0), 1.0, epsilon = 1e-12);
        for factor in &factors[1..] {
            assert_eq!(factor.order(), 1);
            assert_relative_eq!(factor.at(1), time_constant, epsilon = 1e-9);
        }

        let product = factors
            .iter()
            .fold(Polynomial::one(), |product, factor| product.multiply(factor));
        let scale = p.coefficients().iter().fold(0.0_f64, |m, c| m.max(c.abs()));
        for (a, b) in product.coefficients().iter().zip(p.coefficients()) {
            assert!((a - b).abs() <= 1e-6 * scale);
        }
    }
}

#[test]
fn test_factorize_conjugate_pair_coefficients() {
    // s² + 2s + 5 = 5 (1 + 0.4 s + 0.2 s²)
    let factors = Polynomial::new(vec![5.0, 2.0, 1.0]).factorize().unwrap();

    assert_eq!(factors.len(), 2);
    assert_eq!(factors[0].coefficients(), &[5.0]);
    assert_relative_eq!(factors[1].at(1), 0.4, epsilon = 1e-9);
    assert_relative_eq!(factors[1].at(2), 0.2, epsilon = 1e-9);
}
