//! Bode sweeps and stability margins of textbook loops

use approx::assert_relative_eq;
use rustctl_core::analysis::unwrap_phase;
use rustctl_core::{
    ElementKind, FrequencyResponseCalculator, Polynomial, SimpleElement, SimpleElements,
    TransferFunction,
};
use rustctl_types::FrequencySweep;

fn chain(elements: Vec<(ElementKind, Vec<f64>)>) -> TransferFunction {
    let mut chain = SimpleElements::new();
    for (kind, values) in elements {
        chain.push(SimpleElement::new(kind, values).unwrap());
    }
    chain.transfer_function().unwrap()
}

#[test]
fn test_integrator_and_double_lag_margins() {
    // 1 / (s (1 + s)²): phase -180° at w = 1 where |G| = 1/2
    let tf = chain(vec![
        (ElementKind::Integrator, vec![1.0]),
        (ElementKind::FirstOrder, vec![1.0, 1.0]),
        (ElementKind::FirstOrder, vec![1.0, 1.0]),
    ]);
    let calculator = FrequencyResponseCalculator::new(&tf);
    let response = calculator.sweep(&FrequencySweep::default()).unwrap();

    let gain_margin = calculator.gain_margin(&response).unwrap();
    assert_relative_eq!(gain_margin.frequency, 1.0, max_relative = 1e-3);
    assert_relative_eq!(gain_margin.gain, -6.0206, epsilon = 1e-2);

    // |G| = 1 at w (1 + w²) = 1
    let phase_margin = calculator.phase_margin(&response).unwrap();
    assert_relative_eq!(phase_margin.frequency, 0.68233, max_relative = 1e-3);
    assert_relative_eq!(phase_margin.phase, -158.614, epsilon = 1e-2);
    assert_relative_eq!(phase_margin.margin(), 21.386, epsilon = 1e-2);
}

#[test]
fn test_type_one_third_order_margins() {
    // 10 / (s (1 + s)(1 + 0.1 s)): barely stable
    let tf = TransferFunction::new(
        vec![Polynomial::constant(10.0)],
        vec![
            Polynomial::new(vec![0.0, 1.0]),
            Polynomial::new(vec![1.0, 1.0]),
            Polynomial::new(vec![1.0, 0.1]),
        ],
    );
    let calculator = FrequencyResponseCalculator::new(&tf);
    let sweep = FrequencySweep {
        w_min: 0.01,
        w_max: 100.0,
        nb_points: 1001,
    };
    let (gain_margin, phase_margin) = calculator.margins(&sweep).unwrap();

    let gain_margin = gain_margin.unwrap();
    assert_relative_eq!(gain_margin.frequency, 10f64.sqrt(), max_relative = 1e-3);
    assert_relative_eq!(gain_margin.gain, -0.8279, epsilon = 1e-2);
    assert!(gain_margin.margin() > 0.0);

    let phase_margin = phase_margin.unwrap();
    assert_relative_eq!(phase_margin.frequency, 3.0145, max_relative = 1e-3);
    assert_relative_eq!(phase_margin.phase, -178.424, epsilon = 2e-2);
}

#[test]
fn test_first_order_has_no_gain_margin() {
    let tf = chain(vec![(ElementKind::FirstOrder, vec![0.5, 1.0])]);
    let calculator = FrequencyResponseCalculator::new(&tf);
    let response = calculator.polar_response(0.01, 100.0, 201).unwrap();

    // Gain stays below 0 dB and phase above -90°
    assert_eq!(calculator.gain_margin(&response), None);
    assert_eq!(calculator.phase_margin(&response), None);
}

#[test]
fn test_phase_is_continuous_across_branch_cut() {
    // Third order lag: phase runs from 0° down to -270°
    let tf = chain(vec![
        (ElementKind::FirstOrder, vec![1.0, 1.0]),
        (ElementKind::SecondOrder, vec![1.0, 3.0, 0.2]),
    ]);
    let response = FrequencyResponseCalculator::new(&tf)
        .polar_response(0.01, 1000.0, 501)
        .unwrap();

    assert_relative_eq!(response.phases[0], 0.0, epsilon = 1.0);
    assert_relative_eq!(*response.phases.last().unwrap(), -270.0, epsilon = 1.0);
    for pair in response.phases.windows(2) {
        assert!((pair[1] - pair[0]).abs() < 180.0);
    }
}

#[test]
fn test_differentiator_phase() {
    let tf = chain(vec![(ElementKind::Differentiator, vec![1.0])]);
    let response = FrequencyResponseCalculator::new(&tf)
        .polar_response(0.1, 10.0, 3)
        .unwrap();

    for phase in &response.phases {
        assert_relative_eq!(*phase, 90.0, epsilon = 1e-9);
    }
    assert_relative_eq!(response.gains[0], -20.0, epsilon = 1e-9);
    assert_relative_eq!(response.gains[2], 20.0, epsilon = 1e-9);
}

#[test]
fn test_unwrap_keeps_jumps_below_step() {
    let unwrapped = unwrap_phase(&[170.0, -170.0, 170.0], 180.0);

    assert_eq!(unwrapped, vec![170.0, 190.0, 170.0]);
    for pair in unwrapped.windows(2) {
        assert!((pair[1] - pair[0]).abs() <= 180.0);
    }
}

#[test]
fn test_asymptotes_follow_chain_factors() {
    // PI (Kp = 2, Ti = 10) and a first order (τ = 0.1)
    let tf = chain(vec![
        (ElementKind::PI, vec![2.0, 10.0]),
        (ElementKind::FirstOrder, vec![1.0, 0.1]),
    ]);
    let calculator = FrequencyResponseCalculator::new(&tf);

    let changes = calculator.asymptotic_changes();
    assert_eq!(changes.len(), 2);
    assert_relative_eq!(changes[0].w, 0.1, max_relative = 1e-12);
    assert_eq!(changes[0].order, 1);
    assert_relative_eq!(changes[1].w, 10.0, max_relative = 1e-12);
    assert_eq!(changes[1].order, -1);

    let response = calculator.asymptotic_polar_response(0.01, 100.0).unwrap();
    assert_eq!(response.len(), 6);
    assert_eq!(response.phases, vec![-90.0, -90.0, 0.0, 0.0, -90.0, -90.0]);

    // Flat at 20·log10(Kp) between the two breakpoints
    assert_relative_eq!(response.gains[2], 20.0 * 2f64.log10(), epsilon = 1e-9);
    assert_relative_eq!(response.gains[3], 20.0 * 2f64.log10(), epsilon = 1e-9);
}
