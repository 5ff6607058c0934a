//! Element catalog and chains loaded from the compact setup encoding

use approx::assert_relative_eq;
use rustctl_core::{ControlError, ElementKind, SimpleElement, SimpleElements};
use rustctl_types::ElementSetup;

#[test]
fn test_chain_from_setup() {
    let json = r#"[["P",2.0],["I",1.0],["1",1.0,1.0]]"#;
    let setup = ElementSetup::from_json(json).unwrap();
    let chain = SimpleElements::from_setup(&setup).unwrap();

    assert_eq!(chain.len(), 3);
    assert_eq!(chain.get(1).map(SimpleElement::kind), Some(ElementKind::Integrator));

    let tf = chain.transfer_function().unwrap();
    assert_eq!(tf.order(), 2);
    assert_eq!(tf.zero_multiplicity(), 1);
    assert_relative_eq!(tf.static_gain(), 2.0);

    assert_eq!(chain.to_setup().to_json().unwrap(), json);
}

#[test]
fn test_setup_rejects_unknown_and_invalid_elements() {
    let unknown = ElementSetup::from_json(r#"[["1",1.0,1.0],["Z",1.0]]"#).unwrap();
    assert_eq!(
        SimpleElements::from_setup(&unknown),
        Err(ControlError::UnknownElement("Z".to_string()))
    );

    let negative = ElementSetup::from_json(r#"[["1",-1.0,1.0]]"#).unwrap();
    assert!(matches!(
        SimpleElements::from_setup(&negative),
        Err(ControlError::InvalidCharacteristic { characteristic: "Static gain", .. })
    ));

    let short = ElementSetup::from_json(r#"[["PID",1.0,1.0]]"#).unwrap();
    assert!(matches!(
        SimpleElements::from_setup(&short),
        Err(ControlError::ParameterCount { expected: 3, got: 2, .. })
    ));
}

#[test]
fn test_pid_frequency_value() {
    // Kp (1 + 1/(Ti s) + Td s) at s = 2j with Kp = 2, Ti = 0.5, Td = 0.1
    let element = SimpleElement::new(ElementKind::PID, vec![2.0, 0.5, 0.1]).unwrap();
    let (numerator, denominator) = element.transfer_function().unwrap().expanded_parts();

    let value = numerator.complex_value(2.0) / denominator.complex_value(2.0);
    assert_relative_eq!(value.re, 2.0, epsilon = 1e-12);
    assert_relative_eq!(value.im, -1.6, epsilon = 1e-12);
}

#[test]
fn test_multiple_integrator() {
    let element = SimpleElement::new(ElementKind::Integrator, vec![3.0]).unwrap();
    let tf = element.transfer_function().unwrap();

    assert_eq!(tf.order(), 3);
    assert_eq!(tf.zero_multiplicity(), 3);
    assert_eq!(tf.denominator().unwrap().coefficients(), &[0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_editing_a_chain() {
    let mut chain = SimpleElements::new();
    chain.add(ElementKind::FirstOrder);
    chain.add(ElementKind::PhaseLead);
    chain.add(ElementKind::P);

    chain.update(1, 2, 4.0).unwrap();
    assert_eq!(chain.get(1).unwrap().values(), &[1.0, 1.0, 4.0]);

    // Lead ratio below 1 is rejected and the chain keeps its values
    assert!(chain.update(1, 2, 0.5).is_err());
    assert_eq!(chain.get(1).unwrap().values(), &[1.0, 1.0, 4.0]);

    assert_eq!(
        chain.update(5, 0, 1.0),
        Err(ControlError::ElementIndex { index: 5, len: 3 })
    );

    let removed = chain.remove(0).unwrap();
    assert_eq!(removed.kind(), ElementKind::FirstOrder);
    assert_eq!(chain.get(0).unwrap().kind(), ElementKind::PhaseLead);
    assert_eq!(chain.len(), 2);
}

#[test]
fn test_characteristics_serialize_for_display() {
    let json = serde_json::to_value(ElementKind::SecondOrder.characteristics()).unwrap();

    assert_eq!(json.as_array().map(Vec::len), Some(3));
    assert_eq!(json[1]["name"], "Natural pulsation");
    assert_eq!(json[1]["default_value"], 3.0);
    assert_eq!(json[2]["min_value"], 0.0);
}

#[test]
fn test_catalog_order() {
    let short_names: Vec<_> = ElementKind::ALL.iter().map(ElementKind::short_name).collect();

    assert_eq!(
        short_names,
        vec!["1", "2", "1i", "2i", "I", "D", "P", "PI", "PID", "AP"]
    );
}
