//! Catalog of elementary control elements and chains built from them
//!
//! Each [`ElementKind`] is a fixed formula mapping a short vector of
//! characteristic values to a [`TransferFunction`]:
//!
//! | Kind                 | Short name | Transfer function          |
//! |----------------------|------------|----------------------------|
//! | `FirstOrder`         | `1`        | `K / (1 + τs)`             |
//! | `SecondOrder`        | `2`        | `K / (1 + 2z/w0·s + s²/w0²)` |
//! | `InverseFirstOrder`  | `1i`       | `K(1 + τs)`                |
//! | `InverseSecondOrder` | `2i`       | `K(1 + 2z/w0·s + s²/w0²)`  |
//! | `Integrator`         | `I`        | `1 / sⁿ`                   |
//! | `Differentiator`     | `D`        | `sⁿ`                       |
//! | `P`                  | `P`        | `Kp`                       |
//! | `PI`                 | `PI`       | `Kp(1 + Ti·s) / (Ti·s)`    |
//! | `PID`                | `PID`      | `Kp(1 + Ti·s + Ti·Td·s²) / (Ti·s)` |
//! | `PhaseLead`          | `AP`       | `K(1 + aTs) / (1 + Ts)`    |

use rustctl_types::{ElementRecord, ElementSetup};
use serde::Serialize;

use crate::error::{ControlError, Result};
use crate::polynomial::Polynomial;
use crate::transfer_function::TransferFunction;

/// A tunable parameter of an element kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Characteristic {
    pub name: &'static str,
    pub min_value: f64,
    pub step: f64,
    pub default_value: f64,
}

impl Characteristic {
    const fn new(name: &'static str, min_value: f64, step: f64, default_value: f64) -> Self {
        Self {
            name,
            min_value,
            step,
            default_value,
        }
    }
}

const GAIN: Characteristic = Characteristic::new("Static gain", 0.1, 0.1, 1.0);
const TIME_CONSTANT: Characteristic = Characteristic::new("Time constant", 0.1, 0.1, 1.0);
const PULSATION: Characteristic = Characteristic::new("Natural pulsation", 0.1, 0.1, 3.0);
const DAMPING: Characteristic = Characteristic::new("Damping ratio", 0.0, 0.02, 1.0);
const ORDER: Characteristic = Characteristic::new("Order", 1.0, 1.0, 1.0);
const PROPORTIONAL_GAIN: Characteristic = Characteristic::new("Proportional gain", 0.1, 0.1, 1.0);
const INTEGRAL_TIME: Characteristic = Characteristic::new("Integral time constant", 0.1, 0.1, 1.0);
const DERIVATIVE_TIME: Characteristic =
    Characteristic::new("Derivative time constant", 0.1, 0.1, 1.0);
const LEAD_RATIO: Characteristic = Characteristic::new("Lead ratio", 1.0, 0.1, 2.0);

const FIRST_ORDER: &[Characteristic] = &[GAIN, TIME_CONSTANT];
const SECOND_ORDER: &[Characteristic] = &[GAIN, PULSATION, DAMPING];
const ORDER_ONLY: &[Characteristic] = &[ORDER];
const P_CONTROLLER: &[Characteristic] = &[PROPORTIONAL_GAIN];
const PI_CONTROLLER: &[Characteristic] = &[PROPORTIONAL_GAIN, INTEGRAL_TIME];
const PID_CONTROLLER: &[Characteristic] = &[PROPORTIONAL_GAIN, INTEGRAL_TIME, DERIVATIVE_TIME];
const PHASE_LEAD: &[Characteristic] = &[GAIN, TIME_CONSTANT, LEAD_RATIO];

/// Element formulas available to build a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    FirstOrder,
    SecondOrder,
    InverseFirstOrder,
    InverseSecondOrder,
    Integrator,
    Differentiator,
    P,
    PI,
    PID,
    PhaseLead,
}

impl ElementKind {
    /// Every kind, in catalog order
    pub const ALL: [ElementKind; 10] = [
        ElementKind::FirstOrder,
        ElementKind::SecondOrder,
        ElementKind::InverseFirstOrder,
        ElementKind::InverseSecondOrder,
        ElementKind::Integrator,
        ElementKind::Differentiator,
        ElementKind::P,
        ElementKind::PI,
        ElementKind::PID,
        ElementKind::PhaseLead,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::FirstOrder => "First order",
            ElementKind::SecondOrder => "Second order",
            ElementKind::InverseFirstOrder => "Inverse first order",
            ElementKind::InverseSecondOrder => "Inverse second order",
            ElementKind::Integrator => "Integrator",
            ElementKind::Differentiator => "Differentiator",
            ElementKind::P => "P controller",
            ElementKind::PI => "PI controller",
            ElementKind::PID => "PID controller",
            ElementKind::PhaseLead => "Phase lead compensator",
        }
    }

    /// Code used by the compact setup encoding
    pub fn short_name(&self) -> &'static str {
        match self {
            ElementKind::FirstOrder => "1",
            ElementKind::SecondOrder => "2",
            ElementKind::InverseFirstOrder => "1i",
            ElementKind::InverseSecondOrder => "2i",
            ElementKind::Integrator => "I",
            ElementKind::Differentiator => "D",
            ElementKind::P => "P",
            ElementKind::PI => "PI",
            ElementKind::PID => "PID",
            ElementKind::PhaseLead => "AP",
        }
    }

    pub fn from_short_name(short_name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.short_name() == short_name)
            .ok_or_else(|| ControlError::UnknownElement(short_name.to_string()))
    }

    pub fn characteristics(&self) -> &'static [Characteristic] {
        match self {
            ElementKind::FirstOrder | ElementKind::InverseFirstOrder => FIRST_ORDER,
            ElementKind::SecondOrder | ElementKind::InverseSecondOrder => SECOND_ORDER,
            ElementKind::Integrator | ElementKind::Differentiator => ORDER_ONLY,
            ElementKind::P => P_CONTROLLER,
            ElementKind::PI => PI_CONTROLLER,
            ElementKind::PID => PID_CONTROLLER,
            ElementKind::PhaseLead => PHASE_LEAD,
        }
    }

    pub fn default_values(&self) -> Vec<f64> {
        self.characteristics()
            .iter()
            .map(|characteristic| characteristic.default_value)
            .collect()
    }

    /// Check a value vector against the kind's characteristics
    pub fn validate(&self, values: &[f64]) -> Result<()> {
        let characteristics = self.characteristics();
        if values.len() != characteristics.len() {
            return Err(ControlError::ParameterCount {
                element: self.name(),
                expected: characteristics.len(),
                got: values.len(),
            });
        }

        for (characteristic, &value) in characteristics.iter().zip(values) {
            // NaN fails too
            if !(value >= characteristic.min_value) {
                return Err(ControlError::InvalidCharacteristic {
                    element: self.name(),
                    characteristic: characteristic.name,
                    min_value: characteristic.min_value,
                    value,
                });
            }
        }

        Ok(())
    }

    /// Transfer function of this kind for the given characteristic values
    pub fn transfer_function(&self, values: &[f64]) -> Result<TransferFunction> {
        self.validate(values)?;

        let rational = |numerator: Vec<f64>, denominator: Vec<f64>| {
            TransferFunction::from_polynomials(Polynomial::new(numerator), Polynomial::new(denominator))
        };

        let transfer_function = match *self {
            ElementKind::FirstOrder => {
                let (k, tau) = (values[0], values[1]);
                rational(vec![k], vec![1.0, tau])
            }
            ElementKind::SecondOrder => {
                let (k, w0, z) = (values[0], values[1], values[2]);
                rational(vec![k], vec![1.0, 2.0 * z / w0, 1.0 / (w0 * w0)])
            }
            ElementKind::InverseFirstOrder => {
                let (k, tau) = (values[0], values[1]);
                rational(vec![k, k * tau], vec![1.0])
            }
            ElementKind::InverseSecondOrder => {
                let (k, w0, z) = (values[0], values[1], values[2]);
                rational(vec![k, 2.0 * k * z / w0, k / (w0 * w0)], vec![1.0])
            }
            ElementKind::Integrator => {
                let s_n = Polynomial::monomial(1).power(values[0])?;
                TransferFunction::from_polynomials(Polynomial::one(), s_n)
            }
            ElementKind::Differentiator => {
                let s_n = Polynomial::monomial(1).power(values[0])?;
                TransferFunction::from_polynomials(s_n, Polynomial::one())
            }
            ElementKind::P => rational(vec![values[0]], vec![1.0]),
            ElementKind::PI => {
                let (kp, ti) = (values[0], values[1]);
                rational(vec![kp, kp * ti], vec![0.0, ti])
            }
            ElementKind::PID => {
                let (kp, ti, td) = (values[0], values[1], values[2]);
                rational(vec![kp, kp * ti, kp * ti * td], vec![0.0, ti])
            }
            ElementKind::PhaseLead => {
                let (k, t, a) = (values[0], values[1], values[2]);
                rational(vec![k, k * a * t], vec![1.0, t])
            }
        };

        Ok(transfer_function)
    }
}

/// One configured element of a chain
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleElement {
    kind: ElementKind,
    values: Vec<f64>,
}

impl SimpleElement {
    pub fn new(kind: ElementKind, values: Vec<f64>) -> Result<Self> {
        kind.validate(&values)?;
        Ok(Self { kind, values })
    }

    /// Element with the kind's default characteristic values
    pub fn with_defaults(kind: ElementKind) -> Self {
        Self {
            kind,
            values: kind.default_values(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn transfer_function(&self) -> Result<TransferFunction> {
        self.kind.transfer_function(&self.values)
    }

    pub fn to_record(&self) -> ElementRecord {
        ElementRecord::new(self.kind.short_name(), self.values.clone())
    }

    pub fn from_record(record: &ElementRecord) -> Result<Self> {
        let kind = ElementKind::from_short_name(&record.short_name)?;
        Self::new(kind, record.values.clone())
    }
}

/// An ordered chain of elements in series
///
/// # Example
///
/// ```rust
/// use rustctl_core::{ElementKind, SimpleElements};
///
/// let mut chain = SimpleElements::new();
/// chain.add(ElementKind::FirstOrder);
/// chain.add(ElementKind::Integrator);
/// chain.update(0, 1, 2.0).unwrap();
///
/// let tf = chain.transfer_function().unwrap();
/// assert_eq!(tf.order(), 2);
/// assert_eq!(tf.zero_multiplicity(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleElements {
    list: Vec<SimpleElement>,
}

impl SimpleElements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SimpleElement> {
        self.list.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimpleElement> {
        self.list.iter()
    }

    /// Append an element of `kind` with default values
    pub fn add(&mut self, kind: ElementKind) {
        self.list.push(SimpleElement::with_defaults(kind));
    }

    /// Append an already configured element
    pub fn push(&mut self, element: SimpleElement) {
        self.list.push(element);
    }

    /// Change one characteristic value of the element at `index`
    ///
    /// The chain is left untouched when the new value is rejected.
    pub fn update(&mut self, index: usize, characteristic: usize, value: f64) -> Result<()> {
        let len = self.list.len();
        let element = self
            .list
            .get_mut(index)
            .ok_or(ControlError::ElementIndex { index, len })?;

        let kind = element.kind;
        if characteristic >= element.values.len() {
            return Err(ControlError::CharacteristicIndex {
                element: kind.name(),
                index: characteristic,
            });
        }

        let mut values = element.values.clone();
        values[characteristic] = value;
        kind.validate(&values)?;
        element.values = values;

        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<SimpleElement> {
        if index >= self.list.len() {
            return Err(ControlError::ElementIndex {
                index,
                len: self.list.len(),
            });
        }

        Ok(self.list.remove(index))
    }

    /// Open-loop transfer function of the whole chain
    pub fn transfer_function(&self) -> Result<TransferFunction> {
        self.list
            .iter()
            .try_fold(TransferFunction::identity(), |result, element| {
                Ok(result.multiply(&element.transfer_function()?))
            })
    }

    /// Unity-feedback closed loop around the chain
    pub fn closed_loop_transfer_function(&self) -> Result<TransferFunction> {
        Ok(self.transfer_function()?.closed_loop())
    }

    pub fn to_setup(&self) -> ElementSetup {
        ElementSetup(self.list.iter().map(SimpleElement::to_record).collect())
    }

    pub fn from_setup(setup: &ElementSetup) -> Result<Self> {
        let list = setup
            .records()
            .iter()
            .map(SimpleElement::from_record)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { list })
    }
}
