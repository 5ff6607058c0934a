//! Test inputs and loop selection.

use serde::{Deserialize, Serialize};

/// Standard test input applied to a system in the time domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputType {
    /// Dirac impulse, approximated by `1/dt` over the first step
    Impulse,
    /// Unit step
    Step,
    /// Unit ramp `t`
    Ramp,
}

impl Default for InputType {
    fn default() -> Self {
        InputType::Step
    }
}

impl InputType {
    /// Number of integrations separating the input from an impulse.
    ///
    /// This is the power of `1/s` in the input's Laplace transform.
    pub fn order(&self) -> i64 {
        match self {
            InputType::Impulse => 0,
            InputType::Step => 1,
            InputType::Ramp => 2,
        }
    }

    /// Value of the input at time `t` for a simulation step `dt`
    pub fn value(&self, t: f64, dt: f64) -> f64 {
        if t < 0.0 {
            return 0.0;
        }

        match self {
            InputType::Impulse => {
                if t == 0.0 {
                    1.0 / dt
                } else {
                    0.0
                }
            }
            InputType::Step => 1.0,
            InputType::Ramp => t,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Impulse => "Impulse",
            InputType::Step => "Step",
            InputType::Ramp => "Ramp",
        }
    }
}

/// Whether an analysis looks at the open loop or the unity-feedback closed loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LoopType {
    #[default]
    Open,
    Closed,
}
