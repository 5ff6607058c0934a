//! Time response by backward-difference simulation
//!
//! The transfer function is discretized with `s ≈ (1 - z⁻¹)/dt` (see
//! [`TransferFunction::recursive`]) and the resulting difference equation
//!
//! ```text
//! y[k] = Σᵢ bᵢ·u[k-i] - Σ_{i≥1} aᵢ·y[k-i]
//! ```
//!
//! is run forward from `t = 0`. The integration step never exceeds the
//! display resolution `(t_max - t_min)/(nb_points - 1)`; only samples spaced
//! by at least that resolution are kept.

use std::collections::VecDeque;

use log::debug;
use rustctl_types::{InputType, Rapidity, Series, TimeResponse, TimeSweep};

use crate::error::{ControlError, Result};
use crate::transfer_function::TransferFunction;
use crate::utils::constants::{SETTLING_BAND, SIMULATION_STEP};

/// Simulated response of a transfer function to a standard input
///
/// # Example
///
/// ```rust
/// use rustctl_core::{Polynomial, TimeResponseCalculator, TransferFunction};
/// use rustctl_types::InputType;
///
/// // 2 / (1 + s)
/// let tf = TransferFunction::from_polynomials(
///     Polynomial::constant(2.0),
///     Polynomial::new(vec![1.0, 1.0]),
/// );
/// let calculator = TimeResponseCalculator::new(&tf, InputType::Step);
///
/// let response = calculator.response(0.0, 10.0, 101).unwrap();
/// let last = *response.output.y.last().unwrap();
/// assert!((last - 2.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct TimeResponseCalculator {
    transfer_function: TransferFunction,
    input_type: InputType,
    settling_band: f64,
}

impl TimeResponseCalculator {
    pub fn new(transfer_function: &TransferFunction, input_type: InputType) -> Self {
        Self {
            transfer_function: transfer_function.clone(),
            input_type,
            settling_band: SETTLING_BAND,
        }
    }

    /// Relative half-width of the settling band (5% by default)
    pub fn with_settling_band(mut self, settling_band: f64) -> Self {
        self.settling_band = settling_band;
        self
    }

    pub fn input_type(&self) -> InputType {
        self.input_type
    }

    /// Simulate with the default integration step
    pub fn response(&self, t_min: f64, t_max: f64, nb_points: usize) -> Result<TimeResponse> {
        self.response_with_step(t_min, t_max, SIMULATION_STEP, nb_points)
    }

    /// Simulate over a configured time sweep
    pub fn simulate(&self, sweep: &TimeSweep) -> Result<TimeResponse> {
        self.response_with_step(sweep.t_min, sweep.t_max, sweep.dt, sweep.nb_points)
    }

    /// Simulate with an integration step of at most `dt`
    pub fn response_with_step(
        &self,
        t_min: f64,
        t_max: f64,
        dt: f64,
        nb_points: usize,
    ) -> Result<TimeResponse> {
        if nb_points < 2 {
            return Err(ControlError::InvalidSweep(format!(
                "at least 2 points are needed, got {nb_points}"
            )));
        }
        if !(t_max > t_min) {
            return Err(ControlError::InvalidSweep(format!(
                "t_max ({t_max}) must exceed t_min ({t_min})"
            )));
        }
        if !(dt > 0.0) {
            return Err(ControlError::InvalidSweep(format!(
                "the simulation step must be positive, got {dt}"
            )));
        }

        let dt_min = (t_max - t_min) / (nb_points - 1) as f64;
        let dt = dt.min(dt_min);
        let epsilon = dt * 1e-6;

        let recursive = self.transfer_function.recursive(dt);
        let numerator = recursive.numerator()?;
        let denominator = recursive.denominator()?;

        let horizontal_asymptote = self.asymptote(t_min, t_max).map_or(f64::NAN, |(start, _)| start);
        let mut rapidity = Rapidity::new(horizontal_asymptote, self.settling_band);

        let mut inputs: VecDeque<f64> = vec![0.0; numerator.order() + 1].into();
        let mut outputs: VecDeque<f64> = vec![0.0; denominator.order()].into();

        let steps = (t_max.max(0.0) / dt + 1e-6).floor() as usize;
        debug!(
            "Simulating {} response: {} steps of {dt:e} s",
            self.input_type.as_str(),
            steps + 1
        );

        let mut input_series = Series::with_capacity(nb_points);
        let mut output_series = Series::with_capacity(nb_points);

        for k in 0..=steps {
            let t = k as f64 * dt;
            let input = self.input_type.value(t, dt);

            inputs.push_front(input);
            inputs.pop_back();

            let mut output: f64 = numerator
                .coefficients()
                .iter()
                .zip(&inputs)
                .map(|(b, u)| b * u)
                .sum();
            output -= denominator
                .coefficients()
                .iter()
                .skip(1)
                .zip(&outputs)
                .map(|(a, y)| a * y)
                .sum::<f64>();

            let keep = t >= t_min - epsilon
                && t <= t_max + epsilon
                && output_series
                    .x
                    .last()
                    .map_or(true, |&last| t >= last + dt_min - epsilon);
            if keep {
                input_series.push(t, input);
                output_series.push(t, output);
            }

            rapidity.observe(t, output);

            outputs.push_front(output);
            outputs.pop_back();
        }

        Ok(TimeResponse {
            input: input_series,
            output: output_series,
            rapidity,
        })
    }

    /// `input order + zero multiplicity`: net integrations between an
    /// impulse and the output
    fn integrations(&self) -> i64 {
        self.input_type.order() + self.transfer_function.zero_multiplicity()
    }

    /// Whether the output tends to a line
    pub fn has_asymptote(&self) -> bool {
        self.integrations() <= 2
    }

    /// Whether the output tends to a constant
    pub fn has_horizontal_asymptote(&self) -> bool {
        self.integrations() <= 1
    }

    /// End values of the asymptote `A·t + B` over `[t_min, t_max]`
    ///
    /// `A` and `B` come from the low-order expansion `R₀ + R₁·s` of the
    /// transfer function with its `s` factors removed:
    ///
    /// ```text
    /// R₀ = n₀/d₀        R₁ = (n₁·d₀ - n₀·d₁)/d₀²
    /// ```
    ///
    /// `None` when the output grows faster than linearly.
    pub fn asymptote(&self, t_min: f64, t_max: f64) -> Option<(f64, f64)> {
        let m = self.integrations();
        if m > 2 {
            return None;
        }
        if m < 0 {
            return Some((0.0, 0.0));
        }

        let (numerator, denominator) = self.transfer_function.expanded_parts();
        let (n, d) = (numerator.without_zero_roots(), denominator.without_zero_roots());
        let (n0, n1, d0, d1) = (n.at(0), n.at(1), d.at(0), d.at(1));

        let values = [0.0, 0.0, n0 / d0, (n1 * d0 - n0 * d1) / (d0 * d0)];
        let m = m as usize;
        let (a, b) = (values[m], values[m + 1]);

        Some((a * t_min + b, a * t_max + b))
    }

    /// Whether the response starts along a non-horizontal tangent
    pub fn has_tangent(&self) -> bool {
        self.transfer_function.order() + self.input_type.order() >= 2
    }

    /// End values of the tangent at the origin over `[t_min, t_max]`
    ///
    /// The slope is the ratio of the highest-order coefficients when
    /// `order + input order` is exactly 2, and 0 above.
    pub fn tangent(&self, t_min: f64, t_max: f64) -> Option<(f64, f64)> {
        if !self.has_tangent() {
            return None;
        }
        if self.transfer_function.order() + self.input_type.order() > 2 {
            return Some((0.0, 0.0));
        }

        let (numerator, denominator) = self.transfer_function.expanded_parts();
        let slope = numerator.highest_coefficient() / denominator.highest_coefficient();

        Some((slope * t_min, slope * t_max))
    }
}
