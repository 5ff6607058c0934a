//! Frequency response over a logarithmic sweep
//!
//! The expanded transfer function `N(s)/D(s)` is evaluated at `s = jw` for
//! `nb_points` pulsations spaced evenly in `log10(w)`:
//!
//! ```text
//! gain(w)  = 20·log10|N(jw)| - 20·log10|D(jw)|      [dB]
//! phase(w) = arg N(jw) - arg D(jw)                  [deg]
//! ```
//!
//! The raw phase jumps by 360° whenever `atan2` crosses its branch cut. A
//! constant shift picked from the number of integrators/differentiators
//! puts the low-frequency phase on the conventional branch, then
//! [`unwrap_phase`] removes the jumps.

use log::debug;
use rustctl_types::{
    AsymptoticChange, BlackNicholsResponse, CartesianResponse, FrequencySweep, GainMargin,
    PhaseMargin, PolarResponse,
};

use super::{asymptotic, margins};
use crate::error::{ControlError, Result};
use crate::polynomial::Polynomial;
use crate::transfer_function::TransferFunction;

/// Remove jumps larger than `step` between consecutive samples
///
/// Every sample is moved by multiples of `2·step` until it lies within
/// `step` of the previous (already corrected) sample. Non-finite samples are
/// passed through untouched.
pub fn unwrap_phase(values: &[f64], step: f64) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };

    let mut previous = first;
    values
        .iter()
        .map(|&value| {
            if !value.is_finite() || !previous.is_finite() {
                previous = value;
                return value;
            }

            let mut value = value;
            while (value - previous).abs() > step {
                value -= (value - previous).signum() * 2.0 * step;
            }

            previous = value;
            value
        })
        .collect()
}

/// Constant phase correction for `zero_multiplicity` net integrators
///
/// For `zero_multiplicity ≡ 2 (mod 4)`, type two loops among them, the
/// corrected phase sits one full turn below the true phase, and so do the
/// phase margins read on it.
fn phase_shift(zero_multiplicity: i64) -> f64 {
    let branch = match zero_multiplicity % 4 {
        -3 => 90.0,
        -2 => -180.0,
        -1 => -90.0,
        1 => 90.0,
        2 => -180.0,
        3 => -90.0,
        _ => 0.0,
    };

    branch - zero_multiplicity as f64 * 90.0
}

/// Check a logarithmic sweep and return its `log10` step
pub(crate) fn check_frequency_sweep(w_min: f64, w_max: f64, nb_points: usize) -> Result<f64> {
    if nb_points < 2 {
        return Err(ControlError::InvalidSweep(format!(
            "at least 2 points are needed, got {nb_points}"
        )));
    }
    if !(w_min > 0.0) {
        return Err(ControlError::InvalidSweep(format!(
            "w_min must be positive, got {w_min}"
        )));
    }
    if !(w_max > w_min) {
        return Err(ControlError::InvalidSweep(format!(
            "w_max ({w_max}) must exceed w_min ({w_min})"
        )));
    }

    Ok((w_max.log10() - w_min.log10()) / (nb_points - 1) as f64)
}

/// Bode, Nyquist and Black-Nichols data of a transfer function
///
/// # Example
///
/// ```rust
/// use rustctl_core::{FrequencyResponseCalculator, Polynomial, TransferFunction};
///
/// // 1 / (1 + s)
/// let tf = TransferFunction::from_polynomials(
///     Polynomial::one(),
///     Polynomial::new(vec![1.0, 1.0]),
/// );
/// let calculator = FrequencyResponseCalculator::new(&tf);
///
/// let response = calculator.polar_response(0.1, 10.0, 3).unwrap();
/// assert!((response.gains[1] + 3.0103).abs() < 1e-4);
/// assert!((response.phases[1] + 45.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct FrequencyResponseCalculator {
    transfer_function: TransferFunction,
    numerator: Polynomial,
    denominator: Polynomial,
    zero_multiplicity: i64,
}

impl FrequencyResponseCalculator {
    pub fn new(transfer_function: &TransferFunction) -> Self {
        let (numerator, denominator) = transfer_function.expanded_parts();
        let zero_multiplicity = denominator.zero_multiplicity().unwrap_or(0) as i64
            - numerator.zero_multiplicity().unwrap_or(0) as i64;

        Self {
            transfer_function: transfer_function.clone(),
            numerator,
            denominator,
            zero_multiplicity,
        }
    }

    pub fn transfer_function(&self) -> &TransferFunction {
        &self.transfer_function
    }

    /// Gain (dB) and unwrapped phase (deg) over `[w_min, w_max]`
    ///
    /// Exactly `nb_points` samples are produced, `w_max` included.
    pub fn polar_response(&self, w_min: f64, w_max: f64, nb_points: usize) -> Result<PolarResponse> {
        let w_log_step = check_frequency_sweep(w_min, w_max, nb_points)?;
        let w_log_min = w_min.log10();

        debug!(
            "Sweeping {nb_points} points over [{w_min}, {w_max}] rad/s (zero multiplicity {})",
            self.zero_multiplicity
        );

        let shift = phase_shift(self.zero_multiplicity);
        let mut response = PolarResponse::with_capacity(nb_points);

        for i in 0..nb_points {
            let w = if i == nb_points - 1 {
                w_max
            } else {
                10f64.powf(w_log_min + i as f64 * w_log_step)
            };

            let numerator = self.numerator.complex_value(w);
            let denominator = self.denominator.complex_value(w);

            let gain = 20.0 * numerator.norm().log10() - 20.0 * denominator.norm().log10();
            let phase = (numerator.arg() - denominator.arg()).to_degrees();

            response.push(w, gain, phase + shift);
        }

        response.phases = unwrap_phase(&response.phases, 180.0);
        Ok(response)
    }

    /// [`polar_response`](Self::polar_response) over a configured sweep
    pub fn sweep(&self, sweep: &FrequencySweep) -> Result<PolarResponse> {
        self.polar_response(sweep.w_min, sweep.w_max, sweep.nb_points)
    }

    /// Nyquist coordinates derived from the polar response
    pub fn cartesian_response(
        &self,
        w_min: f64,
        w_max: f64,
        nb_points: usize,
    ) -> Result<CartesianResponse> {
        let polar = self.polar_response(w_min, w_max, nb_points)?;

        let (reals, imaginaries) = polar
            .gains
            .iter()
            .zip(&polar.phases)
            .map(|(&gain, &phase)| {
                let norm = 10f64.powf(gain / 20.0);
                let angle = phase.to_radians();
                (norm * angle.cos(), norm * angle.sin())
            })
            .unzip();

        Ok(CartesianResponse {
            ws: polar.ws,
            reals,
            imaginaries,
        })
    }

    /// Gain against phase, for the Black-Nichols chart
    pub fn black_nichols_response(
        &self,
        w_min: f64,
        w_max: f64,
        nb_points: usize,
    ) -> Result<BlackNicholsResponse> {
        Ok(self.polar_response(w_min, w_max, nb_points)?.into())
    }

    /// Breakpoints of the straight-line approximation
    pub fn asymptotic_changes(&self) -> Vec<AsymptoticChange> {
        asymptotic::asymptotic_changes(&self.transfer_function)
    }

    /// Straight-line Bode approximation over `[w_min, w_max]`
    pub fn asymptotic_polar_response(&self, w_min: f64, w_max: f64) -> Result<PolarResponse> {
        asymptotic::asymptotic_polar_response(&self.transfer_function, w_min, w_max)
    }

    /// Reading at the -180° crossing of `response`, if any
    pub fn gain_margin(&self, response: &PolarResponse) -> Option<GainMargin> {
        margins::gain_margin(response)
    }

    /// Reading at the 0 dB crossing of `response`, if any
    pub fn phase_margin(&self, response: &PolarResponse) -> Option<PhaseMargin> {
        margins::phase_margin(response)
    }

    /// Both margins over a configured sweep
    pub fn margins(&self, sweep: &FrequencySweep) -> Result<(Option<GainMargin>, Option<PhaseMargin>)> {
        let response = self.sweep(sweep)?;
        Ok((margins::gain_margin(&response), margins::phase_margin(&response)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tf(numerator: &[f64], denominator: &[f64]) -> TransferFunction {
        TransferFunction::from_polynomials(Polynomial::new(numerator), Polynomial::new(denominator))
    }

    #[test]
    fn test_unwrap() {
        let unwrapped = unwrap_phase(&[170.0, -170.0, 170.0], 180.0);
        assert_eq!(unwrapped, vec![170.0, 190.0, 170.0]);

        let unwrapped = unwrap_phase(&[-90.0, -179.0, 179.0, 150.0, -100.0], 180.0);
        for pair in unwrapped.windows(2) {
            assert!((pair[1] - pair[0]).abs() <= 180.0);
        }
        assert_eq!(unwrapped[2], -181.0);

        assert!(unwrap_phase(&[], 180.0).is_empty());
    }

    #[test]
    fn test_phase_shift_table() {
        assert_eq!(phase_shift(0), 0.0);
        assert_eq!(phase_shift(1), 0.0);
        assert_eq!(phase_shift(-1), 0.0);
        assert_eq!(phase_shift(2), -360.0);
        assert_eq!(phase_shift(-2), 0.0);
        assert_eq!(phase_shift(3), -360.0);
        assert_eq!(phase_shift(-3), 360.0);
        assert_eq!(phase_shift(5), -360.0);
    }

    #[test]
    fn test_double_integrator_phase_is_one_turn_low() {
        // (1 + s) / s²
        let calculator = FrequencyResponseCalculator::new(&tf(&[1.0, 1.0], &[0.0, 0.0, 1.0]));
        let response = calculator.polar_response(0.1, 10.0, 21).unwrap();

        for (w, phase) in response.ws.iter().zip(&response.phases) {
            assert_relative_eq!(phase + 360.0, -180.0 + w.atan().to_degrees(), epsilon = 1e-9);
        }

        let margin = calculator.phase_margin(&response).unwrap();
        assert!(margin.margin() < -300.0);
    }

    #[test]
    fn test_sweep_bounds() {
        let calculator = FrequencyResponseCalculator::new(&tf(&[1.0], &[1.0, 1.0]));
        let response = calculator.polar_response(0.01, 100.0, 5).unwrap();

        assert_eq!(response.len(), 5);
        assert_relative_eq!(response.ws[0], 0.01, max_relative = 1e-12);
        assert_relative_eq!(response.ws[2], 1.0, max_relative = 1e-12);
        assert_eq!(response.ws[4], 100.0);
    }

    #[test]
    fn test_invalid_sweeps() {
        let calculator = FrequencyResponseCalculator::new(&tf(&[1.0], &[1.0, 1.0]));

        assert!(matches!(
            calculator.polar_response(0.01, 100.0, 1),
            Err(ControlError::InvalidSweep(_))
        ));
        assert!(matches!(
            calculator.polar_response(0.0, 100.0, 10),
            Err(ControlError::InvalidSweep(_))
        ));
        assert!(matches!(
            calculator.polar_response(10.0, 1.0, 10),
            Err(ControlError::InvalidSweep(_))
        ));
    }

    #[test]
    fn test_first_order_corner() {
        let calculator = FrequencyResponseCalculator::new(&tf(&[1.0], &[1.0, 1.0]));
        let response = calculator.polar_response(0.1, 10.0, 3).unwrap();

        assert_relative_eq!(response.gains[1], -3.0103, epsilon = 1e-4);
        assert_relative_eq!(response.phases[1], -45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_integrator_phase() {
        let calculator = FrequencyResponseCalculator::new(&tf(&[1.0], &[0.0, 1.0, 1.0]));
        let response = calculator.polar_response(0.001, 1000.0, 61).unwrap();

        assert_relative_eq!(response.phases[0], -90.0, epsilon = 0.1);
        assert_relative_eq!(response.phases[60], -180.0, epsilon = 0.1);
        for pair in response.phases.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
    }

    #[test]
    fn test_cartesian_response() {
        let calculator = FrequencyResponseCalculator::new(&tf(&[1.0], &[1.0, 1.0]));
        let response = calculator.cartesian_response(0.1, 10.0, 3).unwrap();

        // 1/(1+j) = 0.5 - 0.5j
        assert_relative_eq!(response.reals[1], 0.5, epsilon = 1e-9);
        assert_relative_eq!(response.imaginaries[1], -0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_black_nichols_matches_polar() {
        let calculator = FrequencyResponseCalculator::new(&tf(&[2.0], &[0.0, 1.0, 0.5]));
        let polar = calculator.polar_response(0.1, 10.0, 11).unwrap();
        let black = calculator.black_nichols_response(0.1, 10.0, 11).unwrap();

        assert_eq!(black.gains, polar.gains);
        assert_eq!(black.phases, polar.phases);
    }
}
