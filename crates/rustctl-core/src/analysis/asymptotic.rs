//! Straight-line (asymptotic) Bode approximation
//!
//! Every factor of a transfer function contributes a slope change at its
//! characteristic frequency: `+k` (×20 dB/decade) for a numerator factor of
//! real order `k`, `-k` for a denominator factor. Below the first breakpoint
//! the slope is set by the `s` factors, above it the slope changes by the
//! breakpoint orders in turn. The approximated phase is `90°·slope`.

use rustctl_types::{AsymptoticChange, PolarResponse};

use super::frequency::check_frequency_sweep;
use crate::error::Result;
use crate::polynomial::Polynomial;
use crate::transfer_function::TransferFunction;
use crate::utils::constants::FACTOR_TOLERANCE;
use crate::utils::nearly_equal;

/// Low-frequency slope and sorted breakpoints of a factored transfer function
#[derive(Debug, Clone, PartialEq)]
pub struct AsymptoticModel {
    pub low_frequency_order: i64,
    pub changes: Vec<AsymptoticChange>,
}

impl AsymptoticModel {
    pub fn new(transfer_function: &TransferFunction) -> Self {
        let mut model = Self {
            low_frequency_order: 0,
            changes: Vec::new(),
        };

        for polynomial in transfer_function.numerators() {
            model.add_factor(polynomial, 1);
        }
        for polynomial in transfer_function.denominators() {
            model.add_factor(polynomial, -1);
        }

        model.changes.sort_by(|a, b| a.w.total_cmp(&b.w));
        model
    }

    fn add_factor(&mut self, polynomial: &Polynomial, factor: i64) {
        let Some(low) = polynomial.zero_multiplicity() else {
            return;
        };
        self.low_frequency_order += factor * low as i64;

        let (Some(w), Some(high)) = (polynomial.characteristic_frequency(), polynomial.degree())
        else {
            return;
        };
        let real_order = (high - low) as i64;
        let order = factor * real_order;

        match self
            .changes
            .iter_mut()
            .find(|change| nearly_equal(change.w, w, FACTOR_TOLERANCE))
        {
            Some(change) => change.order += order,
            None => self.changes.push(AsymptoticChange { w, order }),
        }
    }
}

/// Breakpoints `{w, order}` sorted by ascending `w`, equal `w` merged
pub fn asymptotic_changes(transfer_function: &TransferFunction) -> Vec<AsymptoticChange> {
    AsymptoticModel::new(transfer_function).changes
}

/// Piecewise-linear gain and stepwise phase over `[w_min, w_max]`
///
/// The first point sits at `min(w_min, first breakpoint)`. Each breakpoint
/// yields two points at the same pulsation: the end of the previous segment
/// and the start of the next one with its new phase. Without breakpoints the
/// result is the straight line from `w_min` to `w_max`.
pub fn asymptotic_polar_response(
    transfer_function: &TransferFunction,
    w_min: f64,
    w_max: f64,
) -> Result<PolarResponse> {
    check_frequency_sweep(w_min, w_max, 2)?;

    let model = AsymptoticModel::new(transfer_function);
    let (numerator, denominator) = transfer_function.expanded_parts();
    let static_gain = (numerator.lowest_coefficient() / denominator.lowest_coefficient()).abs();

    let mut order = model.low_frequency_order;
    let w_initial = model
        .changes
        .first()
        .map_or(w_min, |change| w_min.min(change.w));

    let mut response = PolarResponse::with_capacity(2 * model.changes.len() + 2);
    response.push(
        w_initial,
        20.0 * w_initial.log10() * order as f64 + 20.0 * static_gain.log10(),
        90.0 * order as f64,
    );

    let mut last_w = w_initial;
    let mut last_gain = response.gains[0];

    for change in &model.changes {
        let gain = 20.0 * (change.w / last_w).log10() * order as f64 + last_gain;
        response.push(change.w, gain, 90.0 * order as f64);

        order += change.order;
        response.push(change.w, gain, 90.0 * order as f64);

        last_w = change.w;
        last_gain = gain;
    }

    if w_max > last_w {
        let gain = 20.0 * (w_max / last_w).log10() * order as f64 + last_gain;
        response.push(w_max, gain, 90.0 * order as f64);
    }

    Ok(response)
}
