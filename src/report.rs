//! One analysis pass over an element chain

use log::{debug, info, warn};
use rustctl_core::tex::transfer_function_tex;
use rustctl_core::{
    FrequencyResponseCalculator, Result, SimpleElements, TimeResponseCalculator, TransferFunction,
};
use rustctl_types::{AnalysisSettings, AsymptoticChange, GainMargin, InputType, PhaseMargin};
use serde::Serialize;

/// What the analysis views show for a chain
///
/// Frequency quantities are read on the open loop, time quantities on the
/// unity-feedback closed loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Factored open loop in TeX
    pub open_loop: String,
    /// Factored closed loop in TeX
    pub closed_loop: String,
    pub order: i64,
    pub zero_multiplicity: i64,
    pub static_gain: f64,
    pub gain_margin: Option<GainMargin>,
    pub phase_margin: Option<PhaseMargin>,
    pub asymptotic_changes: Vec<AsymptoticChange>,
    pub input_type: InputType,
    pub settling_time: Option<f64>,
    /// Closed-loop asymptote over the time window, as `(start, end)` values
    pub asymptote: Option<(f64, f64)>,
}

impl AnalysisReport {
    pub fn new(
        chain: &SimpleElements,
        settings: &AnalysisSettings,
        input_type: InputType,
    ) -> Result<Self> {
        let open_loop = chain.transfer_function()?;
        let closed_loop = open_loop.closed_loop();
        debug!("Analyzing a chain of {} elements", chain.len());

        let frequency = FrequencyResponseCalculator::new(&open_loop);
        let (gain_margin, phase_margin) = frequency.margins(&settings.frequency)?;

        let time = TimeResponseCalculator::new(&closed_loop, input_type)
            .with_settling_band(settings.settling_band);
        let response = time.simulate(&settings.time)?;

        let report = Self {
            open_loop: factored_tex(&open_loop, settings),
            closed_loop: factored_tex(&closed_loop, settings),
            order: open_loop.order(),
            zero_multiplicity: open_loop.zero_multiplicity(),
            static_gain: open_loop.static_gain(),
            gain_margin,
            phase_margin,
            asymptotic_changes: frequency.asymptotic_changes(),
            input_type,
            settling_time: response.rapidity.settling_time(),
            asymptote: time.asymptote(settings.time.t_min, settings.time.t_max),
        };

        info!(
            "Order {}, class {}, settling {:?}",
            report.order, report.zero_multiplicity, report.settling_time
        );
        Ok(report)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// TeX of the factored transfer function, or of the unfactored one when the
/// roots cannot be split into real factors
fn factored_tex(transfer_function: &TransferFunction, settings: &AnalysisSettings) -> String {
    match transfer_function.factorize_with(&settings.roots) {
        Ok(factored) => transfer_function_tex(&factored, &settings.tex),
        Err(err) => {
            warn!("Cannot factorize the transfer function ({err}); showing it unfactored");
            transfer_function_tex(transfer_function, &settings.tex)
        }
    }
}
