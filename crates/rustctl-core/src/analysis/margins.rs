//! Gain and phase margins read from a sampled polar response
//!
//! A crossing is detected between consecutive samples whose signed distance
//! to the threshold changes sign, or at a sample lying exactly on it.
//! Crossing pulsation and readout are interpolated linearly in `log10(w)`.

use rustctl_types::{GainMargin, PhaseMargin, PolarResponse};

/// `(w, readout)` at every zero of `distance`
fn crossings(ws: &[f64], distance: &[f64], readout: &[f64]) -> Vec<(f64, f64)> {
    let n = ws.len().min(distance.len()).min(readout.len());
    let mut found = Vec::new();

    for i in 0..n {
        let a = distance[i];
        if a == 0.0 {
            found.push((ws[i], readout[i]));
            continue;
        }
        if i + 1 >= n {
            break;
        }

        let b = distance[i + 1];
        if b == 0.0 || !(a * b < 0.0) {
            continue;
        }

        let ratio = a / (a - b);
        let (log_w0, log_w1) = (ws[i].log10(), ws[i + 1].log10());
        let w = 10f64.powf(log_w0 + ratio * (log_w1 - log_w0));
        let value = readout[i] + ratio * (readout[i + 1] - readout[i]);

        found.push((w, value));
    }

    found
}

/// Gain at the -180° phase crossing
///
/// Among several crossings the largest gain is kept. `None` when the phase
/// never crosses -180° in the swept range.
pub fn gain_margin(response: &PolarResponse) -> Option<GainMargin> {
    let distance: Vec<f64> = response.phases.iter().map(|phase| phase + 180.0).collect();

    crossings(&response.ws, &distance, &response.gains)
        .into_iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(frequency, gain)| GainMargin { frequency, gain })
}

/// Phase at the 0 dB gain crossing
///
/// Among several crossings the smallest phase is kept. `None` when the gain
/// never crosses 0 dB in the swept range.
pub fn phase_margin(response: &PolarResponse) -> Option<PhaseMargin> {
    crossings(&response.ws, &response.gains, &response.phases)
        .into_iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(frequency, phase)| PhaseMargin { frequency, phase })
}
