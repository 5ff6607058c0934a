//! Response series and stability margin records.

use serde::{Deserialize, Serialize};

/// Bode data: gain in dB and phase in degrees against pulsation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarResponse {
    pub ws: Vec<f64>,
    pub gains: Vec<f64>,
    pub phases: Vec<f64>,
}

impl PolarResponse {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ws: Vec::with_capacity(capacity),
            gains: Vec::with_capacity(capacity),
            phases: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, w: f64, gain: f64, phase: f64) {
        self.ws.push(w);
        self.gains.push(gain);
        self.phases.push(phase);
    }

    pub fn len(&self) -> usize {
        self.ws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ws.is_empty()
    }
}

/// Nyquist data: the frequency response traced in the complex plane
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartesianResponse {
    pub ws: Vec<f64>,
    pub reals: Vec<f64>,
    pub imaginaries: Vec<f64>,
}

/// Black-Nichols data: gain in dB against phase in degrees
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlackNicholsResponse {
    pub ws: Vec<f64>,
    pub phases: Vec<f64>,
    pub gains: Vec<f64>,
}

impl From<PolarResponse> for BlackNicholsResponse {
    fn from(response: PolarResponse) -> Self {
        Self {
            ws: response.ws,
            phases: response.phases,
            gains: response.gains,
        }
    }
}

/// Breakpoint of the straight-line Bode approximation
///
/// `order` is the change of slope (in multiples of 20 dB/decade) applied
/// once the pulsation `w` is passed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsymptoticChange {
    pub w: f64,
    pub order: i64,
}

/// Gain reading at the -180° phase crossing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainMargin {
    /// Pulsation of the crossing (rad/s)
    pub frequency: f64,
    /// Open-loop gain at the crossing (dB)
    pub gain: f64,
}

impl GainMargin {
    /// Gain margin in dB (positive when the loop is stable)
    pub fn margin(&self) -> f64 {
        -self.gain
    }
}

/// Phase reading at the 0 dB gain crossing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseMargin {
    /// Pulsation of the crossing (rad/s)
    pub frequency: f64,
    /// Open-loop phase at the crossing (degrees)
    pub phase: f64,
}

impl PhaseMargin {
    /// Phase margin in degrees (positive when the loop is stable)
    pub fn margin(&self) -> f64 {
        self.phase + 180.0
    }
}

/// A sampled signal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Settling information of a time response
///
/// The output is settled once it enters `stabilized_area` and has not left
/// it since. `time`/`value` hold the most recent entry into the band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rapidity {
    pub horizontal_asymptote: f64,
    pub stabilized_area: [f64; 2],
    pub settled: bool,
    pub time: f64,
    pub value: f64,
}

impl Rapidity {
    pub fn new(horizontal_asymptote: f64, band: f64) -> Self {
        let low = horizontal_asymptote * (1.0 - band);
        let high = horizontal_asymptote * (1.0 + band);

        Self {
            horizontal_asymptote,
            stabilized_area: [low.min(high), low.max(high)],
            settled: false,
            time: 0.0,
            value: 0.0,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.stabilized_area[0] && value <= self.stabilized_area[1]
    }

    /// Record one simulated sample
    pub fn observe(&mut self, t: f64, output: f64) {
        let inside = self.contains(output);

        if !self.settled && inside {
            self.settled = true;
            self.time = t;
            self.value = output;
        } else if self.settled && !inside {
            self.settled = false;
        }
    }

    /// Time at which the output entered the band for good, if it did
    pub fn settling_time(&self) -> Option<f64> {
        self.settled.then_some(self.time)
    }
}

/// Simulated response to a test input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeResponse {
    pub input: Series,
    pub output: Series,
    pub rapidity: Rapidity,
}
