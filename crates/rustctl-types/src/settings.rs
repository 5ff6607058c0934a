//! Analysis settings types.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Durand-Kerner root finder configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootSettings {
    /// Largest relative correction accepted as converged
    pub tolerance: f64,

    /// Iteration cap
    pub max_iterations: usize,

    /// Fail instead of returning the last iterate when the cap is hit
    pub require_convergence: bool,
}

impl Default for RootSettings {
    fn default() -> Self {
        Self {
            tolerance: ROOT_TOLERANCE,
            max_iterations: ROOT_MAX_ITERATIONS,
            require_convergence: false,
        }
    }
}

/// Logarithmic frequency sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencySweep {
    pub w_min: f64,
    pub w_max: f64,
    pub nb_points: usize,
}

impl Default for FrequencySweep {
    fn default() -> Self {
        Self {
            w_min: SWEEP_W_MIN,
            w_max: SWEEP_W_MAX,
            nb_points: SWEEP_POINTS,
        }
    }
}

/// Time window and resolution of a simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSweep {
    pub t_min: f64,
    pub t_max: f64,

    /// Upper bound of the integration step; the effective step never
    /// exceeds the display resolution
    pub dt: f64,

    pub nb_points: usize,
}

impl Default for TimeSweep {
    fn default() -> Self {
        Self {
            t_min: SIMULATION_T_MIN,
            t_max: SIMULATION_T_MAX,
            dt: SIMULATION_STEP,
            nb_points: SWEEP_POINTS,
        }
    }
}

/// TeX rendering options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TexSettings {
    pub laplace_variable: char,
    pub maximum_significant_digits: usize,
    pub maximum_digits: usize,
}

impl Default for TexSettings {
    fn default() -> Self {
        Self {
            laplace_variable: TEX_LAPLACE_VARIABLE,
            maximum_significant_digits: TEX_SIGNIFICANT_DIGITS,
            maximum_digits: TEX_MAXIMUM_DIGITS,
        }
    }
}

/// Everything an analysis front-end needs to configure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub roots: RootSettings,
    pub frequency: FrequencySweep,
    pub time: TimeSweep,
    pub tex: TexSettings,

    /// Half-width of the settling band around the asymptote
    pub settling_band: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            roots: RootSettings::default(),
            frequency: FrequencySweep::default(),
            time: TimeSweep::default(),
            tex: TexSettings::default(),
            settling_band: SETTLING_BAND,
        }
    }
}

impl AnalysisSettings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
