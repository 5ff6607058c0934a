//! Analysis defaults

/// Relative correction below which the root finder stops iterating
pub const ROOT_TOLERANCE: f64 = 1e-6;

/// Iteration cap of the root finder
pub const ROOT_MAX_ITERATIONS: usize = 30;

/// Default lower bound of a frequency sweep (rad/s)
pub const SWEEP_W_MIN: f64 = 1e-2;

/// Default upper bound of a frequency sweep (rad/s)
pub const SWEEP_W_MAX: f64 = 1e2;

/// Default number of samples of a sweep
pub const SWEEP_POINTS: usize = 1001;

/// Default simulation step of time responses (s)
pub const SIMULATION_STEP: f64 = 1e-3;

/// Default time window of time responses (s)
pub const SIMULATION_T_MIN: f64 = 0.0;
pub const SIMULATION_T_MAX: f64 = 10.0;

/// Half-width of the settling band, relative to the asymptote
pub const SETTLING_BAND: f64 = 0.05;

/// Laplace variable used in TeX output
pub const TEX_LAPLACE_VARIABLE: char = 'p';

/// Significant digits kept in TeX output
pub const TEX_SIGNIFICANT_DIGITS: usize = 3;

/// Digits above which TeX output switches to scientific notation
pub const TEX_MAXIMUM_DIGITS: usize = 4;
