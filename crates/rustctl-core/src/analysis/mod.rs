//! Frequency and time domain analyses of a transfer function

pub mod asymptotic;
pub mod frequency;
pub mod margins;
pub mod time;

pub use asymptotic::{asymptotic_changes, asymptotic_polar_response, AsymptoticModel};
pub use frequency::{unwrap_phase, FrequencyResponseCalculator};
pub use margins::{gain_margin, phase_margin};
pub use time::TimeResponseCalculator;
