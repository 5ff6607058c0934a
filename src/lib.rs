//! rustctl - Transfer-function analysis of control-element chains
//!
//! Builds the transfer function of a chain of elementary blocks (lags, PID
//! controllers, integrators, lead compensators) and draws from it the
//! classic control-design views: Bode, Nyquist and Black-Nichols responses,
//! stability margins, straight-line asymptotes and simulated responses to
//! standard inputs.
//!
//! # Architecture
//!
//! - `rustctl-types` - plain serde data (responses, margins, settings)
//! - `rustctl-core` - polynomials, transfer functions and analyses
//! - this crate - a facade over both plus [`AnalysisReport`]
//!
//! # Example
//!
//! ```rust
//! use rustctl::prelude::*;
//!
//! let setup = ElementSetup::from_json(r#"[["PI", 1.0, 1.0], ["1", 2.0, 0.5]]"#).unwrap();
//! let chain = SimpleElements::from_setup(&setup).unwrap();
//!
//! let report = AnalysisReport::new(&chain, &AnalysisSettings::default(), InputType::Step).unwrap();
//! assert!(report.gain_margin.is_none());
//! assert!(report.settling_time.is_some());
//! ```

pub mod report;

pub use report::AnalysisReport;
pub use rustctl_core::*;
pub use rustctl_types as types;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::report::AnalysisReport;
    pub use rustctl_core::prelude::*;
}
