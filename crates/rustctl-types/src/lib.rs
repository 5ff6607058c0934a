//! Shared types for rustctl analyses.
//!
//! This crate defines the plain data exchanged between the engine and whatever
//! draws its results:
//! - Frequency and time response series
//! - Stability margin records
//! - Input and loop kinds
//! - Analysis settings and their defaults
//! - The compact element-setup encoding

pub mod constants;
mod element;
mod input;
mod response;
mod settings;

pub use element::*;
pub use input::*;
pub use response::*;
pub use settings::*;
