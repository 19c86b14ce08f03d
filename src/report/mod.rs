//! Dashboard rendering modules.

pub mod charts;
pub mod generator;

pub use generator::*;
