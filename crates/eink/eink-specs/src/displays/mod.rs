//! Pre-configured panel specifications

pub mod waveshare;

pub use waveshare::*;
