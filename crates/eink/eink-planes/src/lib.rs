//! Black/red bit-planes for two-colour e-paper
//!
//! A two-colour panel has no notion of RGB. It takes one packed 1-bit plane
//! per ink: black and red. This crate classifies every pixel of a rendered
//! RGB frame into exactly one of white, black or red and packs the result in
//! controller layout.
//!
//! # Example
//!
//! ```
//! use eink_planes::{split_black_red, InkColor, SplitThresholds};
//! use image::{Rgb, RgbImage};
//!
//! let mut frame = RgbImage::from_pixel(16, 2, Rgb([255, 255, 255]));
//! frame.put_pixel(0, 0, Rgb([200, 0, 0]));
//! frame.put_pixel(1, 0, Rgb([0, 0, 0]));
//!
//! let planes = split_black_red(&frame, &SplitThresholds::DEFAULT).unwrap();
//! assert_eq!(planes.ink_at(0, 0), Some(InkColor::Red));
//! assert_eq!(planes.ink_at(1, 0), Some(InkColor::Black));
//! assert_eq!(planes.black.to_panel_bytes(), vec![0b1011_1111, 0xFF, 0xFF, 0xFF]);
//! ```

mod bitplane;
mod sink;
mod split;

pub use bitplane::Bitplane;
pub use sink::{NullSink, PlaneSink, PngPlaneSink, SinkError};
pub use split::{split_black_red, InkColor, PlanePair, SplitThresholds};

use thiserror::Error;

/// Plane construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// Black and red planes differ in size
    #[error("black plane {}x{} and red plane {}x{} differ in size", .black.0, .black.1, .red.0, .red.1)]
    PlaneMismatch {
        /// Black plane size
        black: (u32, u32),
        /// Red plane size
        red: (u32, u32),
    },
    /// Packed buffer has the wrong length
    #[error("packed plane needs {expected} bytes, got {found}")]
    BufferLength {
        /// Bytes the dimensions require
        expected: usize,
        /// Bytes supplied
        found: usize,
    },
}
