//! RGB → black/red plane classification

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::{Bitplane, SplitError};

/// Ink a single pixel resolves to
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InkColor {
    /// Bare paper
    White,
    /// Black particles
    Black,
    /// Red particles
    Red,
}

/// Classification thresholds
///
/// A pixel is red when `R > red_threshold` and R exceeds both G and B by more
/// than `red_delta`. Otherwise it is black when its perceived brightness
/// `(299R + 587G + 114B) / 1000` is below `black_threshold`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitThresholds {
    /// Minimum red channel for red ink
    pub red_threshold: u8,
    /// How far red must exceed green and blue
    pub red_delta: u8,
    /// Brightness below which a pixel becomes black ink
    pub black_threshold: u8,
}

impl SplitThresholds {
    /// Defaults: 150 / 40 / 200
    pub const DEFAULT: Self = Self {
        red_threshold: 150,
        red_delta: 40,
        black_threshold: 200,
    };

    /// Classify one RGB pixel.
    ///
    /// Red wins over black, so a pixel is ink in at most one plane.
    pub fn classify(&self, [r, g, b]: [u8; 3]) -> InkColor {
        let (r, g, b) = (u32::from(r), u32::from(g), u32::from(b));
        let delta = u32::from(self.red_delta);
        let is_red = r > u32::from(self.red_threshold)
            && r > g.saturating_add(delta)
            && r > b.saturating_add(delta);
        if is_red {
            return InkColor::Red;
        }
        if luminance(r, g, b) < u32::from(self.black_threshold) {
            InkColor::Black
        } else {
            InkColor::White
        }
    }
}

impl Default for SplitThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// `floor(0.299R + 0.587G + 0.114B)` in integers.
// SAFETY: max is (299 + 587 + 114) * 255 = 255_000, far inside u32.
#[allow(clippy::arithmetic_side_effects)]
fn luminance(r: u32, g: u32, b: u32) -> u32 {
    (299 * r + 587 * g + 114 * b) / 1000
}

/// Matching black and red planes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanePair {
    /// Black ink plane
    pub black: Bitplane,
    /// Red ink plane
    pub red: Bitplane,
}

impl PlanePair {
    /// Pair two planes of equal size.
    pub fn new(black: Bitplane, red: Bitplane) -> Result<Self, SplitError> {
        if black.dimensions() != red.dimensions() {
            return Err(SplitError::PlaneMismatch {
                black: black.dimensions(),
                red: red.dimensions(),
            });
        }
        Ok(Self { black, red })
    }

    /// `(width, height)` shared by both planes
    pub fn dimensions(&self) -> (u32, u32) {
        self.black.dimensions()
    }

    /// Ink colour of one pixel as the panel will show it.
    pub fn ink_at(&self, x: u32, y: u32) -> Option<InkColor> {
        let black = self.black.get(x, y)?;
        let red = self.red.get(x, y)?;
        Some(match (black, red) {
            (_, true) => InkColor::Red,
            (true, false) => InkColor::Black,
            (false, false) => InkColor::White,
        })
    }
}

/// Split an RGB frame into black and red planes.
///
/// Both planes have exactly the frame's dimensions, including zero-sized
/// frames.
pub fn split_black_red(image: &RgbImage, thresholds: &SplitThresholds) -> Result<PlanePair, SplitError> {
    let (width, height) = image.dimensions();
    let mut black = Bitplane::new(width, height);
    let mut red = Bitplane::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels() {
        match thresholds.classify(pixel.0) {
            InkColor::Red => red.set(x, y, true),
            InkColor::Black => black.set(x, y, true),
            InkColor::White => {}
        }
    }

    tracing::debug!(
        width,
        height,
        black_ink = black.ink_count(),
        red_ink = red.ink_count(),
        "split frame into planes"
    );
    PlanePair::new(black, red)
}
