//! Packed 1-bit planes in panel frame-buffer layout
//!
//! Rows are `(width + 7) / 8` bytes, pixels MSB-first. A set bit is
//! background (white paper), a cleared bit is ink. This is the layout the
//! UC8179 controller takes for both its black and red RAM.

use image::{GrayImage, Luma};

use crate::SplitError;

/// One monochrome ink plane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitplane {
    width: u32,
    height: u32,
    stride: usize,
    bits: Vec<u8>,
}

impl Bitplane {
    /// All-background plane
    // SAFETY: stride * height is bounded by panel size (~48 KB for 800×480).
    #[allow(clippy::arithmetic_side_effects)]
    pub fn new(width: u32, height: u32) -> Self {
        let stride = ((width as usize) + 7) / 8;
        Self {
            width,
            height,
            stride,
            bits: vec![0xFF; stride * height as usize],
        }
    }

    /// Wrap bytes already in panel layout.
    // SAFETY: stride * height is bounded by panel size.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn from_panel_bytes(width: u32, height: u32, bits: Vec<u8>) -> Result<Self, SplitError> {
        let stride = ((width as usize) + 7) / 8;
        let expected = stride * height as usize;
        if bits.len() != expected {
            return Err(SplitError::BufferLength {
                expected,
                found: bits.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            bits,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.stride
    }

    // SAFETY: callers bounds-check x/y first; index < stride * height.
    #[allow(clippy::arithmetic_side_effects)]
    fn locate(&self, x: u32, y: u32) -> Option<(usize, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let byte = y as usize * self.stride + x as usize / 8;
        let mask = 0x80u8 >> (x % 8);
        Some((byte, mask))
    }

    /// Mark a pixel as ink (`true`) or background (`false`). Out of range is ignored.
    pub fn set(&mut self, x: u32, y: u32, ink: bool) {
        if let Some((byte, mask)) = self.locate(x, y) {
            if let Some(b) = self.bits.get_mut(byte) {
                if ink {
                    *b &= !mask;
                } else {
                    *b |= mask;
                }
            }
        }
    }

    /// `Some(true)` for ink, `None` outside the plane
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        let (byte, mask) = self.locate(x, y)?;
        self.bits.get(byte).map(|b| b & mask == 0)
    }

    /// Number of ink pixels
    pub fn ink_count(&self) -> usize {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.get(x, y) == Some(true))
            .count()
    }

    /// Packed bytes ready for the controller
    pub fn as_panel_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// Owned copy of the packed bytes
    pub fn to_panel_bytes(&self) -> Vec<u8> {
        self.bits.clone()
    }

    /// Black-on-white preview of the plane
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| match self.get(x, y) {
            Some(true) => Luma([0]),
            _ => Luma([255]),
        })
    }
}
