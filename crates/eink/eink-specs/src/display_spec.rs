//! Panel specification types
//!
//! Defines the characteristics of an e-paper panel that the rendering and
//! plane-splitting stages depend on.

use core::time::Duration;

/// Complete specification of a black/white/red e-paper panel
///
/// Contains everything the habit pipeline needs to target a panel:
/// - Physical resolution
/// - Frame-buffer layout of each of its two planes (black and red)
/// - Full-refresh timing (informational, used in logs by sinks)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DisplaySpec {
    /// Panel name (e.g., "Waveshare 7.5\" V2 (B)")
    pub name: &'static str,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Full refresh duration in milliseconds
    pub full_refresh_ms: u32,
}

impl DisplaySpec {
    /// Bytes per frame-buffer row: one bit per pixel, rows padded to a byte.
    // SAFETY: width is a panel dimension (<= a few thousand px); +7 cannot overflow u32.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn bytes_per_row(&self) -> usize {
        ((self.width + 7) / 8) as usize
    }

    /// Bytes in one packed plane. A frame is two of them.
    // SAFETY: bytes_per_row * height is bounded by panel size (~48 KB for 800×480).
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn plane_len(&self) -> usize {
        self.bytes_per_row() * self.height as usize
    }

    /// Get full refresh duration as Duration
    pub fn full_refresh_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.full_refresh_ms))
    }

    /// Check whether a canvas of `width`×`height` maps 1:1 onto this panel.
    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_spec() -> DisplaySpec {
        DisplaySpec {
            name: "Test Display",
            width: 250,
            height: 122,
            full_refresh_ms: 2000,
        }
    }

    #[test]
    fn test_bytes_per_row_pads_partial_byte() {
        let spec = test_spec();
        // 250 px = 31 full bytes + 2 px
        assert_eq!(spec.bytes_per_row(), 32);
        assert_eq!(spec.plane_len(), 32 * 122);
    }

    #[test]
    fn test_refresh_duration() {
        assert_eq!(test_spec().full_refresh_duration(), Duration::from_secs(2));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serializes_geometry() {
        let json = serde_json::to_value(test_spec()).unwrap();
        assert_eq!(json.get("width"), Some(&serde_json::json!(250)));
        assert_eq!(json.get("name"), Some(&serde_json::json!("Test Display")));
    }

    #[test]
    fn test_matches() {
        let spec = test_spec();
        assert!(spec.matches(250, 122));
        assert!(!spec.matches(122, 250));
    }
}
