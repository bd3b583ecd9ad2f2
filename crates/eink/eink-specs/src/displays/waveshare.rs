//! Waveshare e-paper panel specifications
//!
//! Pre-configured specs for Waveshare panels based on official datasheets.

use crate::DisplaySpec;

/// Waveshare 7.5" V2 (B) (800×480, UC8179, black/white/red)
///
/// The panel the habit summary is laid out for.
/// - Two 1bpp planes: black and red, each 48 000 bytes
/// - Full refresh: ~16s (red particles are slow)
/// - No partial refresh in red mode
pub const WAVESHARE_7_5_B_V2: DisplaySpec = DisplaySpec {
    name: "Waveshare 7.5\" V2 (B)",
    width: 800,
    height: 480,
    full_refresh_ms: 16_000,
};
