//! Renderer configuration

use std::borrow::Cow;

use eink_specs::{displays::WAVESHARE_7_5_B_V2, DisplaySpec};
use embedded_graphics::pixelcolor::Rgb888;
use serde::{Deserialize, Serialize};

/// Canvas geometry, palette and font preference.
///
/// Missing JSON fields fall back to [`RenderConfig::DEFAULT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Outer margin in pixels
    pub margin: u32,
    /// Red ink
    pub red: [u8; 3],
    /// Black ink
    pub black: [u8; 3],
    /// Paper
    pub white: [u8; 3],
    /// Font family name; unknown names fall back to the built-in fonts
    pub preferred_font: Cow<'static, str>,
}

impl RenderConfig {
    /// 800×480 (Waveshare 7.5" B), margin 20, red (200, 0, 0), ProFont
    pub const DEFAULT: Self = Self {
        width: WAVESHARE_7_5_B_V2.width,
        height: WAVESHARE_7_5_B_V2.height,
        margin: 20,
        red: [200, 0, 0],
        black: [0, 0, 0],
        white: [255, 255, 255],
        preferred_font: Cow::Borrowed("profont"),
    };

    /// Default config sized for `panel`
    pub fn for_panel(panel: &DisplaySpec) -> Self {
        Self {
            width: panel.width,
            height: panel.height,
            ..Self::DEFAULT
        }
    }

    /// Palette as drawing colours
    pub fn palette(&self) -> Palette {
        let [r, g, b] = self.red;
        let red = Rgb888::new(r, g, b);
        let [r, g, b] = self.black;
        let black = Rgb888::new(r, g, b);
        let [r, g, b] = self.white;
        let white = Rgb888::new(r, g, b);
        Palette { black, red, white }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The three colours a two-colour panel can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Black ink
    pub black: Rgb888,
    /// Red ink
    pub red: Rgb888,
    /// Paper
    pub white: Rgb888,
}

impl Palette {
    /// Palette of [`RenderConfig::DEFAULT`]
    pub const DEFAULT: Self = Self {
        black: Rgb888::new(0, 0, 0),
        red: Rgb888::new(200, 0, 0),
        white: Rgb888::new(255, 255, 255),
    };

    /// Carry `color` drawn in `from` over to this palette. Colours outside
    /// `from` pass through.
    pub fn translate(&self, from: &Palette, color: Rgb888) -> Rgb888 {
        if color == from.red {
            self.red
        } else if color == from.black {
            self.black
        } else if color == from.white {
            self.white
        } else {
            color
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_panel() {
        let cfg = RenderConfig::default();
        assert_eq!((cfg.width, cfg.height, cfg.margin), (800, 480, 20));
        assert_eq!(cfg.palette(), Palette::DEFAULT);

        let bench = DisplaySpec {
            name: "Bench Panel",
            width: 640,
            height: 384,
            full_refresh_ms: 12_000,
        };
        let cfg = RenderConfig::for_panel(&bench);
        assert_eq!((cfg.width, cfg.height, cfg.margin), (640, 384, 20));
    }

    #[test]
    fn test_translate_between_palettes() {
        let custom = RenderConfig {
            red: [230, 20, 20],
            ..RenderConfig::DEFAULT
        }
        .palette();
        let from = Palette::DEFAULT;
        assert_eq!(custom.translate(&from, from.red), Rgb888::new(230, 20, 20));
        assert_eq!(custom.translate(&from, from.black), from.black);
        assert_eq!(custom.translate(&from, Rgb888::new(1, 2, 3)), Rgb888::new(1, 2, 3));
    }

    #[test]
    fn test_partial_json_overrides_fields() {
        let cfg: RenderConfig =
            serde_json::from_str(r#"{"margin": 12, "preferred_font": "builtin"}"#).unwrap();
        assert_eq!(cfg.margin, 12);
        assert_eq!(cfg.width, 800);
        assert_eq!(cfg.red, [200, 0, 0]);
        assert_eq!(cfg.preferred_font, "builtin");
    }
}
