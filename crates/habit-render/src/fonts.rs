//! Font selection
//!
//! Fonts are monospace bitmap fonts, so there is nothing to load at runtime.
//! A config can still name a family the build does not ship; that falls back
//! to the embedded-graphics built-ins.

use embedded_graphics::mono_font::{
    ascii::{FONT_10X20, FONT_7X13, FONT_7X13_BOLD},
    MonoFont,
};
use profont::{PROFONT_12_POINT, PROFONT_14_POINT, PROFONT_24_POINT};

/// Fonts for each text role on the page
#[derive(Debug, Clone, Copy)]
pub struct FontSet {
    /// Family name
    pub family: &'static str,
    /// Month title
    pub title: &'static MonoFont<'static>,
    /// Totals line, weekday header, day numbers
    pub body: &'static MonoFont<'static>,
    /// Widget row labels
    pub label: &'static MonoFont<'static>,
    /// Widget values
    pub value: &'static MonoFont<'static>,
}

impl FontSet {
    /// ProFont at three sizes
    pub const PROFONT: Self = Self {
        family: "profont",
        title: &PROFONT_24_POINT,
        body: &PROFONT_12_POINT,
        label: &PROFONT_14_POINT,
        value: &PROFONT_12_POINT,
    };

    /// embedded-graphics ASCII fonts; always available
    pub const BUILTIN: Self = Self {
        family: "builtin",
        title: &FONT_10X20,
        body: &FONT_7X13,
        label: &FONT_7X13_BOLD,
        value: &FONT_7X13,
    };

    /// Font set for a configured family name (case-insensitive).
    ///
    /// Unknown names log a warning and use [`FontSet::BUILTIN`].
    pub fn resolve(preferred: &str) -> Self {
        let name = preferred.trim();
        if name.eq_ignore_ascii_case(Self::PROFONT.family) {
            Self::PROFONT
        } else if name.eq_ignore_ascii_case(Self::BUILTIN.family) {
            Self::BUILTIN
        } else {
            tracing::warn!(font = name, fallback = Self::BUILTIN.family, "font not available");
            Self::BUILTIN
        }
    }
}

impl Default for FontSet {
    fn default() -> Self {
        Self::PROFONT
    }
}
