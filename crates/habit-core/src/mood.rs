//! Mood level: a 0..=9 summary of the recent completion trend.
//!
//! The level is a position-weighted average of daily completion fractions
//! over the last [`MOOD_WINDOW_DAYS`] days, newest day weighted heaviest,
//! scaled to 0..=9. A stored manual override replaces it entirely.

use core::fmt;
use core::num::IntErrorKind;

use serde::{Deserialize, Serialize};

use crate::record::HabitRecord;

/// Number of most-recent days that feed the mood computation.
pub const MOOD_WINDOW_DAYS: usize = 14;

/// Mood level in `0..=9`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MoodLevel(u8);

impl MoodLevel {
    /// Lowest level.
    pub const MIN: Self = Self(0);
    /// Highest level.
    pub const MAX: Self = Self(9);

    /// Level from any integer, clamped to `0..=9`.
    pub fn saturating_from(value: i64) -> Self {
        // SAFETY: clamp bounds the value to 0..=9 which fits in u8.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self(value.clamp(0, 9) as u8)
    }

    /// Raw level.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Mouth curvature in `[-1.0, 1.0]`: `(level - 4.5) / 4.5`.
    ///
    /// Non-negative values smile, negative values frown.
    pub fn curvature(self) -> f32 {
        (f32::from(self.0) - 4.5) / 4.5
    }
}

impl TryFrom<u8> for MoodLevel {
    type Error = crate::record::HabitParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= Self::MAX.0 {
            Ok(Self(value))
        } else {
            Err(crate::record::HabitParseError::OverrideOutOfRange(i64::from(value)))
        }
    }
}

impl From<MoodLevel> for u8 {
    fn from(level: MoodLevel) -> Self {
        level.0
    }
}

impl fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Interpret a raw stored override.
///
/// Surrounding whitespace is ignored. Integers are clamped to `0..=9`,
/// including ones too large for `i64`. Anything that is not an integer
/// yields level 0.
pub fn parse_override(raw: &str) -> MoodLevel {
    match raw.trim().parse::<i64>() {
        Ok(value) => MoodLevel::saturating_from(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => MoodLevel::MAX,
            IntErrorKind::NegOverflow => MoodLevel::MIN,
            _ => {
                tracing::debug!(raw, "malformed mood override, using level 0");
                MoodLevel::MIN
            }
        },
    }
}

/// Weighted completion level of `days` (oldest first).
///
/// Only the last [`MOOD_WINDOW_DAYS`] entries are used. The entry at position
/// `i` (0-based, oldest first) gets weight `i + 1`. With `c_i` true flags per
/// day the level is `round(9 * Σ(c_i/3 · w_i) / Σ w_i)`, which reduces to
/// `round(3 · Σ(c_i · w_i) / Σ w_i)` and is evaluated exactly in integers,
/// rounding halves away from zero.
pub fn weighted_mood(days: &[HabitRecord]) -> MoodLevel {
    let skip = days.len().saturating_sub(MOOD_WINDOW_DAYS);
    let window = days.get(skip..).unwrap_or(&[]);
    if window.is_empty() {
        return MoodLevel::MIN;
    }

    let (num, den) = window
        .iter()
        .zip(1u64..)
        .fold((0u64, 0u64), |(num, den), (record, weight)| {
            let count = u64::from(record.flags.count());
            (
                num.saturating_add(count.saturating_mul(weight)),
                den.saturating_add(weight),
            )
        });

    // round(3·num / den) for non-negative values: (2·3·num + den) / (2·den)
    let scaled = num.saturating_mul(6).saturating_add(den);
    let level = scaled.checked_div(den.saturating_mul(2)).unwrap_or(0);
    MoodLevel::saturating_from(i64::try_from(level).unwrap_or(i64::MAX))
}

/// Mood level for the recent history, honouring a stored override.
///
/// When `override_value` is present the history is not consulted.
pub fn compute_mood_level(recent: &[HabitRecord], override_value: Option<&str>) -> MoodLevel {
    match override_value {
        Some(raw) => parse_override(raw),
        None => weighted_mood(recent),
    }
}
