//! Habit glyphs drawn along the bottom of each day cell
//!
//! Each habit has its own glyph so the three stay distinguishable on a
//! two-colour panel:
//! - read: three black dots
//! - journal: red diagonal hatching
//! - workout: black-outlined checkerboard
//!
//! Every glyph is clipped to its slot.

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle},
};
use habit_core::HabitKind;

use crate::layout::Bounds;
use crate::Palette;

/// Glyph for one habit
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HabitIcon {
    kind: HabitKind,
    palette: Palette,
}

impl HabitIcon {
    /// Glyph for `kind` in the default palette
    pub fn new(kind: HabitKind) -> Self {
        Self {
            kind,
            palette: Palette::DEFAULT,
        }
    }

    /// Use a custom palette
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Habit this glyph stands for
    pub fn kind(&self) -> HabitKind {
        self.kind
    }

    /// Draw into `slot`; nothing lands outside it.
    pub fn render<D>(&self, display: &mut D, slot: Bounds) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let mut clipped = display.clipped(&slot.rectangle());
        match self.kind {
            HabitKind::Read => self.render_dots(&mut clipped, slot),
            HabitKind::Journal => self.render_slashes(&mut clipped, slot),
            HabitKind::Workout => self.render_checker(&mut clipped, slot),
        }
    }

    // SAFETY: slot dimensions are a quarter of a cell; all sums stay on-canvas.
    #[allow(clippy::arithmetic_side_effects)]
    fn render_dots<D>(&self, display: &mut D, slot: Bounds) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let (w, h) = (slot.x1 - slot.x0, slot.y1 - slot.y0);
        let radius = (w.min(h) / 7).max(2);
        let diameter = u32::try_from(2 * radius + 1).unwrap_or(5);
        let cy = slot.y0 + h / 2;
        for cx in [slot.x0 + w / 5, slot.x0 + w / 2, slot.x0 + w * 4 / 5] {
            Circle::with_center(Point::new(cx, cy), diameter)
                .into_styled(PrimitiveStyle::with_fill(self.palette.black))
                .draw(display)?;
        }
        Ok(())
    }

    // SAFETY: bounded loop over slot-sized offsets.
    #[allow(clippy::arithmetic_side_effects)]
    fn render_slashes<D>(&self, display: &mut D, slot: Bounds) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let (w, h) = (slot.x1 - slot.x0, slot.y1 - slot.y0);
        let step = usize::try_from((w / 4).max(4)).unwrap_or(4);
        let style = PrimitiveStyle::with_stroke(self.palette.red, 2);
        for i in (-h..w + h).step_by(step) {
            Line::new(
                Point::new(slot.x0 + i, slot.y0 + h),
                Point::new(slot.x0 + i + h, slot.y0),
            )
            .into_styled(style)
            .draw(display)?;
        }
        Ok(())
    }

    // SAFETY: bounded loop over a 4×3 grid inside the slot.
    #[allow(clippy::arithmetic_side_effects)]
    fn render_checker<D>(&self, display: &mut D, slot: Bounds) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        const COLS: i32 = 4;
        const ROWS: i32 = 3;

        slot.rectangle()
            .into_styled(PrimitiveStyle::with_stroke(self.palette.black, 1))
            .draw(display)?;

        let (w, h) = (slot.x1 - slot.x0, slot.y1 - slot.y0);
        let cell_w = (w / COLS).max(2);
        let cell_h = (h / ROWS).max(2);
        let fill = PrimitiveStyle::with_fill(self.palette.black);
        for r in 0..ROWS {
            for c in 0..COLS {
                if (r + c) % 2 != 0 {
                    continue;
                }
                let x0 = slot.x0 + c * cell_w + 1;
                let y0 = slot.y0 + r * cell_h + 1;
                let x1 = (slot.x0 + (c + 1) * cell_w - 1).min(slot.x1 - 1);
                let y1 = (slot.y0 + (r + 1) * cell_h - 1).min(slot.y1 - 1);
                if x1 > x0 && y1 > y0 {
                    Rectangle::with_corners(Point::new(x0, y0), Point::new(x1, y1))
                        .into_styled(fill)
                        .draw(display)?;
                }
            }
        }
        Ok(())
    }
}
