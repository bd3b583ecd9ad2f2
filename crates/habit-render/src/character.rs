//! Rotating character illustration
//!
//! One character is shown per calendar quarter. The catalog order and the
//! rotation anchor are fixed so that a given date always renders the same
//! character; changing either bumps [`CATALOG_VERSION`].
//!
//! The default character is a face drawn on the fly whose mouth follows the
//! mood level. The others are vector drawings cached as PNG assets (see
//! [`crate::assets`]).

use core::fmt;

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{
        Circle, Ellipse, Line, Polyline, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle,
        RoundedRectangle, Triangle,
    },
};
use habit_core::{CalendarDate, MoodLevel};

use crate::layout::Bounds;
use crate::Palette;

/// Bumped whenever the catalog order, the anchor or an asset drawing changes
pub const CATALOG_VERSION: u32 = 1;

/// Year of the rotation anchor
pub const ANCHOR_YEAR: i32 = 2026;

/// Zero-based quarter of the rotation anchor (Q1)
pub const ANCHOR_QUARTER: u8 = 0;

/// Points on the mouth curve
pub const MOUTH_POINTS: usize = 9;

/// How a character gets onto the page
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Illustration {
    /// Drawn at render time from the mood level
    Procedural,
    /// Pre-drawn PNG in the asset directory
    Asset {
        /// File name inside the asset directory
        file: &'static str,
    },
}

/// Catalog entries, in rotation order
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Character {
    /// Mood face (default)
    Smiley,
    /// Cat
    Cat,
    /// Owl
    Owl,
    /// Robot
    Robot,
}

impl Character {
    /// Rotation order
    pub const CATALOG: [Character; 4] = [
        Character::Smiley,
        Character::Cat,
        Character::Owl,
        Character::Robot,
    ];

    /// Entry used when an asset cannot be shown
    pub const DEFAULT: Character = Character::Smiley;

    /// Stable key
    pub const fn key(self) -> &'static str {
        match self {
            Character::Smiley => "smiley",
            Character::Cat => "cat",
            Character::Owl => "owl",
            Character::Robot => "robot",
        }
    }

    /// Where the picture comes from
    pub const fn illustration(self) -> Illustration {
        match self {
            Character::Smiley => Illustration::Procedural,
            Character::Cat => Illustration::Asset { file: "cat.png" },
            Character::Owl => Illustration::Asset { file: "owl.png" },
            Character::Robot => Illustration::Asset { file: "robot.png" },
        }
    }

    /// Entries that live in the asset directory
    pub fn assets() -> impl Iterator<Item = (Character, &'static str)> {
        Self::CATALOG
            .into_iter()
            .filter_map(|c| match c.illustration() {
                Illustration::Asset { file } => Some((c, file)),
                Illustration::Procedural => None,
            })
    }

    /// Character shown on `date`
    pub fn for_date(date: CalendarDate) -> Character {
        Self::CATALOG
            .get(rotation_index(date))
            .copied()
            .unwrap_or(Self::DEFAULT)
    }

    /// Draw the vector version of this character into `bounds`.
    ///
    /// The procedural face is drawn with a neutral mood here; use
    /// [`draw_face`] to pass a real mood.
    pub fn draw<D>(self, display: &mut D, bounds: Bounds, palette: Palette) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        match self {
            Character::Smiley => draw_face(display, bounds, MoodLevel::saturating_from(5), palette),
            Character::Cat => draw_cat(display, bounds, palette),
            Character::Owl => draw_owl(display, bounds, palette),
            Character::Robot => draw_robot(display, bounds, palette),
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Signed number of quarters from the anchor to `date`
// SAFETY: years are bounded to 1..=9999 so the product stays tiny.
#[allow(clippy::arithmetic_side_effects)]
pub fn quarters_elapsed(date: CalendarDate) -> i64 {
    (i64::from(date.year()) - i64::from(ANCHOR_YEAR)) * 4
        + (i64::from(date.quarter()) - i64::from(ANCHOR_QUARTER))
}

/// Catalog index for `date`, always in `0..CATALOG.len()`
// SAFETY: rem_euclid by the non-zero catalog length yields 0..len.
#[allow(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
pub fn rotation_index(date: CalendarDate) -> usize {
    quarters_elapsed(date).rem_euclid(Character::CATALOG.len() as i64) as usize
}

/// Mouth polyline for a face.
///
/// The curve spans `center.x ± half_width`. Its middle sags by
/// `curvature * max_sag` pixels below the corners: down for a smile
/// (curvature ≥ 0), up for a frown.
// SAFETY: all values are small face-sized offsets; the float→int casts are
// of values bounded by half_width and max_sag.
#[allow(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
pub fn mouth_curve(center: Point, half_width: i32, max_sag: i32, mood: MoodLevel) -> [Point; MOUTH_POINTS] {
    let sag = mood.curvature() * max_sag as f32;
    let last = (MOUTH_POINTS - 1) as f32;
    core::array::from_fn(|i| {
        let t = 2.0 * i as f32 / last - 1.0;
        let x = center.x + (t * half_width as f32).round() as i32;
        let y = center.y + (sag * (1.0 - t * t)).round() as i32;
        Point::new(x, y)
    })
}

// SAFETY: bounds are a fixed 56 px box; halves and sixths stay inside it.
#[allow(clippy::arithmetic_side_effects)]
fn face_metrics(bounds: Bounds) -> (Point, i32) {
    let size = (bounds.x1 - bounds.x0).min(bounds.y1 - bounds.y0) + 1;
    let center = Point::new(bounds.x0 + size / 2, bounds.y0 + size / 2);
    (center, size)
}

fn diameter(value: i32) -> u32 {
    u32::try_from(value.max(1)).unwrap_or(1)
}

/// Procedural mood face
// SAFETY: face-sized offsets inside `bounds`.
#[allow(clippy::arithmetic_side_effects)]
pub fn draw_face<D>(display: &mut D, bounds: Bounds, mood: MoodLevel, palette: Palette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let (center, size) = face_metrics(bounds);
    let ink = PrimitiveStyle::with_fill(palette.black);

    Circle::with_center(center, diameter(size - 4))
        .into_styled(PrimitiveStyle::with_stroke(palette.black, 2))
        .draw(display)?;

    let eye_dx = size / 6;
    let eye_y = center.y - size / 8;
    for dx in [-eye_dx, eye_dx] {
        Circle::with_center(Point::new(center.x + dx, eye_y), diameter((size / 10).max(3)))
            .into_styled(ink)
            .draw(display)?;
    }

    if mood >= MoodLevel::saturating_from(7) {
        for dx in [-size / 4, size / 4] {
            Circle::with_center(Point::new(center.x + dx, center.y + size / 12), diameter(size / 9))
                .into_styled(PrimitiveStyle::with_fill(palette.red))
                .draw(display)?;
        }
    }

    let mouth = mouth_curve(
        Point::new(center.x, center.y + size / 6),
        size / 4,
        size / 8,
        mood,
    );
    Polyline::new(&mouth)
        .into_styled(PrimitiveStyle::with_stroke(palette.black, 2))
        .draw(display)?;
    Ok(())
}

// SAFETY: face-sized offsets inside `bounds`.
#[allow(clippy::arithmetic_side_effects)]
fn draw_cat<D>(display: &mut D, bounds: Bounds, palette: Palette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let (c, size) = face_metrics(bounds);
    let ink = PrimitiveStyle::with_fill(palette.black);
    let line = PrimitiveStyle::with_stroke(palette.black, 1);
    let r = size / 3;

    for side in [-1, 1] {
        Triangle::new(
            Point::new(c.x + side * (r - 2), c.y - r / 2),
            Point::new(c.x + side * r, c.y - r - r / 2),
            Point::new(c.x + side * (r / 4), c.y - r + 2),
        )
        .into_styled(ink)
        .draw(display)?;
    }
    Circle::with_center(Point::new(c.x, c.y + 2), diameter(2 * r))
        .into_styled(PrimitiveStyle::with_stroke(palette.black, 2))
        .draw(display)?;

    for side in [-1, 1] {
        Ellipse::with_center(Point::new(c.x + side * r / 2, c.y - 2), Size::new(4, 7))
            .into_styled(ink)
            .draw(display)?;
        for dy in [-2, 2] {
            Line::new(
                Point::new(c.x + side * 4, c.y + 6),
                Point::new(c.x + side * (r + 6), c.y + 6 + dy * 2),
            )
            .into_styled(line)
            .draw(display)?;
        }
    }
    Triangle::new(
        Point::new(c.x - 3, c.y + 3),
        Point::new(c.x + 3, c.y + 3),
        Point::new(c.x, c.y + 6),
    )
    .into_styled(PrimitiveStyle::with_fill(palette.red))
    .draw(display)?;
    Ok(())
}

// SAFETY: face-sized offsets inside `bounds`.
#[allow(clippy::arithmetic_side_effects)]
fn draw_owl<D>(display: &mut D, bounds: Bounds, palette: Palette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let (c, size) = face_metrics(bounds);
    let body = Size::new(diameter(size * 2 / 3), diameter(size - 6));
    Ellipse::with_center(c, body)
        .into_styled(PrimitiveStyle::with_stroke(palette.black, 2))
        .draw(display)?;

    let eye = size / 5;
    for side in [-1, 1] {
        let at = Point::new(c.x + side * (eye / 2 + 3), c.y - size / 8);
        Circle::with_center(at, diameter(eye + 4))
            .into_styled(
                PrimitiveStyleBuilder::new()
                    .stroke_color(palette.black)
                    .stroke_width(2)
                    .fill_color(palette.white)
                    .build(),
            )
            .draw(display)?;
        Circle::with_center(at, diameter(eye / 2))
            .into_styled(PrimitiveStyle::with_fill(palette.black))
            .draw(display)?;
        Line::new(
            Point::new(c.x + side * 2, c.y - size / 3),
            Point::new(c.x + side * (eye + 4), c.y - size / 3 - 5),
        )
        .into_styled(PrimitiveStyle::with_stroke(palette.black, 2))
        .draw(display)?;
    }

    Triangle::new(
        Point::new(c.x - 3, c.y),
        Point::new(c.x + 3, c.y),
        Point::new(c.x, c.y + 6),
    )
    .into_styled(PrimitiveStyle::with_fill(palette.red))
    .draw(display)?;

    for i in 0..3 {
        let y = c.y + size / 6 + i * 5;
        Line::new(Point::new(c.x - 6, y), Point::new(c.x + 6, y))
            .into_styled(PrimitiveStyle::with_stroke(palette.black, 1))
            .draw(display)?;
    }
    Ok(())
}

// SAFETY: face-sized offsets inside `bounds`.
#[allow(clippy::arithmetic_side_effects)]
fn draw_robot<D>(display: &mut D, bounds: Bounds, palette: Palette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let (c, size) = face_metrics(bounds);
    let half = size / 3;
    let head = Rectangle::with_corners(
        Point::new(c.x - half, c.y - half + 6),
        Point::new(c.x + half, c.y + half + 4),
    );
    RoundedRectangle::with_equal_corners(head, Size::new(6, 6))
        .into_styled(PrimitiveStyle::with_stroke(palette.black, 2))
        .draw(display)?;

    let top = c.y - half + 6;
    Line::new(Point::new(c.x, top), Point::new(c.x, top - 8))
        .into_styled(PrimitiveStyle::with_stroke(palette.black, 2))
        .draw(display)?;
    Circle::with_center(Point::new(c.x, top - 10), 6)
        .into_styled(PrimitiveStyle::with_fill(palette.red))
        .draw(display)?;

    for side in [-1, 1] {
        let eye = Point::new(c.x + side * half / 2, c.y);
        Rectangle::with_center(eye, Size::new(6, 6))
            .into_styled(PrimitiveStyle::with_fill(palette.black))
            .draw(display)?;
    }

    let mouth_y = c.y + half / 2 + 3;
    Rectangle::with_corners(
        Point::new(c.x - half / 2, mouth_y),
        Point::new(c.x + half / 2, mouth_y + 4),
    )
    .into_styled(PrimitiveStyle::with_stroke(palette.black, 1))
    .draw(display)?;
    for i in 1..4 {
        let x = c.x - half / 2 + i * half / 4;
        Line::new(Point::new(x, mouth_y), Point::new(x, mouth_y + 4))
            .into_styled(PrimitiveStyle::with_stroke(palette.black, 1))
            .draw(display)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::canvas::{infallible, RgbCanvas};

    fn date(y: i32, m: u8, d: u8) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn test_anchor_quarter_is_default() {
        assert_eq!(rotation_index(date(2026, 1, 1)), 0);
        assert_eq!(Character::for_date(date(2026, 3, 31)), Character::Smiley);
        assert_eq!(Character::for_date(date(2026, 4, 1)), Character::Cat);
        assert_eq!(Character::for_date(date(2026, 10, 18)), Character::Robot);
    }

    #[test]
    fn test_dates_before_anchor_wrap() {
        // 2025 Q4 is one quarter before the anchor.
        assert_eq!(quarters_elapsed(date(2025, 12, 31)), -1);
        assert_eq!(rotation_index(date(2025, 12, 31)), 3);
        assert_eq!(rotation_index(date(2024, 1, 1)), 0);
    }

    #[test]
    fn test_catalog_assets() {
        let files: Vec<_> = Character::assets().map(|(_, f)| f).collect();
        assert_eq!(files, ["cat.png", "owl.png", "robot.png"]);
        assert_eq!(Character::DEFAULT.illustration(), Illustration::Procedural);
    }

    #[test]
    fn test_mouth_direction_follows_mood() {
        let center = Point::new(28, 40);
        let smile = mouth_curve(center, 14, 7, MoodLevel::MAX);
        assert_eq!(smile[0], Point::new(14, 40));
        assert_eq!(smile[8], Point::new(42, 40));
        assert_eq!(smile[4], Point::new(28, 47));

        let frown = mouth_curve(center, 14, 7, MoodLevel::MIN);
        assert_eq!(frown[4], Point::new(28, 33));

        // 4 is a slight frown, 5 a slight smile
        assert!(mouth_curve(center, 14, 7, MoodLevel::saturating_from(4))[4].y < 40);
        assert!(mouth_curve(center, 14, 7, MoodLevel::saturating_from(5))[4].y > 40);
    }

    #[test]
    fn test_sag_is_monotonic_in_mood() {
        let center = Point::new(0, 0);
        let sags: Vec<i32> = (0..=9)
            .map(|m| mouth_curve(center, 14, 7, MoodLevel::saturating_from(m))[4].y)
            .collect();
        assert!(sags.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_every_character_draws_inside_its_box() {
        let bounds = Bounds {
            x0: 10,
            y0: 10,
            x1: 65,
            y1: 65,
        };
        for character in Character::CATALOG {
            let mut canvas = RgbCanvas::new(80, 80, Rgb888::WHITE);
            infallible(character.draw(&mut canvas, bounds, Palette::DEFAULT));
            let mut inked = 0;
            for y in 0..80u32 {
                for x in 0..80u32 {
                    if canvas.pixel(x, y) != Some(Rgb888::WHITE) {
                        inked += 1;
                        assert!(
                            bounds.contains(x as i32, y as i32),
                            "{character} leaked to ({x}, {y})"
                        );
                    }
                }
            }
            assert!(inked > 50, "{character} drew only {inked} pixels");
        }
    }
}
