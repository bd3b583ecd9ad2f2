//! Page geometry
//!
//! Every position on the page is derived here with integer arithmetic from
//! the canvas size, the margin and the number of week rows. Drawing code
//! never computes coordinates of its own.

use embedded_graphics::{prelude::*, primitives::Rectangle};
use habit_core::calendar::{month_weeks, Week, MAX_WEEKS};
use habit_core::HabitKind;

use crate::{RenderConfig, RenderError};

/// Height of the weekday-name row above the grid
pub const HEADER_HEIGHT: i32 = 24;
/// Gap between the month title and the totals line
pub const TOTALS_OFFSET: i32 = 36;
/// Grid starts this far below the top margin
pub const GRID_OFFSET: i32 = 80;
/// Status widget width, measured from the right canvas edge
pub const WIDGET_INSET: i32 = 260;
/// Status widget height
pub const WIDGET_HEIGHT: i32 = 52;
/// Widget divider / second row offset
pub const WIDGET_ROW: i32 = 24;
/// Character illustration edge length
pub const CHARACTER_SIZE: u32 = 56;
/// Gap between the character box and the widget
pub const CHARACTER_GAP: i32 = 12;
/// Horizontal gap between icon slots
pub const ICON_GUTTER: i32 = 8;

/// Inclusive pixel box `(x0, y0) – (x1, y1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Left
    pub x0: i32,
    /// Top
    pub y0: i32,
    /// Right
    pub x1: i32,
    /// Bottom
    pub y1: i32,
}

impl Bounds {
    /// As an embedded-graphics rectangle covering both corners
    pub fn rectangle(&self) -> Rectangle {
        Rectangle::with_corners(Point::new(self.x0, self.y0), Point::new(self.x1, self.y1))
    }

    /// Top-left corner
    pub fn top_left(&self) -> Point {
        Point::new(self.x0, self.y0)
    }

    /// `true` when (x, y) lies inside, edges included
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.x0..=self.x1).contains(&x) && (self.y0..=self.y1).contains(&y)
    }

    /// `true` when the two boxes share any pixel
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1 && self.y0 <= other.y1 && other.y0 <= self.y1
    }
}

/// One numbered day in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    /// Day of month
    pub day: u8,
    /// Week row (0-based)
    pub row: usize,
    /// Weekday column, Sunday = 0
    pub column: usize,
    /// Cell box on the grid lines
    pub bounds: Bounds,
}

/// Geometry of one month page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLayout {
    weeks: heapless::Vec<Week, MAX_WEEKS>,
    margin: i32,
    width: i32,
    /// Top of the weekday header row
    pub grid_top: i32,
    /// Left grid edge
    pub grid_left: i32,
    /// Right grid edge
    pub grid_right: i32,
    /// Bottom of the drawable grid area
    pub grid_bottom: i32,
    /// Column width
    pub cell_width: i32,
    /// Row height
    pub cell_height: i32,
}

impl MonthLayout {
    /// Layout for `year`/`month` on a canvas described by `config`.
    // SAFETY: every operand is bounded by canvas dimensions that were checked
    // to fit in i32; divisors are 7 and max(weeks, 1).
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_wrap)]
    pub fn new(config: &RenderConfig, year: i32, month: u8) -> Result<Self, RenderError> {
        let weeks = month_weeks(year, month)?;
        let too_large = || RenderError::CanvasTooLarge {
            width: config.width,
            height: config.height,
        };
        let width = i32::try_from(config.width).map_err(|_| too_large())?;
        let height = i32::try_from(config.height).map_err(|_| too_large())?;
        let margin = i32::try_from(config.margin).map_err(|_| too_large())?;
        if width > 0x7FFF || height > 0x7FFF || margin > 0x7FFF {
            return Err(too_large());
        }

        let grid_top = margin + GRID_OFFSET;
        let grid_left = margin;
        let grid_right = width - margin;
        let grid_bottom = height - margin;
        let rows = i32::try_from(weeks.len().max(1)).map_err(|_| too_large())?;
        let cell_width = (grid_right - grid_left) / 7;
        let cell_height = (grid_bottom - grid_top - HEADER_HEIGHT) / rows;

        let widget_left = width - WIDGET_INSET;
        let character_left = widget_left - CHARACTER_GAP - CHARACTER_SIZE as i32;
        if cell_width < 1 || cell_height < 1 || character_left < 0 || widget_left >= grid_right {
            return Err(RenderError::CanvasTooSmall {
                width: config.width,
                height: config.height,
            });
        }

        Ok(Self {
            weeks,
            margin,
            width,
            grid_top,
            grid_left,
            grid_right,
            grid_bottom,
            cell_width,
            cell_height,
        })
    }

    /// Week rows, Sunday first
    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// Number of week rows
    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    /// Month title position
    pub fn title_origin(&self) -> Point {
        Point::new(self.margin, self.margin)
    }

    /// Totals line position
    // SAFETY: margin is bounded by the canvas check in `new`.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn totals_origin(&self) -> Point {
        Point::new(self.margin, self.margin + TOTALS_OFFSET)
    }

    /// Status widget box, top right
    // SAFETY: bounded by the canvas check in `new`.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn widget(&self) -> Bounds {
        Bounds {
            x0: self.width - WIDGET_INSET,
            y0: self.margin,
            x1: self.width - self.margin,
            y1: self.margin + WIDGET_HEIGHT,
        }
    }

    /// Character illustration box, left of the widget
    // SAFETY: `new` checked that the box starts at x >= 0.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_wrap)]
    pub fn character(&self) -> Bounds {
        let size = CHARACTER_SIZE as i32;
        let x0 = self.widget().x0 - CHARACTER_GAP - size;
        Bounds {
            x0,
            y0: self.margin,
            x1: x0 + size - 1,
            y1: self.margin + size - 1,
        }
    }

    /// Weekday label position for `column`
    // SAFETY: column < 7 keeps the product within the grid.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn weekday_origin(&self, column: usize) -> Point {
        Point::new(self.grid_left + column as i32 * self.cell_width + 4, self.grid_top)
    }

    /// Top edge of the first week row
    // SAFETY: bounded by the canvas check in `new`.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn rows_top(&self) -> i32 {
        self.grid_top + HEADER_HEIGHT
    }

    /// Bottom edge of the last week row
    // SAFETY: week_count <= 6 and rows fit the grid by construction.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn rows_bottom(&self) -> i32 {
        self.rows_top() + self.cell_height * self.weeks.len() as i32
    }

    /// x of the eight vertical grid lines
    // SAFETY: i <= 7 keeps the product within the grid.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn column_lines(&self) -> impl Iterator<Item = i32> + '_ {
        (0..8).map(move |i| self.grid_left + i * self.cell_width)
    }

    /// y of the `weeks + 1` horizontal grid lines
    // SAFETY: r <= 6 keeps the product within the grid.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn row_lines(&self) -> impl Iterator<Item = i32> + '_ {
        (0..=self.weeks.len()).map(move |r| self.rows_top() + r as i32 * self.cell_height)
    }

    /// Box of the cell at `row`/`column`
    // SAFETY: row <= 5 and column <= 6 keep every product within the grid.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn cell_bounds(&self, row: usize, column: usize) -> Bounds {
        let x0 = self.grid_left + column as i32 * self.cell_width;
        let y0 = self.rows_top() + row as i32 * self.cell_height;
        Bounds {
            x0,
            y0,
            x1: x0 + self.cell_width,
            y1: y0 + self.cell_height,
        }
    }

    /// Every numbered day, in reading order
    pub fn day_cells(&self) -> impl Iterator<Item = DayCell> + '_ {
        self.weeks.iter().enumerate().flat_map(move |(row, week)| {
            week.iter().enumerate().filter_map(move |(column, slot)| {
                slot.map(|day| DayCell {
                    day,
                    row,
                    column,
                    bounds: self.cell_bounds(row, column),
                })
            })
        })
    }

    /// Day-number position inside a cell
    // SAFETY: small constant offsets inside the canvas.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn day_number_origin(&self, cell: &Bounds) -> Point {
        Point::new(cell.x0 + 4, cell.y0 + 2)
    }

    /// Red outline marking today, inset by one pixel
    // SAFETY: small constant offsets inside the cell.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn today_outline(&self, cell: &Bounds) -> Bounds {
        Bounds {
            x0: cell.x0 + 1,
            y0: cell.y0 + 1,
            x1: cell.x1 - 1,
            y1: cell.y1 - 1,
        }
    }

    /// Icon slot for `kind` along the cell's bottom edge.
    ///
    /// Slots are `cell_width / 4` wide with an 8 px gutter, so they never
    /// share a pixel.
    // SAFETY: small offsets inside the cell; slot index <= 2.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn icon_slot(&self, cell: &Bounds, kind: HabitKind) -> Bounds {
        let icon_w = self.cell_width / 4;
        let icon_h = self.cell_height / 4;
        let y0 = cell.y1 - icon_h - 6;
        let x0 = cell.x0 + 6 + kind.slot() as i32 * (icon_w + ICON_GUTTER);
        Bounds {
            x0,
            y0,
            x1: x0 + icon_w,
            y1: y0 + icon_h,
        }
    }
}
