//! Month page composition

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Line, PrimitiveStyle, PrimitiveStyleBuilder, StrokeAlignment},
    text::{Baseline, Text},
};
use habit_core::calendar::{month_name, WEEKDAY_LABELS};
use habit_core::{CalendarDate, HabitKind, MonthData, MoodLevel, StreakStats, YtdTotals};
use image::RgbImage;

use crate::assets::{illustration_pixels, IllustrationAssets};
use crate::canvas::{infallible, RgbCanvas};
use crate::character::{draw_face, Character, Illustration};
use crate::icons::HabitIcon;
use crate::layout::{Bounds, MonthLayout, WIDGET_ROW};
use crate::{FontSet, Palette, RenderConfig, RenderError};

/// Everything drawn on one month page
#[derive(Debug, Clone, Copy)]
pub struct MonthSnapshot<'a> {
    /// Year shown
    pub year: i32,
    /// Month shown (1..=12)
    pub month: u8,
    /// Per-day flags of that month
    pub days: &'a MonthData,
    /// Year-to-date completion counts
    pub totals: YtdTotals,
    /// Mood level for the face
    pub mood: MoodLevel,
    /// Date highlighted in the grid and used for the character rotation
    pub today: CalendarDate,
    /// Streak numbers for the widget
    pub streak: StreakStats,
    /// Habits done today (0..=3)
    pub today_completed: u8,
}

/// Draws month pages for one configuration
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
    palette: Palette,
    fonts: FontSet,
    assets: Option<IllustrationAssets>,
}

impl Renderer {
    /// Renderer without an asset directory (non-default characters fall back to the face)
    pub fn new(config: RenderConfig) -> Self {
        let fonts = FontSet::resolve(&config.preferred_font);
        let palette = config.palette();
        Self {
            config,
            palette,
            fonts,
            assets: None,
        }
    }

    /// Load character pictures from `assets`
    pub fn with_assets(mut self, assets: IllustrationAssets) -> Self {
        self.assets = Some(assets);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Fonts in use after fallback
    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// Page geometry for `year`/`month`
    pub fn layout(&self, year: i32, month: u8) -> Result<MonthLayout, RenderError> {
        MonthLayout::new(&self.config, year, month)
    }

    /// Render one month page.
    pub fn render(&self, snapshot: &MonthSnapshot<'_>) -> Result<RgbImage, RenderError> {
        let layout = self.layout(snapshot.year, snapshot.month)?;
        if snapshot.days.year() != snapshot.year || snapshot.days.month() != snapshot.month {
            return Err(RenderError::MonthMismatch {
                expected: (snapshot.year, snapshot.month),
                found: (snapshot.days.year(), snapshot.days.month()),
            });
        }
        let title = format!("{} {}", month_name(snapshot.month)?, snapshot.year);

        let mut canvas = RgbCanvas::new(self.config.width, self.config.height, self.palette.white);
        infallible(self.draw_page(&mut canvas, &layout, snapshot, &title));

        tracing::debug!(
            year = snapshot.year,
            month = snapshot.month,
            weeks = layout.week_count(),
            mood = snapshot.mood.get(),
            fonts = self.fonts.family,
            "month rendered"
        );
        Ok(canvas.into_image())
    }

    fn draw_page<D>(
        &self,
        display: &mut D,
        layout: &MonthLayout,
        snapshot: &MonthSnapshot<'_>,
        title: &str,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let black = self.palette.black;
        self.text(display, title, layout.title_origin(), self.fonts.title, black)?;

        let totals = format!(
            "YTD totals  {}: {}  {}: {}  {}: {}",
            HabitKind::Read.label(),
            snapshot.totals.read,
            HabitKind::Journal.label(),
            snapshot.totals.journal,
            HabitKind::Workout.label(),
            snapshot.totals.workout,
        );
        self.text(display, &totals, layout.totals_origin(), self.fonts.body, black)?;

        self.draw_widget(display, layout.widget(), snapshot)?;
        self.draw_character(display, layout.character(), snapshot)?;
        self.draw_grid(display, layout)?;

        for cell in layout.day_cells() {
            let bounds = cell.bounds;
            self.text(
                display,
                &cell.day.to_string(),
                layout.day_number_origin(&bounds),
                self.fonts.body,
                black,
            )?;

            if snapshot.today.year() == snapshot.year
                && snapshot.today.month() == snapshot.month
                && snapshot.today.day() == cell.day
            {
                let style = PrimitiveStyleBuilder::new()
                    .stroke_color(self.palette.red)
                    .stroke_width(2)
                    .stroke_alignment(StrokeAlignment::Inside)
                    .build();
                layout
                    .today_outline(&bounds)
                    .rectangle()
                    .into_styled(style)
                    .draw(display)?;
            }

            let flags = snapshot.days.flags(cell.day);
            for kind in HabitKind::ALL.into_iter().filter(|&k| flags.get(k)) {
                HabitIcon::new(kind)
                    .palette(self.palette)
                    .render(display, layout.icon_slot(&bounds, kind))?;
            }
        }
        Ok(())
    }

    // SAFETY: widget offsets are small constants inside the widget box.
    #[allow(clippy::arithmetic_side_effects)]
    fn draw_widget<D>(&self, display: &mut D, widget: Bounds, snapshot: &MonthSnapshot<'_>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let black = self.palette.black;
        widget
            .rectangle()
            .into_styled(PrimitiveStyle::with_stroke(black, 1))
            .draw(display)?;
        Line::new(
            Point::new(widget.x0, widget.y0 + WIDGET_ROW),
            Point::new(widget.x1, widget.y0 + WIDGET_ROW),
        )
        .into_styled(PrimitiveStyle::with_stroke(black, 1))
        .draw(display)?;

        let label_x = widget.x0 + 8;
        let value_x = widget.x0 + 60;
        let first = widget.y0 + 4;
        let second = widget.y0 + 30;

        let streak = format!("{}d / best {}d", snapshot.streak.current, snapshot.streak.best);
        self.text(display, "Streak", Point::new(label_x, first), self.fonts.label, black)?;
        self.text(display, &streak, Point::new(value_x, first), self.fonts.value, black)?;

        let fraction_color = if snapshot.today_completed < 3 {
            self.palette.red
        } else {
            black
        };
        let today = format!("{}/3", snapshot.today_completed);
        self.text(display, "Today", Point::new(label_x, second), self.fonts.label, black)?;
        self.text(display, &today, Point::new(value_x, second), self.fonts.value, fraction_color)?;
        Ok(())
    }

    fn draw_character<D>(&self, display: &mut D, bounds: Bounds, snapshot: &MonthSnapshot<'_>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let character = Character::for_date(snapshot.today);
        if let Illustration::Asset { .. } = character.illustration() {
            match self.assets.as_ref().and_then(|assets| assets.load(character)) {
                Some(image) => {
                    return display.draw_iter(illustration_pixels(&image, bounds.top_left(), self.palette));
                }
                None => {
                    tracing::debug!(character = %character, "drawing default face instead");
                }
            }
        }
        draw_face(display, bounds, snapshot.mood, self.palette)
    }

    // SAFETY: grid edges come from MonthLayout and stay on-canvas.
    #[allow(clippy::arithmetic_side_effects)]
    fn draw_grid<D>(&self, display: &mut D, layout: &MonthLayout) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let black = self.palette.black;
        for (column, name) in WEEKDAY_LABELS.iter().enumerate() {
            self.text(display, name, layout.weekday_origin(column), self.fonts.body, black)?;
        }

        let line = PrimitiveStyle::with_stroke(black, 1);
        let (top, bottom) = (layout.rows_top(), layout.rows_bottom());
        for x in layout.column_lines() {
            Line::new(Point::new(x, top), Point::new(x, bottom))
                .into_styled(line)
                .draw(display)?;
        }
        for y in layout.row_lines() {
            Line::new(Point::new(layout.grid_left, y), Point::new(layout.grid_right, y))
                .into_styled(line)
                .draw(display)?;
        }
        Ok(())
    }

    fn text<D>(
        &self,
        display: &mut D,
        text: &str,
        origin: Point,
        font: &MonoFont<'_>,
        color: Rgb888,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        Text::with_baseline(text, origin, MonoTextStyle::new(font, color), Baseline::Top).draw(display)?;
        Ok(())
    }
}

/// Render one month page with `config` and no asset directory.
pub fn render_month(snapshot: &MonthSnapshot<'_>, config: &RenderConfig) -> Result<RgbImage, RenderError> {
    Renderer::new(config.clone()).render(snapshot)
}
