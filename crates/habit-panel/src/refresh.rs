//! One refresh: store → analysis → page → planes

use eink_planes::{split_black_red, PlanePair, PlaneSink};
use habit_core::calendar::MIN_YEAR;
use habit_core::{
    compute_mood_level, compute_streak_stats, streak_window, CalendarDate, CalendarError,
    HabitSource, MoodLevel, StreakStats, MOOD_WINDOW_DAYS,
};
use habit_render::{Character, IllustrationAssets, MonthSnapshot, Renderer};
use image::RgbImage;

use crate::{PanelConfig, PanelError};

/// Everything one refresh produced
#[derive(Debug, Clone)]
pub struct RefreshFrame {
    /// Day the frame was built for
    pub today: CalendarDate,
    /// Rendered page
    pub image: RgbImage,
    /// Page split into panel planes
    pub planes: PlanePair,
    /// Character shown this quarter
    pub character: Character,
    /// Mood the face was drawn with
    pub mood: MoodLevel,
    /// Streak numbers shown in the widget
    pub streak: StreakStats,
    /// Habits done today (0..=3)
    pub today_completed: u8,
}

/// Days the mood looks at: the 14 days ending at `today`, clipped at the
/// start of the calendar.
pub fn mood_window(today: CalendarDate) -> Result<(CalendarDate, CalendarDate), CalendarError> {
    let back = i64::try_from(MOOD_WINDOW_DAYS.saturating_sub(1)).unwrap_or(0);
    let start = match today.checked_add_days(0i64.saturating_sub(back)) {
        Ok(start) => start,
        Err(_) => CalendarDate::new(MIN_YEAR, 1, 1)?,
    };
    Ok((start, today))
}

/// Build the frame for `today` from `source`.
///
/// `assets` supplies pictures for characters that have one; without it every
/// quarter shows the default face. A canvas that does not fit the panel is
/// rejected before the store is read.
pub fn refresh<S>(
    source: &S,
    today: CalendarDate,
    config: &PanelConfig,
    assets: Option<&IllustrationAssets>,
) -> Result<RefreshFrame, PanelError>
where
    S: HabitSource,
    PanelError: From<S::Error>,
{
    config.validate()?;
    let month = source.month(today.year(), today.month())?;
    let totals = source.ytd_totals(today.year())?;

    let mood = match source.mood_override()? {
        Some(raw) => compute_mood_level(&[], Some(&raw)),
        None => {
            let (start, end) = mood_window(today)?;
            let recent = source.history(start, end)?;
            compute_mood_level(recent.last_days(MOOD_WINDOW_DAYS), None)
        }
    };

    let (start, end) = streak_window(today);
    let streak = compute_streak_stats(source.history(start, end)?.records());
    let today_completed = month.flags(today.day()).count();

    tracing::debug!(
        %today,
        mood = mood.get(),
        streak = streak.current,
        best = streak.best,
        today_completed,
        "habit analysis done"
    );

    let snapshot = MonthSnapshot {
        year: today.year(),
        month: today.month(),
        days: &month,
        totals,
        mood,
        today,
        streak,
        today_completed,
    };
    let mut renderer = Renderer::new(config.render.clone());
    if let Some(assets) = assets {
        renderer = renderer.with_assets(assets.clone());
    }
    let image = renderer.render(&snapshot)?;
    let planes = split_black_red(&image, &config.thresholds)?;

    let character = Character::for_date(today);
    tracing::info!(%today, %character, mood = mood.get(), "frame ready");
    Ok(RefreshFrame {
        today,
        image,
        planes,
        character,
        mood,
        streak,
        today_completed,
    })
}

/// Hand `frame` to `sink` unless the display is disabled by `config` or
/// the process environment.
///
/// Returns whether the sink saw the frame.
pub fn present<K: PlaneSink>(
    frame: &RefreshFrame,
    sink: &mut K,
    config: &PanelConfig,
) -> Result<bool, K::Error> {
    present_if(frame, sink, config.display_active())
}

/// [`present`] with the display switch already resolved.
pub fn present_if<K: PlaneSink>(frame: &RefreshFrame, sink: &mut K, active: bool) -> Result<bool, K::Error> {
    if !active {
        tracing::info!(today = %frame.today, "display disabled, skipping panel update");
        return Ok(false);
    }
    sink.present(&frame.planes)?;
    Ok(true)
}
