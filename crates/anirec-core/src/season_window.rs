use anirec_models::{Season, SeasonInfo};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// Day (relative to the 1st of the start month) the window opens on. Day 0 is the
/// last day of the previous month, so this lands 15 days before the 1st and
/// catches shows that start airing early.
const START_DAY: i64 = -14;
/// Day of the month after the nominal season end on which the window closes,
/// leaving room for delayed episodes and slower streaming platforms.
const END_DAY: i64 = 14;
/// Nominal season length. Two-cour shows are not modeled.
const SEASON_MONTHS: i32 = 3;
/// Zero-based month index the window of a whole-year season closes in (December)
const WHOLE_YEAR_END_MONTH_INDEX: i32 = 11;

/// First calendar month (1-based) of a season. A missing name starts in January.
pub fn start_month(name: Option<Season>) -> u32 {
    match name {
        None | Some(Season::Winter) => 1,
        Some(Season::Spring) => 4,
        Some(Season::Summer) => 7,
        Some(Season::Autumn) => 11,
    }
}

/// Midnight of a calendar date given as year, zero-based month index and day,
/// where the month may run past December and the day may be zero or negative.
fn calendar_date(year: i32, month_index: i32, day: i64) -> Option<NaiveDateTime> {
    let total_months = year.checked_mul(12)?.checked_add(month_index)?;
    let first = NaiveDate::from_ymd_opt(
        total_months.div_euclid(12),
        total_months.rem_euclid(12) as u32 + 1,
        1,
    )?;
    first
        .checked_add_signed(Duration::days(day - 1))?
        .and_hms_opt(0, 0, 0)
}

/// Local wall-clock window during which a season counts as current
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl SeasonWindow {
    /// `None` only when the year is outside the representable calendar range
    pub fn for_season(season: &SeasonInfo) -> Option<Self> {
        let month_index = start_month(season.name) as i32 - 1;
        let start = calendar_date(season.year, month_index, START_DAY)?;
        let end_month_index = match season.name {
            None => WHOLE_YEAR_END_MONTH_INDEX,
            Some(_) => month_index + SEASON_MONTHS,
        };
        let end = calendar_date(season.year, end_month_index, END_DAY)?;
        Some(Self { start, end })
    }

    /// Strict on both ends
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start < at && at < self.end
    }
}

/// Whether `season` is roughly the current season or a later one, judged at `now`
pub fn is_near_current_or_after_season_at(season: &SeasonInfo, now: NaiveDateTime) -> bool {
    SeasonWindow::for_season(season).is_some_and(|window| window.contains(now))
}

/// [`is_near_current_or_after_season_at`] against the local clock
pub fn is_near_current_or_after_season(season: &SeasonInfo) -> bool {
    is_near_current_or_after_season_at(season, Local::now().naive_local())
}
