use anirec_models::{AnimeStatus, SeasonInfo, WatchStatus};
use chrono::{Local, NaiveDateTime};
use crate::season_window::is_near_current_or_after_season_at;

/// Score of a finished (or actively followed, currently airing) show
pub const MAX_SCORE: i32 = 10;
pub const DROPPED_SCORE: i32 = -1;

/// Anything carrying a watch status can be scored
pub trait HasWatchStatus {
    fn watch_status(&self) -> WatchStatus;
}

impl HasWatchStatus for WatchStatus {
    fn watch_status(&self) -> WatchStatus {
        *self
    }
}

impl HasWatchStatus for AnimeStatus {
    fn watch_status(&self) -> WatchStatus {
        self.status
    }
}

/// Score from position alone: `ORDER.len() - index - 1`
pub fn position_score(status: WatchStatus) -> i32 {
    (WatchStatus::ORDER.len() - status.strength_index() - 1) as i32
}

pub fn status_score_at(status: WatchStatus, season: Option<&SeasonInfo>, now: NaiveDateTime) -> i32 {
    match status {
        WatchStatus::Dropped => DROPPED_SCORE,
        WatchStatus::Repeating | WatchStatus::Watched => MAX_SCORE,
        WatchStatus::Watching
            if season.is_some_and(|season| is_near_current_or_after_season_at(season, now)) =>
        {
            MAX_SCORE
        }
        _ => position_score(status),
    }
}

/// Ranking weight of one status. Watching a show that is airing now counts as much
/// as having finished it.
pub fn status_score(status: WatchStatus, season: Option<&SeasonInfo>) -> i32 {
    status_score_at(status, season, Local::now().naive_local())
}

pub fn calc_status_score_at<T: HasWatchStatus>(
    statuses: &[T],
    season: Option<&SeasonInfo>,
    now: NaiveDateTime,
) -> i32 {
    statuses
        .iter()
        .map(|s| status_score_at(s.watch_status(), season, now))
        .sum()
}

/// Sum of [`status_score`] over several users' (or sources') statuses for one anime
pub fn calc_status_score<T: HasWatchStatus>(statuses: &[T], season: Option<&SeasonInfo>) -> i32 {
    calc_status_score_at(statuses, season, Local::now().naive_local())
}
