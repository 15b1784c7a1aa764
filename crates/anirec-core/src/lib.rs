pub mod filter;
pub mod pipeline;
pub mod ranking;
pub mod scoring;
pub mod season_window;

pub use filter::filter_by_media_type;
pub use pipeline::{collect_work_ids, PlannedRule, ReserveOrchestrator, ReserveResult};
pub use ranking::{build_ranking, rank_works_at, RankedWork};
pub use scoring::{calc_status_score, calc_status_score_at, status_score, status_score_at, HasWatchStatus};
pub use season_window::{is_near_current_or_after_season, is_near_current_or_after_season_at, SeasonWindow};
