//! Tournament engine: scoring rules, standings, scheduling, score updates.

mod schedule;
mod score_update;
mod scoring;
mod standings;

pub use schedule::{generate_schedule, partition_pools, pool_label, GeneratedSchedule};
pub use score_update::{apply_score, ScoreUpdate};
pub use scoring::{evaluate_match, games_needed_to_win, MatchEvaluation};
pub use standings::{recompute_standings, sort_for_display};
