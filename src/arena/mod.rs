//! Automated matches and series between two agents, with result tallies.

mod metrics;
mod series;

pub use metrics::{MatchRecord, SeriesMetrics};
pub use series::{play_match, play_series};
