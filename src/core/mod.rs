// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod report;
pub mod scoring;
pub mod timezone;

pub use filters::{is_same_player, meets_min_score, shared_tags};
pub use matcher::Matcher;
pub use report::summarize_matches;
pub use scoring::calculate_match_score;
pub use timezone::{parse_utc_offset, timezone_closeness};
