//! Signal extraction from the daily markdown snapshots.
//!
//! Every extractor is a pure function of its input text: no state survives a
//! call, malformed lines are skipped silently, and the same text always
//! yields the same records.

pub mod actions;
pub mod calendar;
pub mod counts;
pub mod email;

use regex::Regex;

pub use actions::extract_action_items;
pub use calendar::extract_calendar;
pub use counts::count_signal_lines;
pub use email::extract_emails;

#[expect(clippy::expect_used, reason = "patterns are literals checked by tests")]
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("extraction pattern is valid")
}
