#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod cache;
pub mod charter;
mod error;
pub mod types;
pub mod util;

pub use cache::{Clock, ManualClock, SystemClock, TtlCache};
pub use charter::{CharterClassifier, CharterRule, DEFAULT_CHARTER};
pub use error::{Error, Result};
pub use types::{
    ActionBuckets, ActionItem, CalendarDay, Conflict, ConflictSide, Email, EmailDigest, FreeSlot,
    Meeting, MeetingKind, SignalCounts, SignalKind, Urgency,
};
