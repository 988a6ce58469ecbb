#![warn(
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

pub mod artifacts;
pub mod extraction;
mod service;
pub mod store;

pub use artifacts::{Artifact, scan_artifacts, search_artifacts};
pub use extraction::{count_signal_lines, extract_action_items, extract_calendar, extract_emails};
pub use service::{DEFAULT_TTL, Dashboard, SignalService};
pub use store::{Brief, WorkspaceLayout, read_optional};
