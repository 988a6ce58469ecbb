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

//! Markdown brief rendering for the dashboard.
//!
//! Only the subset the daily briefs use is understood: headings up to level
//! four, pipe tables, flat bullet and numbered lists, quotes, rules, fenced
//! code and the four inline spans.

pub mod brief;
pub mod inline;

pub use brief::{Block, parse_blocks, render, to_html};
pub use inline::{convert_spans, escape_html};
