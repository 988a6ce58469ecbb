//! External pipeline actions: which command each one runs and how it is
//! launched without waiting for it.

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

pub mod actions;
pub mod command_runner;

pub use actions::{PipelineAction, Request, Triggered, View, trigger};
pub use command_runner::{CommandSpec, Spawned, build_command, powershell_script, spawn_detached};
