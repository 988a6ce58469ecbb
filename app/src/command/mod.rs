//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use std::path::Path;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use dayboard_config::Config;
use dayboard_core::TtlCache;
use dayboard_signals::{SignalService, WorkspaceLayout};
use tracing::info;

mod brief;
mod info;
mod init;
mod project;
mod run;
mod search;
mod today;
mod tools;
mod version;

pub use brief::{BriefInput, BriefStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use project::{ProjectInput, ProjectStrategy};
pub use run::{RunInput, RunStrategy};
pub use search::{SearchInput, SearchStrategy};
pub use today::{TodayInput, TodayStrategy};
pub use tools::ToolsStrategy;
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```rust
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         // Command logic here
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Loaded configuration plus the signal service built from it.
pub struct Workspace {
    pub config: Arc<Config>,
    pub service: SignalService,
}

impl Workspace {
    pub fn open(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let config = Arc::new(load_config(config_path)?);
        let classifier = config.charter_classifier()?;
        let root = config.workspace_root();
        info!(root = %root.display(), charter_rules = classifier.len(), "opening workspace");

        let service = SignalService::new(
            WorkspaceLayout::new(root),
            Arc::new(classifier),
            Arc::new(TtlCache::new()),
        )
        .with_identity(config.pm_identity.name.clone())
        .with_known_folders(config.known_folders())
        .with_ttl(config.cache.ttl());

        Ok(Self { config, service })
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Truncate to at most `max` characters for one-line display.
fn clip(text: &str, max: usize) -> &str {
    text.char_indices().nth(max).map_or(text, |(i, _)| &text[..i])
}
