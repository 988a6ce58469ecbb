use std::path::PathBuf;

use chrono::NaiveDate;
use dayboard_signals::store::BRIEF_LOOKBACK_DAYS;
use tracing::info;

use super::Workspace;

#[derive(Debug, Clone)]
pub struct BriefInput {
    pub config: Option<PathBuf>,
    /// Defaults to the local date.
    pub date: Option<NaiveDate>,
}

/// Strategy for printing the daily brief as HTML.
///
/// Falls back to the most recent brief within the lookback window when the
/// requested day has none.
#[derive(Debug, Clone, Copy)]
pub struct BriefStrategy;

impl super::CommandStrategy for BriefStrategy {
    type Input = BriefInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let workspace = Workspace::open(input.config.as_deref())?;
        let date = input.date.unwrap_or_else(super::today);

        match workspace.service.brief_html(date)? {
            Some((found, html)) => {
                info!(requested = %date, found = %found, "rendering brief");
                println!("{html}");
            }
            None => {
                println!(
                    "No brief for {date} or the {BRIEF_LOOKBACK_DAYS} days before. Run `dayboard run pipeline` to generate one."
                );
            }
        }
        Ok(())
    }
}
