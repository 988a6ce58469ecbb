use std::path::PathBuf;

use dayboard_signals::search_artifacts;

use super::Workspace;

const MAX_RESULTS: usize = 10;

#[derive(Debug, Clone)]
pub struct SearchInput {
    pub config: Option<PathBuf>,
    pub query: String,
}

/// Strategy for artifact search across the whole workspace.
#[derive(Debug, Clone, Copy)]
pub struct SearchStrategy;

impl super::CommandStrategy for SearchStrategy {
    type Input = SearchInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let workspace = Workspace::open(input.config.as_deref())?;
        let artifacts = workspace.service.artifacts(None);
        let hits = search_artifacts(&artifacts, &input.query, MAX_RESULTS);

        if hits.is_empty() {
            println!("No artifacts match '{}'.", input.query.trim());
            return Ok(());
        }
        for artifact in hits {
            println!(
                "{}  {}  {}  {}",
                artifact.modified, artifact.size, artifact.extension, artifact.path
            );
        }
        Ok(())
    }
}
