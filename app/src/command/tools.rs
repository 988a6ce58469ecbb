use std::path::PathBuf;

use dayboard_signals::Artifact;
use dayboard_tools::PipelineAction;

use super::Workspace;

const MAX_RECENT: usize = 40;

/// Strategy for the tools view: every pipeline action plus the newest files.
#[derive(Debug, Clone, Copy)]
pub struct ToolsStrategy;

fn render(artifacts: &[Artifact]) -> String {
    let mut out = String::from("Tools\n");
    for action in PipelineAction::ALL {
        out.push_str(&format!(
            "  {:<18} {:<18} {}\n",
            action.name(),
            action.title(),
            action.description()
        ));
    }

    out.push_str(&format!("\nRecent files ({} artifacts)\n", artifacts.len()));
    for artifact in artifacts.iter().take(MAX_RECENT) {
        out.push_str(&format!(
            "  {}  {:>8}  {}\n",
            artifact.modified, artifact.size, artifact.path
        ));
    }
    out
}

impl super::CommandStrategy for ToolsStrategy {
    type Input = Option<PathBuf>;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let workspace = Workspace::open(input.as_deref())?;
        print!("{}", render(&workspace.service.artifacts(None)));
        Ok(())
    }
}
