use std::path::PathBuf;

use super::Workspace;

const MAX_ARTIFACTS: usize = 20;

#[derive(Debug, Clone)]
pub struct ProjectInput {
    pub config: Option<PathBuf>,
    pub slug: String,
}

/// Strategy for one project's detail view: status, team, metrics and its
/// newest artifacts.
#[derive(Debug, Clone, Copy)]
pub struct ProjectStrategy;

impl super::CommandStrategy for ProjectStrategy {
    type Input = ProjectInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let workspace = Workspace::open(input.config.as_deref())?;
        let Some(project) = workspace.config.project(&input.slug) else {
            anyhow::bail!("Project not found: {}", input.slug);
        };

        println!("{} ({})", project.display_name(), project.name);
        if !project.description.is_empty() {
            println!("{}", project.description);
        }
        println!("Status: {}", project.status);
        println!("Team: {}", project.team);
        println!("Folder: {}", project.folder);
        println!();

        if !project.metrics.is_empty() {
            println!("Metrics:");
            for metric in &project.metrics {
                println!(
                    "  {}: {} (target {}) {}",
                    metric.name,
                    metric.value,
                    metric.target.as_deref().unwrap_or("-"),
                    metric.status.code()
                );
            }
            println!();
        }

        let artifacts = workspace.service.artifacts(Some(&project.folder));
        println!("Artifacts ({}):", artifacts.len());
        for artifact in artifacts.iter().take(MAX_ARTIFACTS) {
            println!("  {}  {}  {}", artifact.modified, artifact.size, artifact.path);
        }
        Ok(())
    }
}
