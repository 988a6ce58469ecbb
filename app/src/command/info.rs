use std::path::PathBuf;

use dayboard_config::MetricStatus;
use tracing::info;

use super::Workspace;

/// Strategy for displaying the loaded configuration.
///
/// Prints branding, identity, workspace location, cache TTL, projects and
/// charter rules. The charter rules are compiled, so an invalid pattern is
/// reported here rather than on the first dashboard view.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = Option<PathBuf>;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let workspace = Workspace::open(input.as_deref())?;
        let config = &workspace.config;
        let layout = workspace.service.layout();

        println!(
            "=== {} · {} ===\n",
            config.branding.portal_name, config.branding.portal_subtitle
        );

        println!("Identity:");
        println!("  Name: {}", config.pm_identity.name);
        println!("  Team Members: {}", config.team_members.len());
        println!();

        println!("Workspace:");
        println!("  Root: {}", layout.root().display());
        let status = if layout.root().is_dir() {
            "Found"
        } else {
            "Missing"
        };
        println!("  Status: {status}");
        println!("  Signals: {}", layout.signals_dir().display());
        println!("  Cache TTL: {}s", config.cache.ttl_secs);
        println!();

        println!("Projects:");
        if config.projects.is_empty() {
            println!("  (none)");
        }
        for project in &config.projects {
            println!(
                "  {} ({}) -> {}",
                project.display_name(),
                project.slug,
                project.folder
            );
            for metric in &project.metrics {
                println!(
                    "    {}: {} / {} {}",
                    metric.name,
                    metric.value,
                    metric.target.as_deref().unwrap_or("-"),
                    status_label(metric.status)
                );
            }
        }
        println!();

        println!("Charter Rules:");
        if config.charter_patterns.is_empty() {
            println!("  (none)");
        }
        for rule in &config.charter_patterns {
            println!("  {}: /{}/i", rule.label, rule.regex);
        }

        info!(
            classifier_rules = workspace.service.classifier().len(),
            "configuration is valid"
        );
        Ok(())
    }
}

const fn status_label(status: MetricStatus) -> &'static str {
    match status {
        MetricStatus::Red => "[red]",
        MetricStatus::Yellow => "[yellow]",
        MetricStatus::Green => "[green]",
        MetricStatus::Unknown => "",
    }
}
