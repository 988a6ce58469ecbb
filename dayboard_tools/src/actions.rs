//! The fixed set of pipeline actions a user can trigger.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use dayboard_core::{Error, Result, TtlCache};
use dayboard_signals::WorkspaceLayout;
use serde::Serialize;
use tracing::info;

use crate::command_runner::{CommandSpec, Spawned, powershell_script, spawn_detached};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineAction {
    Pipeline,
    Cleanup,
    Snapshot,
    GenMetrics,
    FetchEmails,
    FetchCalendar,
    SyncInstructions,
    #[serde(rename = "dryrun")]
    DryRun,
}

/// The view to show once an action has been started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Home,
    Tools,
    Brief,
}

impl View {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Tools => "/tools",
            Self::Brief => "/brief",
        }
    }
}

/// A requested command name: either an action to start, or a plain
/// redirect that starts nothing and leaves the cache alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Run(PipelineAction),
    Show(View),
}

impl FromStr for Request {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "brief" {
            return Ok(Self::Show(View::Brief));
        }
        s.parse().map(Self::Run)
    }
}

/// An action that was launched, not one that has finished.
#[derive(Debug)]
pub struct Triggered {
    pub action: PipelineAction,
    pub command: CommandSpec,
    pub process: Spawned,
    pub redirect: View,
}

impl PipelineAction {
    pub const ALL: [Self; 8] = [
        Self::Pipeline,
        Self::Cleanup,
        Self::Snapshot,
        Self::GenMetrics,
        Self::FetchEmails,
        Self::FetchCalendar,
        Self::SyncInstructions,
        Self::DryRun,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pipeline => "pipeline",
            Self::Cleanup => "cleanup",
            Self::Snapshot => "snapshot",
            Self::GenMetrics => "gen-metrics",
            Self::FetchEmails => "fetch-emails",
            Self::FetchCalendar => "fetch-calendar",
            Self::SyncInstructions => "sync-instructions",
            Self::DryRun => "dryrun",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Pipeline => "Run Full Pipeline",
            Self::Cleanup => "Run Cleanup",
            Self::Snapshot => "Weekly Snapshot",
            Self::GenMetrics => "Calculate Metrics",
            Self::FetchEmails => "Fetch Emails",
            Self::FetchCalendar => "Fetch Calendar",
            Self::SyncInstructions => "Sync Instructions",
            Self::DryRun => "Dry Run",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Pipeline => "Execute daily orchestrator (cleanup, signals, brief, calendar)",
            Self::Cleanup => "Archive old signals, briefs and logs",
            Self::Snapshot => "Generate weekly aggregation",
            Self::GenMetrics => "Recalculate project metrics",
            Self::FetchEmails => "Pull latest email signals from Outlook",
            Self::FetchCalendar => "Pull today's calendar from Outlook",
            Self::SyncInstructions => "Rebuild copilot-instructions.md",
            Self::DryRun => "Preview pipeline without changes",
        }
    }

    #[must_use]
    pub const fn redirect(self) -> View {
        match self {
            Self::GenMetrics | Self::SyncInstructions | Self::DryRun => View::Tools,
            _ => View::Home,
        }
    }

    /// The process this action runs, with paths resolved against `layout`.
    #[must_use]
    pub fn command(self, layout: &WorkspaceLayout) -> CommandSpec {
        let script = |name: &str| layout.automation_dir().join(name);
        match self {
            Self::Pipeline => powershell_script(&script("daily_orchestrator.ps1"), &["-Force"]),
            Self::Cleanup => powershell_script(&script("cleanup.ps1"), &[]),
            Self::Snapshot => powershell_script(&script("weekly_snapshot.ps1"), &[]),
            Self::GenMetrics => CommandSpec::new(venv_python(layout.root()))
                .arg(script("calculate_metrics.py").display().to_string()),
            Self::FetchEmails => powershell_script(&script("fetch_emails.ps1"), &[]),
            Self::FetchCalendar => powershell_script(&script("fetch_calendar.ps1"), &[]),
            Self::SyncInstructions => powershell_script(&script("sync_instructions.ps1"), &[]),
            Self::DryRun => powershell_script(
                &script("daily_orchestrator.ps1"),
                &["-DryRun", "-Force"],
            ),
        }
    }
}

impl fmt::Display for PipelineAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PipelineAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| Error::UnknownAction(s.to_string()))
    }
}

fn venv_interpreter(root: &Path) -> PathBuf {
    let venv = root.join(".venv");
    if cfg!(windows) {
        venv.join("Scripts").join("python.exe")
    } else {
        venv.join("bin").join("python")
    }
}

/// The workspace virtualenv interpreter, or `python` from `PATH`.
fn venv_python(root: &Path) -> String {
    let interpreter = venv_interpreter(root);
    if interpreter.is_file() {
        interpreter.display().to_string()
    } else {
        "python".to_string()
    }
}

/// Clear every cached section, then start `action` from the workspace root.
///
/// The cache is cleared even when the process fails to start. Returns as soon
/// as the process is spawned; awaiting `process.reaper` waits for its exit.
pub fn trigger(action: PipelineAction, layout: &WorkspaceLayout, cache: &TtlCache) -> Result<Triggered> {
    cache.clear_all();

    let command = action.command(layout);
    info!(action = %action, program = %command.program, "triggering action");
    let process = spawn_detached(&command, layout.root())?;

    Ok(Triggered {
        action,
        command,
        process,
        redirect: action.redirect(),
    })
}
