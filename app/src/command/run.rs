use std::path::PathBuf;

use dayboard_tools::{Request, View, trigger};
use tracing::info;

use super::Workspace;

#[derive(Debug, Clone)]
pub struct RunInput {
    pub config: Option<PathBuf>,
    pub action: String,
    /// Return once the action is spawned instead of waiting for it.
    pub detach: bool,
}

/// Strategy for starting a pipeline action.
///
/// The cache is cleared and the action spawned without blocking. Unless
/// detached, the command then stays alive until the action exits, since the
/// action's piped output closes with this process.
#[derive(Debug, Clone, Copy)]
pub struct RunStrategy;

/// The CLI command that shows `view`.
const fn view_command(view: View) -> &'static str {
    match view {
        View::Home => "dayboard today",
        View::Tools => "dayboard tools",
        View::Brief => "dayboard brief",
    }
}

fn print_next(view: View) {
    println!("Next: {} ({})", view_command(view), view.path());
}

impl super::CommandStrategy for RunStrategy {
    type Input = RunInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let action = match input.action.parse::<Request>()? {
            Request::Run(action) => action,
            Request::Show(view) => {
                print_next(view);
                return Ok(());
            }
        };
        let workspace = Workspace::open(input.config.as_deref())?;

        let triggered = trigger(action, workspace.service.layout(), workspace.service.cache())?;

        let pid = triggered
            .process
            .pid
            .map_or_else(|| "?".to_string(), |pid| pid.to_string());
        println!("Started {} (pid {pid})", triggered.action);

        if !input.detach {
            info!(action = %triggered.action, "waiting for action to exit");
            match triggered.process.reaper.await? {
                Some(status) => println!("Finished {}: {status}", triggered.action),
                None => println!("Lost track of {}", triggered.action),
            }
        }

        print_next(triggered.redirect);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayboard_tools::PipelineAction;

    #[test]
    fn test_tool_redirects_point_at_tools_command() {
        assert_eq!(view_command(PipelineAction::GenMetrics.redirect()), "dayboard tools");
        assert_eq!(view_command(PipelineAction::Pipeline.redirect()), "dayboard today");
        assert_eq!(view_command(View::Brief), "dayboard brief");
    }
}
