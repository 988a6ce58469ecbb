use std::path::Path;
use std::process::{ExitStatus, Stdio};

use dayboard_core::{Error, Result};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Longest stderr excerpt logged for a failed action.
const STDERR_LOG_CHARS: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// `powershell -NoProfile -File <script> [flags]`
#[must_use]
pub fn powershell_script(script: &Path, flags: &[&str]) -> CommandSpec {
    let spec = CommandSpec::new("powershell")
        .arg("-NoProfile")
        .arg("-File")
        .arg(script.display().to_string());
    flags.iter().fold(spec, |spec, flag| spec.arg(*flag))
}

/// Build the process with piped output and no console window.
#[must_use]
pub fn build_command(spec: &CommandSpec, working_dir: Option<&Path>) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new(&spec.program);
    cmd.args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }
    #[cfg(windows)]
    {
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }
    cmd
}

/// A started process and the task that reaps it.
#[derive(Debug)]
pub struct Spawned {
    pub pid: Option<u32>,
    /// Resolves with the exit status, or `None` if waiting failed.
    pub reaper: JoinHandle<Option<ExitStatus>>,
}

fn truncate(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(i, _)| &text[..i])
}

/// Start `spec` in `working_dir` and return without waiting for it.
///
/// Must be called inside a Tokio runtime: a background task reaps the child
/// and logs how it exited.
pub fn spawn_detached(spec: &CommandSpec, working_dir: &Path) -> Result<Spawned> {
    let child = build_command(spec, Some(working_dir))
        .spawn()
        .map_err(|source| {
            warn!(program = %spec.program, error = %source, "failed to start action");
            Error::Spawn {
                program: spec.program.clone(),
                source,
            }
        })?;

    let pid = child.id();
    let program = spec.program.clone();
    info!(program = %program, pid = ?pid, "action started");

    let reaper = tokio::spawn(async move {
        // Drains both pipes so a chatty child never blocks on a full buffer.
        match child.wait_with_output().await {
            Ok(output) if output.status.success() => {
                info!(program = %program, status = %output.status, "action finished");
                Some(output.status)
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                warn!(
                    program = %program,
                    status = %output.status,
                    stderr = %truncate(stderr.trim(), STDERR_LOG_CHARS),
                    "action failed"
                );
                Some(output.status)
            }
            Err(e) => {
                warn!(program = %program, error = %e, "failed to wait for action");
                None
            }
        }
    });

    Ok(Spawned { pid, reaper })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_powershell_script_shape() {
        let spec = powershell_script(Path::new("/ws/_Automation/cleanup.ps1"), &["-Force"]);
        assert_eq!(spec.program, "powershell");
        assert_eq!(
            spec.args,
            ["-NoProfile", "-File", "/ws/_Automation/cleanup.ps1", "-Force"]
        );
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("ok", 10), "ok");
    }

    #[tokio::test]
    async fn test_missing_program_is_a_spawn_error() {
        let spec = CommandSpec::new("dayboard-no-such-program");
        let result = spawn_detached(&spec, Path::new("."));
        assert!(matches!(result, Err(Error::Spawn { ref program, .. }) if program == "dayboard-no-such-program"));
    }

    #[cfg(unix)]
    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn test_spawn_returns_without_waiting() {
        let spec = CommandSpec::new("sh").arg("-c").arg("sleep 5");
        let started = std::time::Instant::now();
        let spawned = spawn_detached(&spec, Path::new(".")).expect("sh should start");
        assert!(spawned.pid.is_some());
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
        spawned.reaper.abort();
    }

    #[cfg(unix)]
    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn test_reaper_reports_exit_status() {
        let spec = CommandSpec::new("sh").arg("-c").arg("echo noisy >&2; exit 3");
        let spawned = spawn_detached(&spec, Path::new(".")).expect("sh should start");
        let status = spawned.reaper.await.expect("reaper should not panic");
        assert_eq!(status.and_then(|s| s.code()), Some(3));
    }
}
