//! Process-backed tool runner.

use super::{ToolInvocation, ToolOutput, ToolRunner};
use crate::bundler::error::{Error, Result};
use std::process::Stdio;
use tokio::process::Command;

/// Runs commands as child processes, capturing stdout and stderr.
///
/// The child inherits no stdin. Each call blocks the caller until the
/// process exits; there is no timeout.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for ProcessRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput> {
        log::debug!("Running: {}", invocation.display_command());

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &invocation.working_dir {
            command.current_dir(dir);
        }

        let output = command.output().await.map_err(|error| Error::CommandFailed {
            command: invocation.program.display().to_string(),
            error,
        })?;

        Ok(ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
