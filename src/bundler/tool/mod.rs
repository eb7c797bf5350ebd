//! Native packaging tool invocation.
//!
//! All calls to jpackage go through [`ToolRunner`], so the whole engine can
//! be driven by a fake that records invocations instead of spawning
//! processes.
//!
//! - [`process`] - Real runner backed by `tokio::process`
//! - [`detection`] - Locating the jpackage executable

pub mod detection;
pub mod process;

use crate::bundler::error::{Error, Result};
use std::future::Future;
use std::path::{Path, PathBuf};

pub use detection::locate_jpackage;
pub use process::ProcessRunner;

/// One external command to run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ToolInvocation {
    /// Executable to run
    pub program: PathBuf,
    /// Arguments in order
    pub args: Vec<String>,
    /// Working directory, inherited when `None`
    pub working_dir: Option<PathBuf>,
}

impl ToolInvocation {
    pub fn new(program: impl AsRef<Path>, args: Vec<String>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args,
            working_dir: None,
        }
    }

    pub fn working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Value following the first occurrence of `flag`, if any.
    pub fn arg_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Every value following an occurrence of `flag`.
    pub fn arg_values(&self, flag: &str) -> Vec<&str> {
        self.args
            .windows(2)
            .filter(|w| w[0] == flag)
            .map(|w| w[1].as_str())
            .collect()
    }

    /// Command line for logs and error messages.
    pub fn display_command(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Exit status and captured output of a finished command.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ToolOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr.
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Executes external commands.
///
/// Implementations only report what happened; turning a non-zero exit into
/// an error is the caller's job.
pub trait ToolRunner {
    /// Runs the command to completion and captures its output.
    fn run(&self, invocation: &ToolInvocation) -> impl Future<Output = Result<ToolOutput>> + Send;
}

/// Runs `invocation` and turns a non-zero exit into [`Error::ExternalToolFailure`].
///
/// Captured output is re-emitted through the log unmodified: stdout at
/// `info`, stderr at `warn`.
pub async fn run_checked<R: ToolRunner>(
    runner: &R,
    invocation: &ToolInvocation,
) -> Result<ToolOutput> {
    let output = runner.run(invocation).await?;

    for line in output.stdout.lines() {
        log::info!("{}", line);
    }
    for line in output.stderr.lines() {
        log::warn!("{}", line);
    }

    if !output.is_success() {
        return Err(Error::ExternalToolFailure {
            command: invocation.display_command(),
            code: output.code,
            stdout: output.stdout,
            stderr: output.stderr,
        });
    }

    Ok(output)
}

impl<T: ToolRunner + Sync> ToolRunner for &T {
    fn run(&self, invocation: &ToolInvocation) -> impl Future<Output = Result<ToolOutput>> + Send {
        (**self).run(invocation)
    }
}
