//! Command-style fetch through an external program.
//!
//! The program is run directly (no shell) as `<program> <url> [option]`.
//! Only standard output is returned; a non-zero exit is an error.

use std::process::Stdio;
use std::time::{Duration, Instant};

use fetchgate_core::{AppConfig, Error};
use tokio::process::Command;

/// Configuration for the external fetch program.
#[derive(Debug, Clone)]
pub struct CommandConfig {
    /// Program to run (default: "curl")
    pub program: String,

    /// Maximum run time before the child is killed (default: 60s)
    pub timeout: Duration,

    /// Run the URL denylist before spawning (default: false)
    pub denylist: bool,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self { program: "curl".to_string(), timeout: Duration::from_secs(60), denylist: false }
    }
}

impl From<&AppConfig> for CommandConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            program: config.fetch_command.clone(),
            timeout: config.command_timeout(),
            denylist: config.command_denylist,
        }
    }
}

/// Captured standard output of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
}

impl CommandOutput {
    /// Wrap the raw output in a `<pre>` block. The text is not escaped.
    pub fn to_html(&self) -> String {
        format!("<pre>{}</pre>", self.stdout)
    }
}

/// Runs the external fetch program once per call.
#[derive(Debug, Clone)]
pub struct CommandFetcher {
    config: CommandConfig,
}

impl CommandFetcher {
    pub fn new(config: CommandConfig) -> Self {
        Self { config }
    }

    /// Run the fetch program against `target_url`, with `option` as a trailing argument.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingInput`] / [`Error::BlockedScheme`] when denylist checking is enabled
    /// - [`Error::ExternalProcess`] if the program cannot be spawned, exits non-zero,
    ///   or runs past the configured timeout
    pub async fn run(&self, target_url: &str, option: Option<&str>) -> Result<CommandOutput, Error> {
        if self.config.denylist {
            super::validate(target_url)?;
        }

        let start = Instant::now();

        let mut command = Command::new(&self.config.program);
        command
            .arg(target_url)
            .args(option)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.config.timeout, command.output())
            .await
            .map_err(|_| {
                Error::ExternalProcess(format!(
                    "the process \"{}\" exceeded the timeout of {} ms",
                    self.config.program,
                    self.config.timeout.as_millis()
                ))
            })?
            .map_err(|e| Error::ExternalProcess(format!("failed to start \"{}\": {}", self.config.program, e)))?;

        if !output.status.success() {
            let code = output
                .status
                .code()
                .map_or_else(|| "signal".to_string(), |c| c.to_string());
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(program = %self.config.program, exit = %code, "fetch command failed");
            return Err(Error::ExternalProcess(format!(
                "the command \"{}\" failed (exit code {}): {}",
                self.config.program,
                code,
                stderr.trim_end()
            )));
        }

        tracing::debug!(
            "ran {} {} in {}ms ({} bytes)",
            self.config.program,
            target_url,
            start.elapsed().as_millis(),
            output.stdout.len()
        );

        Ok(CommandOutput { stdout: String::from_utf8_lossy(&output.stdout).into_owned() })
    }
}
