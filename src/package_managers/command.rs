use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("could not run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}")]
    Failed { program: String, status: ExitStatus },

    #[error("`{program}` did not finish within {timeout:?}")]
    TimedOut { program: String, timeout: Duration },
}

/// A package-manager invocation. Output goes straight to the terminal.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    stdin: Option<String>,
    timeout: Option<Duration>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub async fn run(&self) -> Result<(), CommandError> {
        debug!(program = %self.program, "running package manager");
        let spawn_error = |source: std::io::Error| CommandError::Spawn {
            program: self.program.clone(),
            source,
        };

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(if self.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());
        // Dropping the child on timeout kills it.
        cmd.kill_on_drop(true);
        let mut child = cmd.spawn().map_err(spawn_error)?;

        if let (Some(input), Some(mut pipe)) = (&self.stdin, child.stdin.take()) {
            pipe.write_all(input.as_bytes()).await.map_err(spawn_error)?;
            pipe.shutdown().await.map_err(spawn_error)?;
        }

        let status = match self.timeout {
            None => child.wait().await.map_err(spawn_error)?,
            Some(limit) => match timeout(limit, child.wait()).await {
                Ok(status) => status.map_err(spawn_error)?,
                Err(_) => {
                    return Err(CommandError::TimedOut {
                        program: self.program.clone(),
                        timeout: limit,
                    });
                }
            },
        };

        if status.success() {
            Ok(())
        } else {
            Err(CommandError::Failed {
                program: self.program.clone(),
                status,
            })
        }
    }
}
