//! Reporting back to the Actions host: log lines, outputs and failure status.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncWrite, AsyncWriteExt};
use uuid::Uuid;

use crate::command::WorkflowCommand;
use crate::error::{ActionError, Result};

/// Channel through which a run reports to its host.
#[allow(async_fn_in_trait)]
pub trait HostSink {
    /// Writes a plain diagnostic line.
    async fn info(&mut self, line: &str) -> Result<()>;

    /// Writes a line only shown when step debug logging is enabled.
    async fn debug(&mut self, line: &str) -> Result<()>;

    async fn warning(&mut self, line: &str) -> Result<()>;

    async fn error(&mut self, line: &str) -> Result<()>;

    /// Publishes output `name`. Each name may be set once per run.
    async fn set_output(&mut self, name: &str, value: &str) -> Result<()>;

    /// Reports the run as failed with `message`.
    async fn set_failed(&mut self, message: &str) -> Result<()>;
}

/// Sink speaking the runner's stdout command protocol.
///
/// Outputs go to the `GITHUB_OUTPUT` file when one is configured, and to the
/// legacy `::set-output` command otherwise.
#[derive(Debug)]
pub struct CommandSink<W> {
    writer: W,
    output_file: Option<PathBuf>,
    outputs: HashSet<String>,
}

impl CommandSink<tokio::io::Stdout> {
    pub fn stdout(output_file: Option<PathBuf>) -> Self {
        Self::new(tokio::io::stdout(), output_file)
    }
}

impl<W: AsyncWrite + Unpin> CommandSink<W> {
    pub fn new(writer: W, output_file: Option<PathBuf>) -> Self {
        Self {
            writer,
            output_file: output_file.filter(|p| !p.as_os_str().is_empty()),
            outputs: HashSet::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    async fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer
            .write_all(format!("{line}\n").as_bytes())
            .await
            .map_err(ActionError::WriteCommand)?;
        self.writer.flush().await.map_err(ActionError::WriteCommand)
    }

    async fn write_command(&mut self, command: WorkflowCommand<'_>) -> Result<()> {
        self.write_line(&command.to_string()).await
    }

    async fn append_output_file(&self, path: &Path, record: &str) -> Result<()> {
        let write_err = |source| ActionError::WriteOutput {
            path: path.to_path_buf(),
            source,
        };
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(write_err)?;
        file.write_all(record.as_bytes()).await.map_err(write_err)?;
        file.flush().await.map_err(write_err)
    }
}

/// Formats `name` and `value` as a heredoc record for a file command.
pub fn output_record(name: &str, value: &str, delimiter: &str) -> Result<String> {
    if name.contains(delimiter) {
        return Err(ActionError::DelimiterInName(delimiter.to_string()));
    }
    if value.contains(delimiter) {
        return Err(ActionError::DelimiterInValue(delimiter.to_string()));
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}

impl<W: AsyncWrite + Unpin> HostSink for CommandSink<W> {
    async fn info(&mut self, line: &str) -> Result<()> {
        self.write_line(line).await
    }

    async fn debug(&mut self, line: &str) -> Result<()> {
        self.write_command(WorkflowCommand::new("debug", line)).await
    }

    async fn warning(&mut self, line: &str) -> Result<()> {
        self.write_command(WorkflowCommand::new("warning", line))
            .await
    }

    async fn error(&mut self, line: &str) -> Result<()> {
        self.write_command(WorkflowCommand::new("error", line)).await
    }

    async fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        if self.outputs.contains(name) {
            return Err(ActionError::DuplicateOutput(name.to_string()));
        }

        match self.output_file.clone() {
            Some(path) => {
                let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
                let record = output_record(name, value, &delimiter)?;
                self.append_output_file(&path, &record).await?;
                tracing::debug!(name, path = %path.display(), "wrote output");
            }
            None => {
                // Blank line keeps the command off any partial line already on stdout.
                self.write_line("").await?;
                self.write_command(
                    WorkflowCommand::new("set-output", value).with_property("name", name),
                )
                .await?;
                tracing::debug!(name, "wrote legacy output command");
            }
        }

        self.outputs.insert(name.to_string());
        Ok(())
    }

    async fn set_failed(&mut self, message: &str) -> Result<()> {
        self.error(message).await
    }
}
