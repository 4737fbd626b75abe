//! Running external tools and forwarding their output to the log.

use std::process::{ExitStatus, Stdio};

use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    process::Command,
    task::JoinHandle,
};

use crate::ToolCommand;

/// Forward every line of `reader` to the log, tagged with the tool name.
fn stream_lines<R>(tool: &'static str, stream: &'static str, reader: R) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => tracing::info!(tool, stream, "{}", line),
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(tool, stream, error = %e, "Error streaming tool output");
                    break;
                }
            }
        }
        tracing::trace!(tool, stream, "Output stream ended");
    })
}

/// Run `command` followed by `extra_args`, streaming its output, and wait for it to exit.
///
/// Only a failure to spawn or wait is an error; the exit status is returned for the
/// caller to judge.
pub async fn run_tool(
    tool: &'static str,
    command: &ToolCommand,
    extra_args: &[String],
) -> std::io::Result<ExitStatus> {
    tracing::debug!(
        tool,
        program = %command.program,
        args = ?command.args.iter().chain(extra_args).collect::<Vec<_>>(),
        "Running external tool"
    );

    let mut child = Command::new(&command.program)
        .args(&command.args)
        .args(extra_args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let stdout = child.stdout.take().map(|out| stream_lines(tool, "stdout", out));
    let stderr = child.stderr.take().map(|err| stream_lines(tool, "stderr", err));

    let status = child.wait().await?;

    for handle in [stdout, stderr].into_iter().flatten() {
        if let Err(e) = handle.await {
            tracing::warn!(tool, error = %e, "Output forwarding task failed");
        }
    }

    if status.success() {
        tracing::debug!(tool, %status, "External tool completed");
    } else {
        tracing::warn!(tool, %status, "External tool exited unsuccessfully");
    }

    Ok(status)
}

/// Availability of an external tool on this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// The tool answered `--version`; holds the first line of its answer.
    Available(String),
    /// The tool could not be started.
    Missing(String),
}

impl ToolStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// Check whether `command` can be started by asking it for its version.
pub async fn probe(command: &ToolCommand) -> ToolStatus {
    let output = Command::new(&command.program)
        .args(&command.args)
        .arg("--version")
        .stdin(Stdio::null())
        .output()
        .await;

    match output {
        Ok(output) if !output.status.success() => ToolStatus::Missing(format!(
            "`{} --version` exited with {}",
            command.program, output.status
        )),
        Ok(output) => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .unwrap_or_default()
                .to_string();
            ToolStatus::Available(version)
        }
        Err(e) => ToolStatus::Missing(e.to_string()),
    }
}
