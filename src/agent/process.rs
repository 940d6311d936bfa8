//! Spawning the agent and draining its output.

use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::command::AgentCommand;
use crate::error::ProcessError;
use crate::shutdown::ShutdownListener;
use crate::stream::line_from_bytes;

/// Run one agent invocation to completion.
///
/// Every stdout line is handed to `on_line` in order, as soon as it is read.
/// Non-empty stderr lines go to `on_stderr` from a separate task, so a chatty
/// stderr never stalls stdout. A read failure or non-zero exit is returned
/// only after all lines read so far have been delivered.
///
/// If `shutdown` fires, the child is killed and `ProcessError::Cancelled`
/// is returned.
pub async fn run_agent<F, E>(
    command: &AgentCommand,
    prompt: &str,
    resume: Option<&str>,
    mut shutdown: ShutdownListener,
    mut on_line: F,
    on_stderr: E,
) -> Result<(), ProcessError>
where
    F: FnMut(&str),
    E: Fn(String) + Send + 'static,
{
    let program = command.program_name();
    let mut child = Command::new(&command.program)
        .args(command.args(prompt, resume))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ProcessError::Spawn {
            program: program.clone(),
            source,
        })?;

    info!(program = %program, pid = ?child.id(), resume = ?resume, "agent started");

    let stdout = child.stdout.take().ok_or(ProcessError::MissingPipe("stdout"))?;
    let stderr = child.stderr.take().ok_or(ProcessError::MissingPipe("stderr"))?;

    let stderr_task = tokio::spawn(async move {
        let mut lines = BufReader::new(stderr).split(b'\n');
        loop {
            match lines.next_segment().await {
                Ok(Some(bytes)) => {
                    let line = line_from_bytes(bytes);
                    if !line.trim().is_empty() {
                        on_stderr(line);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("stderr read failed: {}", e);
                    break;
                }
            }
        }
    });

    // Split on raw bytes: one line of invalid UTF-8 must not end the stream.
    let mut lines = BufReader::new(stdout).split(b'\n');
    let mut read_error = None;
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!(program = %program, "cancelling agent");
                let _ = child.kill().await;
                stderr_task.abort();
                return Err(ProcessError::Cancelled);
            }
            next = lines.next_segment() => match next {
                Ok(Some(bytes)) => on_line(&line_from_bytes(bytes)),
                Ok(None) => break,
                Err(e) => {
                    read_error = Some(e);
                    break;
                }
            }
        }
    }

    if let Some(e) = read_error {
        let _ = child.kill().await;
        stderr_task.abort();
        return Err(ProcessError::Read(e));
    }

    let status = child.wait().await.map_err(ProcessError::Wait)?;
    if let Err(e) = stderr_task.await {
        debug!("stderr task ended abnormally: {}", e);
    }
    check_status(status)
}

fn check_status(status: ExitStatus) -> Result<(), ProcessError> {
    if status.success() {
        debug!("agent exited cleanly");
        Ok(())
    } else {
        warn!(%status, "agent exited with failure");
        Err(ProcessError::ExitStatus(status.to_string()))
    }
}
