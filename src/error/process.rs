//! Errors from invoking the external agent process.

use std::io;

use thiserror::Error;

/// Failures while spawning, reading from, or waiting on the agent process.
///
/// These are surfaced to the operator as `Error` events; the conversation
/// loop keeps running and nothing is retried.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("agent process has no {0} pipe")]
    MissingPipe(&'static str),

    #[error("failed to read agent output: {0}")]
    Read(#[source] io::Error),

    #[error("failed waiting for agent process: {0}")]
    Wait(#[source] io::Error),

    #[error("agent process exited with {0}")]
    ExitStatus(String),

    #[error("agent invocation cancelled")]
    Cancelled,
}

impl ProcessError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ProcessError::Spawn { program, .. } => {
                format!("Could not start '{}'. Is it installed and on PATH?", program)
            }
            ProcessError::Cancelled => "Request cancelled.".to_string(),
            other => format!("command failed: {}", other),
        }
    }
}
