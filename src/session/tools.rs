//! Tool execution lifecycle tracking.
//!
//! A [`ToolExecution`] starts when the agent emits a `tool_use` block and
//! advances each time the agent echoes a tool result back as a `user` line:
//! `Starting -> Running -> {Completed, Failed}`. Results carry no reliable
//! link to the tool that produced them, so each one advances the most
//! recently started active tool.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Status of a tool execution
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub enum ToolStatus {
    #[default]
    Starting,
    Running,
    Completed,
    Failed,
}

impl ToolStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ToolStatus::Completed | ToolStatus::Failed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToolStatus::Starting => "starting",
            ToolStatus::Running => "running",
            ToolStatus::Completed => "completed",
            ToolStatus::Failed => "failed",
        }
    }
}

/// An in-flight tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolExecution {
    pub id: String,
    pub name: String,
    pub description: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub status: ToolStatus,
    /// Insertion order, used when two tools share a start timestamp
    seq: u64,
}

impl ToolExecution {
    fn activity(&self) -> ToolActivity {
        let duration_ms = self
            .ended_at
            .map(|end| (end - self.started_at).num_milliseconds().max(0) as u64);
        ToolActivity {
            tool_id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status,
            started_at: self.started_at,
            ended_at: self.ended_at,
            duration_ms,
        }
    }
}

/// Snapshot of a tool execution at one transition, as published on the bus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolActivity {
    pub tool_id: String,
    pub name: String,
    pub description: String,
    pub status: ToolStatus,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    /// Set on terminal transitions
    pub duration_ms: Option<u64>,
}

impl ToolActivity {
    /// One-line form used by the side panel and line mode.
    pub fn display(&self) -> String {
        let icon = match self.status {
            ToolStatus::Starting => "⏵",
            ToolStatus::Running => "⟳",
            ToolStatus::Completed => "✓",
            ToolStatus::Failed => "✗",
        };
        match self.duration_ms {
            Some(ms) => format!(
                "{} {}: {} ({:.1}s)",
                icon,
                self.name,
                self.status.label(),
                ms as f64 / 1000.0
            ),
            None => format!("{} {}: {}", icon, self.name, self.status.label()),
        }
    }
}

/// Active tool executions for the current conversation.
#[derive(Debug, Default)]
pub struct ToolTracker {
    active: HashMap<String, ToolExecution>,
    next_seq: u64,
}

impl ToolTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new execution in the `Starting` state.
    pub fn start(&mut self, id: String, name: String, description: String) -> ToolActivity {
        self.start_at(id, name, description, Utc::now())
    }

    fn start_at(
        &mut self,
        id: String,
        name: String,
        description: String,
        started_at: DateTime<Utc>,
    ) -> ToolActivity {
        let execution = ToolExecution {
            id: id.clone(),
            name,
            description,
            started_at,
            ended_at: None,
            status: ToolStatus::Starting,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        let activity = execution.activity();
        self.active.insert(id, execution);
        activity
    }

    /// Apply one tool result to the most recently started active execution.
    ///
    /// Returns `None` when nothing is active. Terminal executions are removed
    /// from the tracker; the returned activity still carries their duration.
    pub fn advance(&mut self, is_error: bool) -> Option<ToolActivity> {
        let id = self
            .active
            .values()
            .max_by_key(|t| (t.started_at, t.seq))
            .map(|t| t.id.clone())?;

        let execution = self.active.get_mut(&id)?;
        match execution.status {
            ToolStatus::Starting => {
                execution.status = ToolStatus::Running;
                Some(execution.activity())
            }
            _ => {
                execution.status = if is_error {
                    ToolStatus::Failed
                } else {
                    ToolStatus::Completed
                };
                execution.ended_at = Some(Utc::now());
                let activity = execution.activity();
                self.active.remove(&id);
                Some(activity)
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&ToolExecution> {
        self.active.get(id)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

/// Build a human description for a `tool_use` block.
///
/// Uses the first present of an explicit description, a shell command, a
/// file path, or a search pattern.
pub fn describe_tool(name: &str, input: &Value) -> String {
    let field = |key: &str| {
        input
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    };

    if let Some(description) = field("description") {
        description.to_string()
    } else if let Some(command) = field("command") {
        format!("Executing: {}", command)
    } else if let Some(path) = field("file_path") {
        format!("Processing: {}", path)
    } else if let Some(pattern) = field("pattern") {
        format!("Searching: {}", pattern)
    } else {
        format!("Using tool: {}", name)
    }
}
