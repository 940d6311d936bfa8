//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use agentdeck::agent::AgentCommand;
use agentdeck::app::{App, AppMessage, SettingsInfo};
use agentdeck::markdown::MarkdownRenderer;
use agentdeck::session::SessionCommand;
use tokio::sync::mpsc;

pub const INIT_LINE: &str =
    r#"{"type":"system","subtype":"init","session_id":"A","model":"m","cwd":"/tmp","tools":["Bash","Read"]}"#;
pub const ASSISTANT_HI: &str =
    r#"{"type":"assistant","message":{"content":[{"type":"text","text":"hi"}],"stop_reason":"end_turn"},"session_id":"A"}"#;
pub const RESULT_B: &str = r#"{"type":"result","subtype":"success","session_id":"B","is_error":false,"duration_ms":1200,"num_turns":1,"total_cost_usd":0.01,"usage":{"input_tokens":10,"cache_creation_input_tokens":0,"cache_read_input_tokens":5,"output_tokens":7}}"#;
pub const TOOL_USE: &str = r#"{"type":"assistant","message":{"content":[{"type":"tool_use","id":"t1","name":"Bash","input":{"command":"ls"}}]}}"#;
pub const TOOL_RESULT: &str =
    r#"{"type":"user","message":{"content":[{"type":"tool_result","tool_use_id":"t1","is_error":false}]}}"#;

/// App wired to a fresh command channel.
pub fn test_app() -> (App, mpsc::UnboundedReceiver<SessionCommand>) {
    let renderer = Arc::new(MarkdownRenderer::new().unwrap());
    let (tx, rx) = mpsc::unbounded_channel();
    (App::new(renderer, tx, SettingsInfo::default()), rx)
}

/// Invocation template pointing at `program`.
pub fn agent_command(program: &Path) -> AgentCommand {
    AgentCommand {
        program: program.to_path_buf(),
        ..AgentCommand::default()
    }
}

/// Write an executable `/bin/sh` script standing in for the agent.
#[cfg(unix)]
pub fn fake_agent(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

/// Script body printing `lines` to stdout, one per line.
pub fn emit_lines(lines: &[&str]) -> String {
    let mut body = String::from("cat <<'NDJSON'\n");
    for line in lines {
        body.push_str(line);
        body.push('\n');
    }
    body.push_str("NDJSON");
    body
}

/// Everything currently queued on a UI channel.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<AppMessage>) -> Vec<AppMessage> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}
