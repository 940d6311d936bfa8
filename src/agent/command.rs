//! Argument construction for the external agent CLI.

use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_AGENT_BIN: &str = "claude";
pub const DEFAULT_MCP_CONFIG: &str = "config.json";
pub const DEFAULT_PERMISSION_TOOL: &str = "mcp__permission__approval_prompt";

/// Static part of every agent invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentCommand {
    pub program: PathBuf,
    pub mcp_config: PathBuf,
    pub permission_tool: String,
    pub model: Option<String>,
}

impl Default for AgentCommand {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_AGENT_BIN),
            mcp_config: PathBuf::from(DEFAULT_MCP_CONFIG),
            permission_tool: DEFAULT_PERMISSION_TOOL.to_string(),
            model: None,
        }
    }
}

impl AgentCommand {
    /// Arguments for one invocation, prompt last.
    ///
    /// `--verbose` is required for `stream-json` output to emit anything.
    pub fn args(&self, prompt: &str, resume: Option<&str>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--output-format".into(),
            "stream-json".into(),
            "--verbose".into(),
            "-p".into(),
            "--permission-prompt-tool".into(),
            self.permission_tool.clone().into(),
            "--mcp-config".into(),
            self.mcp_config.clone().into_os_string(),
        ];
        if let Some(model) = self.model.as_deref().filter(|m| !m.is_empty()) {
            args.push("--model".into());
            args.push(model.into());
        }
        if let Some(id) = resume.filter(|id| !id.is_empty()) {
            args.push("--resume".into());
            args.push(id.into());
        }
        args.push(prompt.into());
        args
    }

    pub fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}
