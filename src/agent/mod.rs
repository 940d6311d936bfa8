//! External agent CLI invocation.

mod command;
mod process;

pub use command::{AgentCommand, DEFAULT_AGENT_BIN, DEFAULT_MCP_CONFIG, DEFAULT_PERMISSION_TOOL};
pub use process::run_agent;
