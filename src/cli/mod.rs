//! Command-line interface.
//!
//! ```ignore
//! match parse_args(std::env::args())? {
//!     CliCommand::Version => println!("{}", version_line()),
//!     CliCommand::Help => println!("{}", USAGE),
//!     CliCommand::Run(options) => { /* start */ }
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, CliOptions};
pub use version::{version_line, VERSION};

pub const USAGE: &str = "\
Usage: agentdeck [OPTIONS]

Terminal dashboard for a streaming agent CLI.

Options:
      --model <NAME>       Model passed to the agent
      --mcp-config <PATH>  MCP configuration file (default: config.json)
      --agent-bin <PATH>   Agent executable (default: claude)
      --log-file <PATH>    Write logs here instead of the data directory
      --headless           Read prompts from stdin instead of showing the dashboard
  -V, --version            Print version
  -h, --help               Print this help

Environment:
  AGENTDECK_AGENT_BIN, AGENTDECK_MODEL, AGENTDECK_MCP_CONFIG,
  AGENTDECK_PERMISSION_TOOL, AGENTDECK_LOG_FILE, AGENTDECK_LOG (log filter)";
