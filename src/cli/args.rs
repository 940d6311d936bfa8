//! Command-line argument parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Options that override the environment for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub model: Option<String>,
    pub mcp_config: Option<PathBuf>,
    pub agent_bin: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    /// Line mode instead of the dashboard
    pub headless: bool,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the dashboard or line mode (default)
    Run(CliOptions),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("unknown argument: {0}")]
    Unknown(String),
    #[error("{0} requires a value")]
    MissingValue(String),
}

/// Parse command-line arguments (program name first).
///
/// `--version` and `--help` win over everything after them. Value flags
/// accept both `--flag value` and `--flag=value`.
///
/// ```
/// use agentdeck::cli::{parse_args, CliCommand};
///
/// let args = vec!["agentdeck".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut options = CliOptions::default();
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| -> Result<String, ArgsError> {
            match inline.clone().or_else(|| args.next()) {
                Some(v) if !v.is_empty() => Ok(v),
                _ => Err(ArgsError::MissingValue(name.to_string())),
            }
        };

        match flag.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--headless" => options.headless = true,
            "--model" => options.model = Some(value("--model")?),
            "--mcp-config" => options.mcp_config = Some(PathBuf::from(value("--mcp-config")?)),
            "--agent-bin" => options.agent_bin = Some(PathBuf::from(value("--agent-bin")?)),
            "--log-file" => options.log_file = Some(PathBuf::from(value("--log-file")?)),
            _ => return Err(ArgsError::Unknown(arg)),
        }
    }
    Ok(CliCommand::Run(options))
}
