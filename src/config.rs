//! Startup configuration.
//!
//! Values come from `AGENTDECK_*` environment variables, then command-line
//! flags override them. Build one with [`AppConfig::from_env`] or
//! [`AppConfig::builder`]:
//!
//! ```
//! use agentdeck::config::AppConfig;
//!
//! let config = AppConfig::builder()
//!     .with_model("opus")
//!     .with_headless(true)
//!     .build();
//! assert_eq!(config.model.as_deref(), Some("opus"));
//! ```

use std::path::PathBuf;

use crate::agent::{AgentCommand, DEFAULT_AGENT_BIN, DEFAULT_MCP_CONFIG, DEFAULT_PERMISSION_TOOL};
use crate::app::SettingsInfo;
use crate::cli::CliOptions;

pub const ENV_AGENT_BIN: &str = "AGENTDECK_AGENT_BIN";
pub const ENV_MODEL: &str = "AGENTDECK_MODEL";
pub const ENV_MCP_CONFIG: &str = "AGENTDECK_MCP_CONFIG";
pub const ENV_PERMISSION_TOOL: &str = "AGENTDECK_PERMISSION_TOOL";
pub const ENV_LOG_FILE: &str = "AGENTDECK_LOG_FILE";

/// Directory under the platform data dir holding the log file.
pub const APP_DIR: &str = "agentdeck";
pub const LOG_FILE_NAME: &str = "agentdeck.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Agent executable
    pub agent_bin: PathBuf,
    /// Model override; `None` lets the agent choose
    pub model: Option<String>,
    pub mcp_config: PathBuf,
    /// Permission-approval hook passed to the agent
    pub permission_tool: String,
    /// Explicit log file; `None` means the default location
    pub log_file: Option<PathBuf>,
    /// Line mode instead of the dashboard
    pub headless: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            agent_bin: PathBuf::from(DEFAULT_AGENT_BIN),
            model: None,
            mcp_config: PathBuf::from(DEFAULT_MCP_CONFIG),
            permission_tool: DEFAULT_PERMISSION_TOOL.to_string(),
            log_file: None,
            headless: false,
        }
    }
}

impl AppConfig {
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration from an arbitrary variable lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut builder = Self::builder();
        if let Some(bin) = get(ENV_AGENT_BIN) {
            builder = builder.with_agent_bin(bin);
        }
        if let Some(model) = get(ENV_MODEL) {
            builder = builder.with_model(model);
        }
        if let Some(path) = get(ENV_MCP_CONFIG) {
            builder = builder.with_mcp_config(path);
        }
        if let Some(tool) = get(ENV_PERMISSION_TOOL) {
            builder = builder.with_permission_tool(tool);
        }
        if let Some(path) = get(ENV_LOG_FILE) {
            builder = builder.with_log_file(path);
        }
        builder.build()
    }

    /// Apply command-line overrides.
    pub fn with_cli(self, options: &CliOptions) -> Self {
        let mut builder = AppConfigBuilder { config: self };
        if let Some(bin) = &options.agent_bin {
            builder = builder.with_agent_bin(bin.clone());
        }
        if let Some(model) = &options.model {
            builder = builder.with_model(model.clone());
        }
        if let Some(path) = &options.mcp_config {
            builder = builder.with_mcp_config(path.clone());
        }
        if let Some(path) = &options.log_file {
            builder = builder.with_log_file(path.clone());
        }
        if options.headless {
            builder = builder.with_headless(true);
        }
        builder.build()
    }

    /// Where logs go: the explicit file, else `<data dir>/agentdeck/agentdeck.log`.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR).join(LOG_FILE_NAME)))
    }

    /// The invocation template for the session runner.
    pub fn agent_command(&self) -> AgentCommand {
        AgentCommand {
            program: self.agent_bin.clone(),
            mcp_config: self.mcp_config.clone(),
            permission_tool: self.permission_tool.clone(),
            model: self.model.clone(),
        }
    }

    /// Read-only copy for the settings view.
    pub fn settings_info(&self) -> SettingsInfo {
        SettingsInfo {
            agent_bin: self.agent_bin.display().to_string(),
            mcp_config: self.mcp_config.display().to_string(),
            permission_tool: self.permission_tool.clone(),
            model: self.model.clone(),
            log_file: self.log_path().map(|p| p.display().to_string()),
        }
    }
}

/// Builder for [`AppConfig`], starting from the defaults.
#[derive(Debug, Clone, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn with_agent_bin(mut self, bin: impl Into<PathBuf>) -> Self {
        self.config.agent_bin = bin.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn with_mcp_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.mcp_config = path.into();
        self
    }

    pub fn with_permission_tool(mut self, tool: impl Into<String>) -> Self {
        self.config.permission_tool = tool.into();
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_file = Some(path.into());
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
