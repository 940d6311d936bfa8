//! Slash commands accepted by the line-mode front end.

/// A `/` command typed in place of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    /// Start a new conversation
    /// Primary: /new
    /// Aliases: /clear
    New,

    /// Set the model for later prompts; no argument restores the default
    /// Primary: /model
    Model(Option<String>),

    /// Print the session identifier, model, chain and counters
    /// Primary: /session
    /// Aliases: /stats
    Session,

    /// List the commands
    /// Primary: /help
    Help,

    /// Quit
    /// Primary: /exit
    /// Aliases: /quit
    Exit,

    /// Anything else starting with `/`
    Unknown(String),
}

impl SlashCommand {
    /// Parse a line of input.
    ///
    /// Returns `None` when the line is an ordinary prompt.
    ///
    /// ```
    /// use agentdeck::input::SlashCommand;
    ///
    /// assert_eq!(SlashCommand::parse("/new"), Some(SlashCommand::New));
    /// assert_eq!(
    ///     SlashCommand::parse("/model opus"),
    ///     Some(SlashCommand::Model(Some("opus".to_string())))
    /// );
    /// assert_eq!(SlashCommand::parse("hello"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let rest = trimmed.strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let command = match name.to_lowercase().as_str() {
            "new" | "clear" => SlashCommand::New,
            "model" => SlashCommand::Model((!arg.is_empty()).then(|| arg.to_string())),
            "session" | "stats" => SlashCommand::Session,
            "help" => SlashCommand::Help,
            "exit" | "quit" => SlashCommand::Exit,
            _ => SlashCommand::Unknown(trimmed.to_string()),
        };
        Some(command)
    }

    /// Usage lines for `/help`.
    pub fn help_lines() -> &'static [&'static str] {
        &[
            "/new            start a new conversation",
            "/model [name]   set the model (no name restores the default)",
            "/session        show session id, model, chain and usage",
            "/help           show this list",
            "/exit           quit",
        ]
    }
}
