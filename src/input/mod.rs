//! Keyboard input handling.
//!
//! ```text
//! KeyEvent -> CommandRegistry::dispatch() -> Command -> App::execute_command()
//! ```
//!
//! - [`command`] - The [`Command`] enum with all user actions
//! - [`context`] - [`InputContext`], the state the key map depends on
//! - [`keybindings`] - Default key binding configuration
//! - [`registry`] - [`CommandRegistry`] for mapping keys to commands
//! - [`slash_command`] - Line-mode `/` commands

pub mod command;
pub mod context;
pub mod keybindings;
pub mod registry;
pub mod slash_command;

pub use command::Command;
pub use context::InputContext;
pub use keybindings::{KeyCombo, KeybindingConfig};
pub use registry::CommandRegistry;
pub use slash_command::SlashCommand;
