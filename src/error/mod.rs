//! Error taxonomy for agentdeck.
//!
//! | Kind | Raised by | Treatment |
//! |------|-----------|-----------|
//! | [`StreamError::Decode`] | line decoder | `Error` event, line skipped |
//! | [`StreamError::Protocol`] | line decoder | `Error` event, line skipped |
//! | [`ProcessError`] | agent invocation | `Error` event, no retry |
//! | result error | agent `result` line | `Error` event plus inline message |
//! | [`RenderError`] | markdown renderer | unstyled fallback |
//!
//! Only startup failures (see `main.rs`) end the process.

mod process;
mod render;
mod stream;

pub use process::ProcessError;
pub use render::RenderError;
pub use stream::StreamError;
