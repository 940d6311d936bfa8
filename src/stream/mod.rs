//! Decoding of the agent's newline-delimited JSON stream.

pub mod events;
pub mod parser;

pub use events::{
    AssistantLine, ContentBlock, ResultLine, ResultOutcome, StreamLine, SystemInitLine, Usage,
    UserLine,
};
pub use parser::{decode_line, line_from_bytes};
