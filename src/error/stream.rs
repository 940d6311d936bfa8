//! Errors raised while decoding the agent's newline-delimited JSON feed.

use std::fmt;

/// Maximum number of characters of a raw line kept for display.
const RAW_PREVIEW_CHARS: usize = 200;

/// Decoding failures for a single stream line.
///
/// Neither variant is fatal: the offending line is reported and the decoder
/// moves on to the next one.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// The line is not valid JSON.
    Decode { line: String, message: String },

    /// The line is JSON but does not have the shape its `type` requires.
    Protocol {
        kind: String,
        line: String,
        message: String,
    },
}

impl StreamError {
    pub fn decode(line: &str, err: impl fmt::Display) -> Self {
        StreamError::Decode {
            line: line.to_string(),
            message: err.to_string(),
        }
    }

    pub fn protocol(kind: &str, line: &str, err: impl fmt::Display) -> Self {
        StreamError::Protocol {
            kind: kind.to_string(),
            line: line.to_string(),
            message: err.to_string(),
        }
    }

    /// The raw line that failed to decode.
    pub fn raw_line(&self) -> &str {
        match self {
            StreamError::Decode { line, .. } | StreamError::Protocol { line, .. } => line,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::Decode { line, .. } => {
                format!("parse error: {}", preview(line))
            }
            StreamError::Protocol { kind, message, .. } => {
                format!("unexpected {} event: {}", kind, message)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::Decode { .. } => "E_STREAM_DECODE",
            StreamError::Protocol { .. } => "E_STREAM_PROTOCOL",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Decode { message, .. } => {
                write!(f, "Malformed stream line: {}", message)
            }
            StreamError::Protocol { kind, message, .. } => {
                write!(f, "Unexpected shape for {} event: {}", kind, message)
            }
        }
    }
}

impl std::error::Error for StreamError {}

fn preview(line: &str) -> String {
    if line.chars().count() <= RAW_PREVIEW_CHARS {
        return line.to_string();
    }
    let cut: String = line.chars().take(RAW_PREVIEW_CHARS).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_user_message_contains_raw_line() {
        let err = StreamError::decode("not json", "expected value");
        assert_eq!(err.user_message(), "parse error: not json");
        assert_eq!(err.raw_line(), "not json");
        assert_eq!(err.error_code(), "E_STREAM_DECODE");
    }

    #[test]
    fn test_long_lines_are_previewed() {
        let line = "x".repeat(500);
        let err = StreamError::decode(&line, "boom");
        let msg = err.user_message();
        assert!(msg.ends_with("..."));
        assert!(msg.len() < 300);
        // The raw line itself is kept intact.
        assert_eq!(err.raw_line().len(), 500);
    }

    #[test]
    fn test_protocol_display() {
        let err = StreamError::protocol("assistant", "{}", "missing field `message`");
        assert_eq!(
            err.to_string(),
            "Unexpected shape for assistant event: missing field `message`"
        );
    }
}
