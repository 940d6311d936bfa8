//! Line decoder for the agent's stream-json output.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::events::StreamLine;
use crate::error::StreamError;

/// Text of one raw line as split on `\n`.
///
/// A trailing `\r` is dropped and invalid UTF-8 becomes U+FFFD, so a bad
/// byte spoils only its own line.
pub fn line_from_bytes(mut bytes: Vec<u8>) -> String {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Decode one line of agent stdout.
///
/// Whitespace-only lines decode to [`StreamLine::Blank`]. Lines that are not
/// JSON are [`StreamError::Decode`]; JSON without the shape its `type`
/// demands is [`StreamError::Protocol`]. Unknown types are not errors.
pub fn decode_line(line: &str) -> Result<StreamLine, StreamError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(StreamLine::Blank);
    }

    let value: Value =
        serde_json::from_str(trimmed).map_err(|e| StreamError::decode(trimmed, e))?;

    let kind = match value.as_object() {
        Some(obj) => match obj.get("type").and_then(Value::as_str) {
            Some(kind) => kind.to_string(),
            None => {
                return Err(StreamError::protocol(
                    "unknown",
                    trimmed,
                    "missing string field `type`",
                ))
            }
        },
        None => {
            return Err(StreamError::protocol(
                "unknown",
                trimmed,
                "expected a JSON object",
            ))
        }
    };

    match kind.as_str() {
        "system" => {
            let subtype = value
                .get("subtype")
                .and_then(Value::as_str)
                .map(str::to_string);
            if subtype.as_deref() == Some("init") {
                Ok(StreamLine::SystemInit(typed(&kind, trimmed, value)?))
            } else {
                Ok(StreamLine::System { subtype })
            }
        }
        "assistant" => Ok(StreamLine::Assistant(typed(&kind, trimmed, value)?)),
        "user" => Ok(StreamLine::User(typed(&kind, trimmed, value)?)),
        "result" => Ok(StreamLine::Result(typed(&kind, trimmed, value)?)),
        _ => Ok(StreamLine::Unknown(kind)),
    }
}

fn typed<T: DeserializeOwned>(kind: &str, line: &str, value: Value) -> Result<T, StreamError> {
    serde_json::from_value(value).map_err(|e| StreamError::protocol(kind, line, e))
}
