//! Wire types for the agent's stream-json output.
//!
//! Each line of the agent's stdout is a JSON object with a `type` field.
//! Only the fields the dashboard consumes are modelled; everything else is
//! ignored by serde.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token counters reported on `result` lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub cache_creation_input_tokens: u64,
    #[serde(default)]
    pub cache_read_input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}

impl Usage {
    /// Sum of all four counters.
    pub fn total(&self) -> u64 {
        self.input_tokens
            + self.cache_creation_input_tokens
            + self.cache_read_input_tokens
            + self.output_tokens
    }

    /// Add another turn's usage into this one.
    pub fn accumulate(&mut self, other: &Usage) {
        self.input_tokens = self.input_tokens.saturating_add(other.input_tokens);
        self.cache_creation_input_tokens = self
            .cache_creation_input_tokens
            .saturating_add(other.cache_creation_input_tokens);
        self.cache_read_input_tokens = self
            .cache_read_input_tokens
            .saturating_add(other.cache_read_input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(other.output_tokens);
    }
}

/// `{"type":"system","subtype":"init", ...}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemInitLine {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub tools: Vec<Value>,
}

/// `{"type":"assistant","message":{...}}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssistantLine {
    pub message: AssistantMessage,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssistantMessage {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

/// One element of an assistant message's content list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        #[serde(default)]
        id: Option<String>,
        name: String,
        #[serde(default)]
        input: Value,
    },
    /// Thinking blocks and anything newer than this client.
    #[serde(other)]
    Other,
}

/// `{"type":"user", ...}`: the agent echoing a tool result back.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UserLine {
    #[serde(default)]
    pub message: Option<UserMessage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserMessage {
    #[serde(default)]
    pub content: UserContent,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UserContent {
    Text(String),
    Blocks(Vec<ToolResultBlock>),
}

impl Default for UserContent {
    fn default() -> Self {
        UserContent::Blocks(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolResultBlock {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub tool_use_id: Option<String>,
    #[serde(default)]
    pub is_error: bool,
}

impl UserLine {
    /// True when any tool result in this line reports an error.
    pub fn is_error(&self) -> bool {
        match self.message.as_ref().map(|m| &m.content) {
            Some(UserContent::Blocks(blocks)) => blocks
                .iter()
                .any(|b| b.kind == "tool_result" && b.is_error),
            _ => false,
        }
    }
}

/// `{"type":"result", ...}`: the end of one invocation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ResultLine {
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub is_error: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub num_turns: u64,
    #[serde(default)]
    pub total_cost_usd: f64,
    #[serde(default)]
    pub usage: Usage,
}

/// How a `result` line should be applied.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultOutcome {
    Success,
    Failure(String),
    /// Neither flagged as an error nor a success subtype.
    Other,
}

impl ResultLine {
    pub fn outcome(&self) -> ResultOutcome {
        if self.is_error {
            let text = self
                .result
                .clone()
                .or_else(|| self.subtype.clone())
                .unwrap_or_else(|| "unknown error".to_string());
            return ResultOutcome::Failure(text);
        }
        match self.subtype.as_deref() {
            Some("success") => ResultOutcome::Success,
            _ => ResultOutcome::Other,
        }
    }
}

/// A decoded stream line.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamLine {
    /// Whitespace-only line.
    Blank,
    SystemInit(SystemInitLine),
    /// Any `system` line other than `init`.
    System { subtype: Option<String> },
    Assistant(AssistantLine),
    User(UserLine),
    Result(ResultLine),
    /// A `type` this client does not handle.
    Unknown(String),
}
