//! Session identity and cumulative usage counters.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::stream::{ResultLine, Usage};

/// Identity of the current reasoning context and the chain of identities
/// seen so far in this conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub id: Option<String>,
    pub model: Option<String>,
    /// Append-only until a new conversation starts.
    pub chain: Vec<String>,
    pub started_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: None,
            model: None,
            chain: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Record the identifier returned by a successful result.
    pub fn advance(&mut self, id: &str) {
        self.id = Some(id.to_string());
        self.chain.push(id.to_string());
    }

    /// The identifier to resume from, if any.
    pub fn resume_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Cumulative resource counters for a conversation.
///
/// Every field only grows until the whole struct is reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct UsageStats {
    pub usage: Usage,
    pub duration_ms: u64,
    pub turns: u64,
    pub cost_usd: f64,
}

impl UsageStats {
    /// Add one successful result's counters.
    pub fn add_result(&mut self, result: &ResultLine) {
        self.usage.accumulate(&result.usage);
        self.duration_ms = self.duration_ms.saturating_add(result.duration_ms);
        self.turns = self.turns.saturating_add(result.num_turns);
        // Negative costs would break monotonicity.
        if result.total_cost_usd.is_finite() && result.total_cost_usd > 0.0 {
            self.cost_usd += result.total_cost_usd;
        }
    }

    pub fn total_tokens(&self) -> u64 {
        self.usage.total()
    }
}
