//! Text printed when the program exits.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::session::{Session, UsageStats};

pub const SUMMARY_HEADER: &str = "=== Conversation Summary ===";

/// Format the cumulative summary as of `now`.
pub fn format_summary(session: &Session, stats: &UsageStats, now: DateTime<Utc>) -> String {
    let elapsed = (now - session.started_at).num_seconds().max(0);
    let usage = &stats.usage;

    let mut out = String::new();
    let _ = writeln!(out, "{SUMMARY_HEADER}");
    let _ = writeln!(out, "Duration: {elapsed}s");
    let _ = writeln!(out, "Sessions: {}", session.chain.len());
    let _ = writeln!(out, "Total Turns: {}", stats.turns);
    let _ = writeln!(out, "Total Cost: ${:.6}", stats.cost_usd);
    let _ = writeln!(out, "Token Usage:");
    let _ = writeln!(out, "  Input: {}", usage.input_tokens);
    let _ = writeln!(out, "  Cache Creation: {}", usage.cache_creation_input_tokens);
    let _ = writeln!(out, "  Cache Read: {}", usage.cache_read_input_tokens);
    let _ = writeln!(out, "  Output: {}", usage.output_tokens);
    let _ = writeln!(out, "  Total: {}", usage.total());

    if session.chain.len() > 1 {
        let _ = writeln!(out, "Session Chain:");
        for (i, id) in session.chain.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, id);
        }
    }
    out
}
