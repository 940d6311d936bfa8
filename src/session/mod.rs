//! Session state: the accumulator, its counters, tool tracking, and the
//! actor that drives agent invocations.

mod accumulator;
mod runner;
mod stats;
mod tools;

pub use accumulator::SessionAccumulator;
pub use runner::{SessionCommand, SessionRunner};
pub use stats::{Session, UsageStats};
pub use tools::{describe_tool, ToolActivity, ToolExecution, ToolStatus, ToolTracker};
