//! agentdeck - a terminal dashboard for a streaming agent CLI
//!
//! The library holds everything except process startup so integration
//! tests can drive the decoder, the bus, the runner and the app state
//! directly.

pub mod agent;
pub mod app;
pub mod bus;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod headless;
pub mod input;
pub mod logging;
pub mod markdown;
pub mod models;
pub mod session;
pub mod shutdown;
pub mod stream;
pub mod summary;
pub mod terminal;
pub mod ui;
