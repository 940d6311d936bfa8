//! Panic hook for terminal restoration.

use super::setup::emergency_restore;
use std::panic;

/// Install a panic hook that leaves dashboard mode before the default hook
/// prints the panic, so the message lands on a usable terminal.
///
/// Call this before creating the [`super::TerminalManager`].
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        emergency_restore();
        original_hook(panic_info);
    }));
}
