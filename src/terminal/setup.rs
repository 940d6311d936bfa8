//! Entering and leaving dashboard mode.

use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Switch to the alternate screen in raw mode.
///
/// Also asks the terminal to disambiguate control keys so that Ctrl+M and
/// Ctrl+H arrive as themselves rather than as Enter and Backspace.
/// Terminals without the keyboard protocol ignore the request.
pub fn enter_tui_mode<W: Write>(writer: &mut W) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(writer, EnterAlternateScreen)?;
    let _ = execute!(
        writer,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
    );
    Ok(())
}

/// Undo [`enter_tui_mode`]. Safe to call more than once; errors are ignored
/// because this also runs on panic paths.
pub fn leave_tui_mode<W: Write>(writer: &mut W) {
    let _ = execute!(writer, PopKeyboardEnhancementFlags);
    let _ = disable_raw_mode();
    let _ = execute!(writer, LeaveAlternateScreen, Show);
    let _ = writer.flush();
}

/// Restore the real terminal from a context with no handle to it.
pub fn emergency_restore() {
    leave_tui_mode(&mut io::stdout());
}
