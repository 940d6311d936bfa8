//! Color theme constants for the dashboard.

use ratatui::style::Color;

/// Panel borders
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Focused panel border and highlights
pub const COLOR_ACCENT: Color = Color::Cyan;

/// Title bar text
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Section labels in the side panel
pub const COLOR_LABEL: Color = Color::Gray;

// ============================================================================
// Message Colors
// ============================================================================

pub const COLOR_USER: Color = Color::LightBlue;

pub const COLOR_SYSTEM: Color = Color::Gray;

pub const COLOR_ERROR: Color = Color::Red;

// ============================================================================
// Tool Colors
// ============================================================================

/// Tool icon color - blue
pub const COLOR_TOOL_ICON: Color = Color::Rgb(0, 122, 204); // blue #007ACC

/// Tool running state - gray
pub const COLOR_TOOL_RUNNING: Color = Color::Rgb(128, 128, 128);

/// Tool success state - green
pub const COLOR_TOOL_SUCCESS: Color = Color::Rgb(4, 181, 117); // green #04B575

/// Tool error state - red
pub const COLOR_TOOL_ERROR: Color = Color::Red;

// ============================================================================
// Input Mode Colors
// ============================================================================

pub const COLOR_MODE_NORMAL: Color = Color::Yellow;

pub const COLOR_MODE_INSERT: Color = Color::LightGreen;

pub const COLOR_LOADING: Color = Color::Yellow;
