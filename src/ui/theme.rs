//! UI theme constants - Minimalist dark theme

use ratatui::style::{Color, Style};
use sensor_grapher::telemetry::Channel;

// Base colors - muted grays
pub const COLOR_DIM: Color = Color::Rgb(80, 80, 80); // Very dim gray for borders, secondary
pub const COLOR_MUTED: Color = Color::Rgb(120, 120, 120); // Muted gray for labels
pub const COLOR_TEXT: Color = Color::Rgb(180, 180, 180); // Normal text
pub const COLOR_BRIGHT: Color = Color::Rgb(220, 220, 220); // Bright text for emphasis

// Accent colors - used sparingly
pub const COLOR_ACCENT: Color = Color::Rgb(100, 180, 220); // Cyan-ish for keys
pub const COLOR_SUCCESS: Color = Color::Rgb(100, 180, 100);
pub const COLOR_WARNING: Color = Color::Yellow;
pub const COLOR_ERROR: Color = Color::Red;

// Semantic aliases
pub const COLOR_BORDER: Color = COLOR_DIM;
pub const COLOR_TITLE: Color = COLOR_BRIGHT;
pub const COLOR_LABEL: Color = COLOR_MUTED;
pub const COLOR_VALUE: Color = COLOR_TEXT;

// Connection states
pub const COLOR_CONNECTED: Color = COLOR_SUCCESS;
pub const COLOR_WAITING: Color = COLOR_WARNING;
pub const COLOR_DISCONNECTED: Color = COLOR_MUTED;

// Action bar
pub const STYLE_KEY: Style = Style::new().fg(COLOR_ACCENT);
pub const STYLE_ACTION: Style = Style::new().fg(COLOR_MUTED);
pub const STYLE_DIM: Style = Style::new().fg(COLOR_DIM);

// Status symbols
pub const SYMBOL_CONNECTED: &str = "●";
pub const SYMBOL_DISCONNECTED: &str = "○";
pub const SYMBOL_WAITING: &str = "◐";
pub const SYMBOL_ERROR: &str = "✖";

/// Trace color per channel
pub fn channel_color(channel: Channel) -> Color {
    match channel {
        Channel::Vfb => COLOR_ACCENT,
        Channel::Pressure => COLOR_SUCCESS,
        Channel::Temperature => Color::Rgb(220, 140, 80),
    }
}
