//! Input event handling
//!
//! Translates keyboard events into app commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Command to execute on the App
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    Quit,
    /// Open or close the serial port
    ToggleConnection,
    /// Freeze the charts; frames are still decoded
    TogglePause,
    /// Clear every channel window
    ResetSeries,
    None,
}

/// Translate a key press into an AppCommand
pub fn translate_key(key: KeyEvent) -> AppCommand {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => AppCommand::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => AppCommand::Quit,

        KeyCode::Char('c') | KeyCode::Char('C') => AppCommand::ToggleConnection,
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => AppCommand::TogglePause,
        KeyCode::Char('r') | KeyCode::Char('R') => AppCommand::ResetSeries,

        _ => AppCommand::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(translate_key(key(KeyCode::Char('q'))), AppCommand::Quit);
        assert_eq!(translate_key(key(KeyCode::Esc)), AppCommand::Quit);
        assert_eq!(
            translate_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            AppCommand::Quit
        );
    }

    #[test]
    fn test_connection_key() {
        assert_eq!(
            translate_key(key(KeyCode::Char('c'))),
            AppCommand::ToggleConnection
        );
    }

    #[test]
    fn test_pause_and_reset_keys() {
        assert_eq!(translate_key(key(KeyCode::Char('p'))), AppCommand::TogglePause);
        assert_eq!(translate_key(key(KeyCode::Char(' '))), AppCommand::TogglePause);
        assert_eq!(translate_key(key(KeyCode::Char('r'))), AppCommand::ResetSeries);
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(translate_key(key(KeyCode::Char('z'))), AppCommand::None);
    }
}
