//! Application state types
//!
//! Contains the state snapshot used for rendering and the connection enum.

use sensor_grapher::codec::{DecoderStats, FrameLayout, Integrity};
use sensor_grapher::stats::Rates;

/// Serial connection state at runtime
#[derive(Debug, Clone, PartialEq)]
pub enum Connection {
    /// Reader thread running on this port
    Connected { port: String },
    /// Port lost or failed to open; retrying
    Waiting { port: String },
    /// Closed by the user
    Disconnected,
    /// No port given on the command line or in the config
    NoPort,
}

impl Connection {
    pub fn is_open(&self) -> bool {
        matches!(self, Connection::Connected { .. })
    }
}

/// Application state snapshot for rendering (zero-copy)
///
/// A borrowed view of the application state, designed for
/// efficient UI rendering without cloning data.
#[derive(Clone)]
pub struct AppState<'a> {
    pub connection: &'a Connection,
    pub baud_rate: u32,
    pub layout: FrameLayout,
    pub integrity: Integrity,
    pub rates: Rates,
    pub decoder: DecoderStats,
    pub rx_bytes: u64,
    pub paused: bool,
    pub status_message: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_is_open() {
        let connected = Connection::Connected {
            port: "COM3".to_string(),
        };
        assert!(connected.is_open());
        assert!(!Connection::Disconnected.is_open());
        assert!(!Connection::NoPort.is_open());
        assert!(!Connection::Waiting {
            port: "COM3".to_string()
        }
        .is_open());
    }

    #[test]
    fn test_connection_equality() {
        let a = Connection::Connected {
            port: "COM3".to_string(),
        };
        let b = Connection::Connected {
            port: "COM3".to_string(),
        };
        let c = Connection::Connected {
            port: "COM4".to_string(),
        };

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
