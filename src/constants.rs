//! Application-wide constants
//!
//! Centralized constants to avoid duplication and ensure consistency.

// =============================================================================
// Serial
// =============================================================================

/// Default baud rate of the sensor board
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Read timeout for the blocking serial reader (milliseconds)
pub const SERIAL_READ_TIMEOUT_MS: u64 = 10;

/// Serial read buffer size
pub const SERIAL_BUFFER_SIZE: usize = 1024;

/// Consecutive zero-byte reads before assuming port disconnected
pub const SERIAL_DISCONNECT_THRESHOLD: u32 = 10;

// =============================================================================
// Display
// =============================================================================

/// Default number of samples kept per channel
pub const DEFAULT_WINDOW: usize = 1000;

// =============================================================================
// Timing
// =============================================================================

/// Delay between serial reconnection attempts (seconds)
pub const RECONNECT_DELAY_SECS: u64 = 2;

/// Status message display timeout (seconds)
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 2;

/// Minimum interval between rate updates (seconds)
pub const RATE_UPDATE_MIN_INTERVAL_SECS: f64 = 0.1;

/// Frame duration for TUI loop (milliseconds, ~30 FPS)
pub const FRAME_DURATION_MS: u64 = 33;

// =============================================================================
// Buffers
// =============================================================================

/// Channel capacity between the serial reader and the decoder
pub const CHANNEL_CAPACITY: usize = 256;
