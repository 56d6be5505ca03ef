//! Transport abstraction for byte-level input
//!
//! Separates I/O concerns from decoding:
//! - **Transport**: How bytes arrive (serial port, test doubles...)
//! - **Codec**: How frames are recognized (handled separately)
//!
//! A transport pushes order-preserving chunks of whatever size the device
//! delivered. It never looks inside them.

pub mod serial;

pub use serial::{available_ports, PortListing, SerialTransport};

use bytes::Bytes;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::error::Result;

/// Trait for spawnable byte sources
///
/// A transport handles:
/// - Opening/closing the device
/// - Reading raw bytes
/// - Threading model (blocking or async)
///
/// A transport does NOT handle:
/// - Frame recognition (that's the decoder's job)
/// - Statistics or logging (that's the caller's job)
/// - Reconnection logic (that's the caller's job)
///
/// # Lifecycle
///
/// 1. Create transport with configuration
/// 2. Call `spawn()` to start reading in background
/// 3. Receive chunks from the returned channel
/// 4. Transport runs until:
///    - `shutdown` flag is set, OR
///    - A fatal error occurs (disconnect, etc.)
/// 5. Transport closes the channel when stopping
pub trait Transport: Send + 'static {
    /// Spawn the transport in background
    ///
    /// Returns the receiving end of the byte channel; `recv()` yields `None`
    /// once the transport has stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be initialized
    /// (e.g., port not found, permission denied).
    fn spawn(self, shutdown: Arc<AtomicBool>) -> Result<mpsc::Receiver<Bytes>>;
}
