//! Telemetry wire codec
//!
//! Separates wire concerns from everything else:
//! - **frame**: fixed field layout and fixed-point scaling
//! - **decoder**: marker/version state machine over the raw byte stream
//! - **integrity**: optional checksum verification of complete frames
//!
//! The codec does no I/O. Bytes come from a transport, frames go to whatever
//! owns the series buffers.

pub mod decoder;
pub mod frame;
pub mod integrity;

pub use decoder::{DecoderStats, FrameDecoder};
pub use frame::{FrameLayout, PacketType, TelemetryFrame};
pub use integrity::Integrity;
