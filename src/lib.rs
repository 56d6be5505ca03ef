//! Sensor Grapher - live telemetry from a serial sensor board
//!
//! Raw bytes from the device are split into fixed-length telemetry frames by
//! [`codec::FrameDecoder`], and each frame feeds one
//! [`series::WindowedSeries`] per channel for display.
//!
//! ```
//! use sensor_grapher::codec::{FrameLayout, Integrity, TelemetryFrame};
//! use sensor_grapher::telemetry::{Channel, Pipeline};
//!
//! let mut pipeline = Pipeline::new(FrameLayout::U16, Integrity::None, 1000);
//! let bytes = TelemetryFrame::new(812, 2550, 2137).to_bytes(FrameLayout::U16);
//!
//! let frames = pipeline.ingest(&bytes);
//! assert_eq!(frames.len(), 1);
//! assert_eq!(pipeline.channels().get(Channel::Pressure).latest(), Some(25.5));
//! ```

pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod series;
pub mod stats;
pub mod telemetry;
pub mod transport;
