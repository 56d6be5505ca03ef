//! Serial transport for the sensor board
//!
//! A blocking reader thread pulls bytes off the port with a short timeout and
//! forwards each chunk to a channel. The thread stops when:
//! - `shutdown` flag is set
//! - Serial port disconnects (detected via consecutive empty reads)
//! - A read error occurs
//! - The receiving side is dropped

use super::Transport;
use crate::constants::{
    CHANNEL_CAPACITY, SERIAL_BUFFER_SIZE, SERIAL_DISCONNECT_THRESHOLD, SERIAL_READ_TIMEOUT_MS,
};
use crate::error::{GrapherError, Result};
use bytes::Bytes;
use serialport::{DataBits, FlowControl, Parity, SerialPortType, StopBits};
use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Serial transport reading 8N1 at a fixed baud rate
///
/// # Example
///
/// ```ignore
/// let transport = SerialTransport::new("/dev/ttyACM0", 115_200);
/// let mut rx = transport.spawn(shutdown)?;
/// while let Some(chunk) = rx.recv().await {
///     pipeline.ingest(&chunk);
/// }
/// ```
pub struct SerialTransport {
    port_name: String,
    baud_rate: u32,
}

impl SerialTransport {
    /// Create a new serial transport for the specified port
    pub fn new(port_name: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            port_name: port_name.into(),
            baud_rate,
        }
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Open a serial port with the sensor's line settings
    pub fn open(port_name: &str, baud_rate: u32) -> Result<Box<dyn serialport::SerialPort>> {
        serialport::new(port_name, baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(Duration::from_millis(SERIAL_READ_TIMEOUT_MS))
            .open()
            .map_err(|e| GrapherError::SerialOpen {
                port: port_name.to_string(),
                source: std::io::Error::other(e.to_string()),
            })
    }
}

/// One serial port known to the system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortListing {
    pub name: String,
    pub description: String,
}

/// List the serial ports currently present
pub fn available_ports() -> Result<Vec<PortListing>> {
    let ports = serialport::available_ports().map_err(|e| GrapherError::Runtime {
        source: std::io::Error::other(e.to_string()),
    })?;

    Ok(ports
        .into_iter()
        .map(|p| PortListing {
            description: describe(&p.port_type),
            name: p.port_name,
        })
        .collect())
}

fn describe(port_type: &SerialPortType) -> String {
    match port_type {
        SerialPortType::UsbPort(usb) => {
            let mut text = format!("USB {:04x}:{:04x}", usb.vid, usb.pid);
            if let Some(product) = &usb.product {
                text.push(' ');
                text.push_str(product);
            }
            text
        }
        SerialPortType::PciPort => "PCI".to_string(),
        SerialPortType::BluetoothPort => "Bluetooth".to_string(),
        SerialPortType::Unknown => String::new(),
    }
}

impl Transport for SerialTransport {
    fn spawn(self, shutdown: Arc<AtomicBool>) -> Result<mpsc::Receiver<Bytes>> {
        let (tx, rx) = mpsc::channel::<Bytes>(CHANNEL_CAPACITY);
        let mut port = Self::open(&self.port_name, self.baud_rate)?;
        let port_name = self.port_name;

        std::thread::spawn(move || {
            let mut buf = [0u8; SERIAL_BUFFER_SIZE];
            let mut empty_reads = 0u32;

            while !shutdown.load(Ordering::Relaxed) {
                match port.read(&mut buf) {
                    Ok(n) if n > 0 => {
                        empty_reads = 0;
                        if tx.blocking_send(Bytes::copy_from_slice(&buf[..n])).is_err() {
                            // Receiver dropped
                            break;
                        }
                    }
                    Ok(_) => {
                        // Zero bytes read - could be normal or port gone
                        empty_reads += 1;
                        if empty_reads > SERIAL_DISCONNECT_THRESHOLD {
                            warn!("{}: no data, assuming disconnected", port_name);
                            break;
                        }
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::TimedOut => {
                        empty_reads = 0;
                    }
                    Err(e) => {
                        warn!("{}: read failed: {}", port_name, e);
                        break;
                    }
                }
            }
            debug!("{}: reader stopped", port_name);
            // Channel closes when tx is dropped
        });

        Ok(rx)
    }
}
