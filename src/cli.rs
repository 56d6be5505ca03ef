//! Command-line interface definition using clap
//!
//! Provides structured argument parsing with automatic help generation.
//! Every option overrides the matching config file value.

use clap::{Parser, ValueEnum};
use sensor_grapher::codec::{FrameLayout, Integrity};
use sensor_grapher::config::Config;
use std::path::PathBuf;

// =============================================================================
// CLI Definition
// =============================================================================

/// Live grapher for serial vibration/pressure/temperature telemetry
#[derive(Parser, Debug, Default)]
#[command(name = "sensor-grapher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose debug output (stderr in headless mode, the log file in TUI mode)
    #[arg(short, long)]
    pub verbose: bool,

    /// Run without the TUI, reporting frames on the console
    #[arg(long)]
    pub headless: bool,

    /// In headless mode, print one JSON object per frame on stdout
    #[arg(long, requires = "headless")]
    pub json: bool,

    /// Serial port to use (overrides config)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<String>,

    /// Baud rate (default: 115200)
    #[arg(short, long, value_name = "BAUD")]
    pub baud: Option<u32>,

    /// Width of the pressure/temperature fields in the device firmware
    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Checksum to verify before accepting a frame
    #[arg(long, value_enum)]
    pub integrity: Option<IntegrityArg>,

    /// Samples kept per channel (default: 1000)
    #[arg(short, long, value_name = "SAMPLES")]
    pub window: Option<usize>,

    /// Config file (default: config.toml next to the executable)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the effective settings to the config file and exit
    #[arg(long)]
    pub save_config: bool,

    /// List the serial ports present on this machine and exit
    #[arg(long)]
    pub list_ports: bool,

    /// Log file for TUI mode (default: sensor-grapher.log next to the executable)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutArg {
    U16,
    U32,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityArg {
    None,
    Crc16Ccitt,
    Crc16Modbus,
}

impl From<LayoutArg> for FrameLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::U16 => FrameLayout::U16,
            LayoutArg::U32 => FrameLayout::U32,
        }
    }
}

impl From<IntegrityArg> for Integrity {
    fn from(arg: IntegrityArg) -> Self {
        match arg {
            IntegrityArg::None => Integrity::None,
            IntegrityArg::Crc16Ccitt => Integrity::Crc16Ccitt,
            IntegrityArg::Crc16Modbus => Integrity::Crc16Modbus,
        }
    }
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply(&self, config: &mut Config) {
        if let Some(port) = &self.port {
            config.serial.port = port.clone();
        }
        if let Some(baud) = self.baud {
            config.serial.baud_rate = baud;
        }
        if let Some(layout) = self.layout {
            config.frame.layout = layout.into();
        }
        if let Some(integrity) = self.integrity {
            config.frame.integrity = integrity.into();
        }
        if let Some(window) = self.window {
            config.display.window = window;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
