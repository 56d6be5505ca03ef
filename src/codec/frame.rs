//! Telemetry frame wire layout
//!
//! Frame format (little-endian):
//! - MARKER (2 bytes): 0x55 0x55 start-of-frame
//! - VERSION (1 byte): 0x00
//! - TYPE (1 byte): packet type, 0x00 = telemetry
//! - VFB (2 bytes): primary ADC reading, raw counts
//! - PRESSURE (2 or 4 bytes): raw, divide by 100
//! - TEMPERATURE (2 or 4 bytes): raw, divide by 100
//! - CHECK (2 bytes): integrity check over all preceding bytes

use serde::{Deserialize, Serialize};

/// Start-of-frame marker
pub const MARKER: [u8; 2] = [0x55, 0x55];

/// The only supported protocol version
pub const PROTOCOL_VERSION: u8 = 0x00;

/// Fixed-point divisor for secondary channels (raw / 100 = engineering units)
pub const SCALE_DIVISOR: f64 = 100.0;

/// Bytes before the first payload field (marker + version + type)
pub const HEADER_LEN: usize = 4;

/// Width of the trailing integrity check field
pub const CHECK_LEN: usize = 2;

/// Largest frame any layout produces
pub const MAX_FRAME_LEN: usize = FrameLayout::U32.frame_len();

const OFFSET_VERSION: usize = 2;
const OFFSET_TYPE: usize = 3;
const OFFSET_VFB: usize = 4;
const OFFSET_SECONDARY: usize = 6;

/// Width of the secondary channel fields
///
/// Two firmware variants exist in the field. Producer and decoder must agree;
/// the width is a deployment setting, never negotiated on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameLayout {
    /// 16-bit pressure/temperature (12-byte frame)
    #[default]
    U16,
    /// 32-bit pressure/temperature (16-byte frame)
    U32,
}

impl FrameLayout {
    /// Width in bytes of one secondary field
    pub const fn secondary_width(self) -> usize {
        match self {
            FrameLayout::U16 => 2,
            FrameLayout::U32 => 4,
        }
    }

    /// Total frame length on the wire
    pub const fn frame_len(self) -> usize {
        HEADER_LEN + 2 + 2 * self.secondary_width() + CHECK_LEN
    }

    /// Offset of the integrity check field
    pub const fn check_offset(self) -> usize {
        self.frame_len() - CHECK_LEN
    }
}

/// Packet type discriminant (byte 3 of the frame)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PacketType {
    /// Periodic sensor telemetry (0x00)
    Telemetry,
    /// Any other type byte; decoded with the telemetry shape and carried through
    Unknown(u8),
}

const TYPE_TELEMETRY: u8 = 0x00;

impl PacketType {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            TYPE_TELEMETRY => PacketType::Telemetry,
            other => PacketType::Unknown(other),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            PacketType::Telemetry => TYPE_TELEMETRY,
            PacketType::Unknown(b) => b,
        }
    }
}

/// One decoded sensor snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryFrame {
    pub version: u8,
    pub packet_type: PacketType,
    /// Vibration feedback ADC counts
    pub vfb: u16,
    /// Raw pressure, hundredths of a unit
    pub pressure_raw: u32,
    /// Raw temperature, hundredths of a degree
    pub temperature_raw: u32,
    /// Integrity check as received
    pub check: u16,
}

impl TelemetryFrame {
    /// Build a telemetry-type frame with a zero check field
    pub fn new(vfb: u16, pressure_raw: u32, temperature_raw: u32) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            packet_type: PacketType::Telemetry,
            vfb,
            pressure_raw,
            temperature_raw,
            check: 0,
        }
    }

    /// Pressure in engineering units
    pub fn pressure(&self) -> f64 {
        scale(self.pressure_raw)
    }

    /// Temperature in engineering units
    pub fn temperature(&self) -> f64 {
        scale(self.temperature_raw)
    }

    /// Parse a complete frame buffer
    ///
    /// `buf` must be exactly `layout.frame_len()` bytes long. Header bytes are
    /// not re-validated here; that is the decoder's job.
    pub fn parse(layout: FrameLayout, buf: &[u8]) -> Option<Self> {
        if buf.len() != layout.frame_len() {
            return None;
        }

        let width = layout.secondary_width();
        let pressure_at = OFFSET_SECONDARY;
        let temperature_at = OFFSET_SECONDARY + width;

        Some(Self {
            version: buf[OFFSET_VERSION],
            packet_type: PacketType::from_byte(buf[OFFSET_TYPE]),
            vfb: read_u16(buf, OFFSET_VFB),
            pressure_raw: read_secondary(buf, pressure_at, layout),
            temperature_raw: read_secondary(buf, temperature_at, layout),
            check: read_u16(buf, layout.check_offset()),
        })
    }

    /// Encode into `output` using the given layout
    ///
    /// Secondary values wider than the layout allows are truncated to the low
    /// 16 bits for `FrameLayout::U16`. The check field is written as stored;
    /// use `Integrity::seal` to fill it with a real checksum.
    pub fn encode_into(&self, layout: FrameLayout, output: &mut Vec<u8>) {
        output.extend_from_slice(&MARKER);
        output.push(self.version);
        output.push(self.packet_type.to_byte());
        output.extend_from_slice(&self.vfb.to_le_bytes());
        for raw in [self.pressure_raw, self.temperature_raw] {
            match layout {
                FrameLayout::U16 => output.extend_from_slice(&(raw as u16).to_le_bytes()),
                FrameLayout::U32 => output.extend_from_slice(&raw.to_le_bytes()),
            }
        }
        output.extend_from_slice(&self.check.to_le_bytes());
    }

    /// Encode into a fresh buffer
    pub fn to_bytes(&self, layout: FrameLayout) -> Vec<u8> {
        let mut out = Vec::with_capacity(layout.frame_len());
        self.encode_into(layout, &mut out);
        out
    }
}

/// Convert a raw fixed-point reading to engineering units
#[inline]
pub fn scale(raw: u32) -> f64 {
    raw as f64 / SCALE_DIVISOR
}

#[inline]
fn read_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

#[inline]
fn read_secondary(buf: &[u8], at: usize, layout: FrameLayout) -> u32 {
    match layout {
        FrameLayout::U16 => read_u16(buf, at) as u32,
        FrameLayout::U32 => u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]),
    }
}
