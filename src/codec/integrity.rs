//! Frame integrity checking
//!
//! The device firmware reserves a 2-byte check field but has never filled it,
//! so verification is off by default. When enabled, the checksum covers every
//! byte before the check field and is compared against its little-endian value.

use super::frame::{FrameLayout, CHECK_LEN};
use crc::{Crc, CRC_16_IBM_3740, CRC_16_MODBUS};
use serde::{Deserialize, Serialize};

const CRC16_CCITT: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);
const CRC16_MODBUS: Crc<u16> = Crc::<u16>::new(&CRC_16_MODBUS);

/// Integrity check applied to complete frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Integrity {
    /// Accept every correctly framed record
    #[default]
    None,
    /// CRC-16/CCITT-FALSE (poly 0x1021, init 0xFFFF)
    Crc16Ccitt,
    /// CRC-16/MODBUS (poly 0x8005 reflected, init 0xFFFF)
    Crc16Modbus,
}

impl Integrity {
    /// Checksum of `data`, or `None` when verification is disabled
    pub fn checksum(self, data: &[u8]) -> Option<u16> {
        match self {
            Integrity::None => None,
            Integrity::Crc16Ccitt => Some(CRC16_CCITT.checksum(data)),
            Integrity::Crc16Modbus => Some(CRC16_MODBUS.checksum(data)),
        }
    }

    /// Verify a complete frame buffer
    pub fn verify(self, frame: &[u8]) -> bool {
        if frame.len() < CHECK_LEN {
            return false;
        }
        let (body, tail) = frame.split_at(frame.len() - CHECK_LEN);
        match self.checksum(body) {
            None => true,
            Some(expected) => u16::from_le_bytes([tail[0], tail[1]]) == expected,
        }
    }

    /// Overwrite the check field of an encoded frame with a valid checksum
    ///
    /// No-op for `Integrity::None` or a buffer of the wrong length.
    pub fn seal(self, layout: FrameLayout, frame: &mut [u8]) {
        if frame.len() != layout.frame_len() {
            return;
        }
        let at = layout.check_offset();
        if let Some(sum) = self.checksum(&frame[..at]) {
            frame[at..].copy_from_slice(&sum.to_le_bytes());
        }
    }
}
