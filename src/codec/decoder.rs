//! Byte-at-a-time frame decoder
//!
//! Hunts for the 0x55 0x55 marker, checks the version byte, then accumulates
//! the rest of the fixed-length frame. Any mismatch in the marker or version
//! drops the partial frame and the next byte starts a fresh search, so a
//! corrupted byte costs at most one frame attempt.

use super::frame::{FrameLayout, TelemetryFrame, MARKER, MAX_FRAME_LEN, PROTOCOL_VERSION};
use super::integrity::Integrity;

/// Running counters kept by the decoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderStats {
    /// Frames emitted
    pub frames: u64,
    /// Bytes dropped while searching for a marker
    pub skipped: u64,
    /// Partial frames abandoned at the marker or version stage
    pub resyncs: u64,
    /// Complete frames dropped by the integrity check
    pub integrity_failures: u64,
    /// Accumulations that overran the frame length
    pub overruns: u64,
}

/// Stateful decoder for the telemetry byte stream
///
/// One instance per byte source. Dropping it discards any partial frame.
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
    layout: FrameLayout,
    integrity: Integrity,
    stats: DecoderStats,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new(FrameLayout::default())
    }
}

impl FrameDecoder {
    /// Create a decoder for the given layout with integrity checking off
    pub fn new(layout: FrameLayout) -> Self {
        Self::with_integrity(layout, Integrity::None)
    }

    /// Create a decoder that verifies each frame before emitting it
    pub fn with_integrity(layout: FrameLayout, integrity: Integrity) -> Self {
        Self {
            buffer: Vec::with_capacity(MAX_FRAME_LEN + 1),
            layout,
            integrity,
            stats: DecoderStats::default(),
        }
    }

    pub fn layout(&self) -> FrameLayout {
        self.layout
    }

    pub fn integrity(&self) -> Integrity {
        self.integrity
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Number of bytes of the frame in progress
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Consume one byte, returning a frame if this byte completed one
    pub fn feed(&mut self, byte: u8) -> Option<TelemetryFrame> {
        match self.buffer.len() {
            0 => {
                if byte == MARKER[0] {
                    self.buffer.push(byte);
                } else {
                    self.stats.skipped += 1;
                }
                None
            }
            1 => {
                self.accept_if(byte == MARKER[1], byte);
                None
            }
            2 => {
                self.accept_if(byte == PROTOCOL_VERSION, byte);
                None
            }
            3 => {
                // Type byte: only telemetry is defined, others pass through
                self.buffer.push(byte);
                None
            }
            _ => {
                self.buffer.push(byte);
                self.complete()
            }
        }
    }

    /// Feed a chunk, calling `on_frame` for every frame it completes
    pub fn decode(&mut self, data: &[u8], mut on_frame: impl FnMut(TelemetryFrame)) {
        for &byte in data {
            if let Some(frame) = self.feed(byte) {
                on_frame(frame);
            }
        }
    }

    fn accept_if(&mut self, ok: bool, byte: u8) {
        if ok {
            self.buffer.push(byte);
        } else {
            self.stats.resyncs += 1;
            self.stats.skipped += self.buffer.len() as u64 + 1;
            self.buffer.clear();
        }
    }

    fn complete(&mut self) -> Option<TelemetryFrame> {
        let frame_len = self.layout.frame_len();

        if self.buffer.len() > frame_len {
            self.stats.overruns += 1;
            self.stats.skipped += self.buffer.len() as u64;
            self.buffer.clear();
            return None;
        }
        if self.buffer.len() < frame_len {
            return None;
        }

        let frame = if self.integrity.verify(&self.buffer) {
            TelemetryFrame::parse(self.layout, &self.buffer)
        } else {
            self.stats.integrity_failures += 1;
            None
        };
        self.buffer.clear();

        if frame.is_some() {
            self.stats.frames += 1;
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::PacketType;

    fn frame_bytes(vfb: u16, pressure: u32, temperature: u32) -> Vec<u8> {
        TelemetryFrame::new(vfb, pressure, temperature).to_bytes(FrameLayout::U16)
    }

    fn decode_all(decoder: &mut FrameDecoder, data: &[u8]) -> Vec<TelemetryFrame> {
        let mut frames = Vec::new();
        decoder.decode(data, |f| frames.push(f));
        frames
    }

    #[test]
    fn test_single_frame() {
        let mut decoder = FrameDecoder::default();
        let bytes = frame_bytes(1000, 2550, 2300);

        for &b in &bytes[..bytes.len() - 1] {
            assert!(decoder.feed(b).is_none());
        }
        let frame = decoder.feed(*bytes.last().unwrap()).unwrap();

        assert_eq!(frame.vfb, 1000);
        assert_eq!(frame.pressure(), 25.5);
        assert_eq!(frame.temperature(), 23.0);
        assert_eq!(decoder.pending(), 0);
        assert_eq!(decoder.stats().frames, 1);
    }

    #[test]
    fn test_back_to_back_frames() {
        let mut decoder = FrameDecoder::default();
        let mut stream = frame_bytes(1, 100, 200);
        stream.extend(frame_bytes(2, 300, 400));

        let frames = decode_all(&mut decoder, &stream);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].vfb, 1);
        assert_eq!(frames[1].vfb, 2);
        assert_eq!(frames[1].pressure_raw, 300);
    }

    #[test]
    fn test_garbage_before_frame() {
        let mut decoder = FrameDecoder::default();
        let expected = TelemetryFrame::new(42, 2550, 1999);
        let mut stream = vec![0x00, 0x13, 0xFF, 0x54, 0xAA, 0x01];
        stream.extend(expected.to_bytes(FrameLayout::U16));

        let frames = decode_all(&mut decoder, &stream);
        assert_eq!(frames, vec![expected]);
        assert_eq!(decoder.stats().skipped, 6);
    }

    #[test]
    fn test_embedded_marker_with_bad_version() {
        let mut decoder = FrameDecoder::default();
        let expected = TelemetryFrame::new(7, 8, 9);
        let mut stream = vec![0x10, 0x55, 0x55, 0x01];
        stream.extend(expected.to_bytes(FrameLayout::U16));

        let frames = decode_all(&mut decoder, &stream);
        assert_eq!(frames, vec![expected]);
        assert_eq!(decoder.stats().resyncs, 1);
    }

    #[test]
    fn test_broken_marker_resets() {
        let mut decoder = FrameDecoder::default();
        assert!(decoder.feed(0x55).is_none());
        assert_eq!(decoder.pending(), 1);
        assert!(decoder.feed(0x54).is_none());
        assert_eq!(decoder.pending(), 0);
        assert_eq!(decoder.stats().resyncs, 1);
    }

    #[test]
    fn test_rejected_byte_not_reevaluated() {
        // The third 0x55 fails the version check and is dropped with the prefix
        let mut decoder = FrameDecoder::default();
        for b in [0x55, 0x55, 0x55] {
            decoder.feed(b);
        }
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn test_marker_bytes_in_payload() {
        let mut decoder = FrameDecoder::default();
        let expected = TelemetryFrame::new(0x5555, 0x5555, 0x5555);
        let mut stream = expected.to_bytes(FrameLayout::U16);
        stream.extend(frame_bytes(3, 4, 5));

        let frames = decode_all(&mut decoder, &stream);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], expected);
    }

    #[test]
    fn test_unknown_type_passes_through() {
        let mut decoder = FrameDecoder::default();
        let mut bytes = frame_bytes(9, 9, 9);
        bytes[3] = 0x42;

        let frames = decode_all(&mut decoder, &bytes);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].packet_type, PacketType::Unknown(0x42));
    }

    #[test]
    fn test_truncated_frame_never_emits() {
        let mut decoder = FrameDecoder::default();
        let bytes = frame_bytes(1, 2, 3);
        assert!(decode_all(&mut decoder, &bytes[..11]).is_empty());
        assert_eq!(decoder.pending(), 11);
    }

    #[test]
    fn test_overrun_discards_and_recovers() {
        let mut decoder = FrameDecoder::default();
        // Simulate a defect that left a full frame in the buffer without a reset
        decoder.buffer.extend(frame_bytes(1, 2, 3));

        assert!(decoder.feed(0x00).is_none());
        assert_eq!(decoder.pending(), 0);
        assert_eq!(decoder.stats().overruns, 1);

        let frames = decode_all(&mut decoder, &frame_bytes(4, 5, 6));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].vfb, 4);
    }

    #[test]
    fn test_u32_layout() {
        let mut decoder = FrameDecoder::new(FrameLayout::U32);
        let expected = TelemetryFrame::new(2047, 101_325, 70_000);
        let frames = decode_all(&mut decoder, &expected.to_bytes(FrameLayout::U32));
        assert_eq!(frames, vec![expected]);
        assert_eq!(frames[0].temperature(), 700.0);
    }

    #[test]
    fn test_integrity_rejects_corrupt_frame() {
        let layout = FrameLayout::U16;
        let mut decoder = FrameDecoder::with_integrity(layout, Integrity::Crc16Ccitt);

        let mut good = frame_bytes(10, 20, 30);
        Integrity::Crc16Ccitt.seal(layout, &mut good);
        let mut bad = good.clone();
        bad[6] ^= 0xFF;

        let mut stream = bad;
        stream.extend(&good);

        let frames = decode_all(&mut decoder, &stream);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].vfb, 10);
        assert_eq!(decoder.stats().integrity_failures, 1);
        assert_eq!(decoder.stats().frames, 1);
    }

    #[test]
    fn test_integrity_none_accepts_unsealed() {
        let mut decoder = FrameDecoder::new(FrameLayout::U16);
        let mut bytes = frame_bytes(1, 1, 1);
        bytes[10] = 0xDE;
        bytes[11] = 0xAD;
        let frames = decode_all(&mut decoder, &bytes);
        assert_eq!(frames[0].check, 0xADDE);
    }

    #[test]
    fn test_reset_drops_partial() {
        let mut decoder = FrameDecoder::default();
        decode_all(&mut decoder, &frame_bytes(1, 2, 3)[..6]);
        decoder.reset();
        assert_eq!(decoder.pending(), 0);
    }
}
