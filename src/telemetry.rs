//! Channel model and ingest pipeline
//!
//! The pipeline is the single owner of a decoder and one sliding window per
//! channel. Bytes go in, frames come out, and each frame lands in all three
//! windows before the next byte is looked at.

use crate::codec::{DecoderStats, FrameDecoder, FrameLayout, Integrity, TelemetryFrame};
use crate::series::WindowedSeries;
use serde::Serialize;
use tracing::debug;

/// Measured channels carried by every telemetry frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Vibration feedback ADC reading
    Vfb,
    Pressure,
    Temperature,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Vfb, Channel::Pressure, Channel::Temperature];

    pub fn name(self) -> &'static str {
        match self {
            Channel::Vfb => "VFB",
            Channel::Pressure => "Pressure",
            Channel::Temperature => "Temperature",
        }
    }

    /// Axis label for the channel's values
    pub fn unit(self) -> &'static str {
        match self {
            Channel::Vfb => "counts",
            Channel::Pressure => "kPa",
            Channel::Temperature => "°C",
        }
    }

    /// Value of this channel in display units
    pub fn value(self, frame: &TelemetryFrame) -> f64 {
        match self {
            Channel::Vfb => frame.vfb as f64,
            Channel::Pressure => frame.pressure(),
            Channel::Temperature => frame.temperature(),
        }
    }

    fn index(self) -> usize {
        match self {
            Channel::Vfb => 0,
            Channel::Pressure => 1,
            Channel::Temperature => 2,
        }
    }
}

/// One sliding window per channel, all sharing the same capacity
#[derive(Debug, Clone)]
pub struct ChannelSet {
    series: [WindowedSeries; 3],
}

impl ChannelSet {
    pub fn new(window: usize) -> Self {
        Self {
            series: [
                WindowedSeries::new(window),
                WindowedSeries::new(window),
                WindowedSeries::new(window),
            ],
        }
    }

    /// Append one sample per channel from a decoded frame
    pub fn record(&mut self, frame: &TelemetryFrame) {
        for channel in Channel::ALL {
            self.series[channel.index()].append(channel.value(frame));
        }
    }

    pub fn get(&self, channel: Channel) -> &WindowedSeries {
        &self.series[channel.index()]
    }

    pub fn window(&self) -> usize {
        self.series[0].capacity()
    }

    pub fn clear(&mut self) {
        for series in self.series.iter_mut() {
            series.clear();
        }
    }
}

/// Decoder plus channel windows for one byte source
#[derive(Debug, Clone)]
pub struct Pipeline {
    decoder: FrameDecoder,
    channels: ChannelSet,
    last_stats: DecoderStats,
}

impl Pipeline {
    pub fn new(layout: FrameLayout, integrity: Integrity, window: usize) -> Self {
        Self {
            decoder: FrameDecoder::with_integrity(layout, integrity),
            channels: ChannelSet::new(window),
            last_stats: DecoderStats::default(),
        }
    }

    /// Feed a chunk of raw bytes in arrival order
    ///
    /// Every decoded frame is recorded into the channel windows and also
    /// returned, oldest first.
    pub fn ingest(&mut self, data: &[u8]) -> Vec<TelemetryFrame> {
        let mut frames = Vec::new();
        let channels = &mut self.channels;
        self.decoder.decode(data, |frame| {
            channels.record(&frame);
            frames.push(frame);
        });
        self.log_stream_errors();
        frames
    }

    /// Decode without touching the channel windows (used while paused)
    pub fn ingest_detached(&mut self, data: &[u8]) -> Vec<TelemetryFrame> {
        let mut frames = Vec::new();
        self.decoder.decode(data, |frame| frames.push(frame));
        self.log_stream_errors();
        frames
    }

    pub fn channels(&self) -> &ChannelSet {
        &self.channels
    }

    pub fn decoder_stats(&self) -> DecoderStats {
        self.decoder.stats()
    }

    /// Drop a partial frame, e.g. after the byte source reconnects
    pub fn resync(&mut self) {
        self.decoder.reset();
    }

    /// Clear the windows and any partial frame
    pub fn reset(&mut self) {
        self.decoder.reset();
        self.channels.clear();
    }

    fn log_stream_errors(&mut self) {
        let now = self.decoder.stats();
        let prev = self.last_stats;

        if now.resyncs > prev.resyncs {
            debug!(count = now.resyncs - prev.resyncs, "Resynchronized on bad marker/version");
        }
        if now.integrity_failures > prev.integrity_failures {
            debug!(
                count = now.integrity_failures - prev.integrity_failures,
                "Dropped frame failing integrity check"
            );
        }
        if now.overruns > prev.overruns {
            debug!(count = now.overruns - prev.overruns, "Discarded overrun frame buffer");
        }

        self.last_stats = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(frames: &[TelemetryFrame]) -> Vec<u8> {
        frames
            .iter()
            .flat_map(|f| f.to_bytes(FrameLayout::U16))
            .collect()
    }

    #[test]
    fn test_channel_values() {
        let frame = TelemetryFrame::new(812, 2550, 2137);
        assert_eq!(Channel::Vfb.value(&frame), 812.0);
        assert_eq!(Channel::Pressure.value(&frame), 25.5);
        assert_eq!(Channel::Temperature.value(&frame), 21.37);
    }

    #[test]
    fn test_record_fills_every_channel() {
        let mut set = ChannelSet::new(10);
        set.record(&TelemetryFrame::new(1, 100, 200));
        set.record(&TelemetryFrame::new(2, 300, 400));

        assert_eq!(set.get(Channel::Vfb).points(), &[(0.0, 1.0), (1.0, 2.0)]);
        assert_eq!(set.get(Channel::Pressure).points(), &[(0.0, 1.0), (1.0, 3.0)]);
        assert_eq!(set.get(Channel::Temperature).points(), &[(0.0, 2.0), (1.0, 4.0)]);
    }

    #[test]
    fn test_pipeline_chunked_ingest() {
        let mut pipeline = Pipeline::new(FrameLayout::U16, Integrity::None, 3);
        let bytes = stream(&[
            TelemetryFrame::new(1, 0, 0),
            TelemetryFrame::new(2, 0, 0),
            TelemetryFrame::new(3, 0, 0),
            TelemetryFrame::new(4, 0, 0),
        ]);

        let mut total = 0;
        for chunk in bytes.chunks(5) {
            total += pipeline.ingest(chunk).len();
        }

        assert_eq!(total, 4);
        let vfb: Vec<f64> = pipeline.channels().get(Channel::Vfb).values().collect();
        assert_eq!(vfb, vec![2.0, 3.0, 4.0]);
        assert_eq!(pipeline.decoder_stats().frames, 4);
    }

    #[test]
    fn test_pipeline_detached_leaves_windows() {
        let mut pipeline = Pipeline::new(FrameLayout::U16, Integrity::None, 3);
        let frames = pipeline.ingest_detached(&stream(&[TelemetryFrame::new(1, 0, 0)]));
        assert_eq!(frames.len(), 1);
        assert!(pipeline.channels().get(Channel::Vfb).is_empty());
    }

    #[test]
    fn test_pipeline_reset() {
        let mut pipeline = Pipeline::new(FrameLayout::U16, Integrity::None, 3);
        pipeline.ingest(&stream(&[TelemetryFrame::new(1, 0, 0)]));
        pipeline.ingest(&[0x55, 0x55, 0x00]);
        pipeline.reset();

        assert!(pipeline.channels().get(Channel::Pressure).is_empty());
        // Partial frame dropped: a fresh frame decodes on its own
        assert_eq!(pipeline.ingest(&stream(&[TelemetryFrame::new(9, 0, 0)])).len(), 1);
    }

    #[test]
    fn test_window_size_shared() {
        assert_eq!(ChannelSet::new(1000).window(), 1000);
    }
}
