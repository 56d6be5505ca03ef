//! Ingest statistics
//!
//! Counters for bytes/sec and frames/sec throughput, updated by whichever
//! front end drains the transport channel. Lock-free atomics keep every
//! method on `&self`.

use crate::constants::RATE_UPDATE_MIN_INTERVAL_SECS;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Byte and frame counters with rate calculation (fully lock-free)
pub struct Stats {
    /// Total bytes received from the device
    rx_total: AtomicU64,
    /// Total frames decoded
    frames_total: AtomicU64,
    /// Snapshot of rx_total at last rate calculation
    rx_snapshot: AtomicU64,
    /// Snapshot of frames_total at last rate calculation
    frames_snapshot: AtomicU64,
    /// Reference instant for time calculations
    start_time: Instant,
    /// Nanoseconds since start_time at last rate calculation
    last_calc_nanos: AtomicU64,
    /// Cached RX rate in bytes/sec (stored as f64 bits)
    rx_rate: AtomicU64,
    /// Cached frame rate in frames/sec (stored as f64 bits)
    frame_rate: AtomicU64,
}

/// Rates computed by `Stats::update_rates`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rates {
    pub bytes_per_sec: f64,
    pub frames_per_sec: f64,
}

impl Stats {
    pub fn new() -> Self {
        Self {
            rx_total: AtomicU64::new(0),
            frames_total: AtomicU64::new(0),
            rx_snapshot: AtomicU64::new(0),
            frames_snapshot: AtomicU64::new(0),
            start_time: Instant::now(),
            last_calc_nanos: AtomicU64::new(0),
            rx_rate: AtomicU64::new(0),
            frame_rate: AtomicU64::new(0),
        }
    }

    /// Add received bytes
    #[inline]
    pub fn add_rx(&self, bytes: usize) {
        self.rx_total.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// Add decoded frames
    #[inline]
    pub fn add_frames(&self, frames: usize) {
        self.frames_total.fetch_add(frames as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn rx_bytes(&self) -> u64 {
        self.rx_total.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames_total.load(Ordering::Relaxed)
    }

    fn cached(&self) -> Rates {
        Rates {
            bytes_per_sec: f64::from_bits(self.rx_rate.load(Ordering::Relaxed)),
            frames_per_sec: f64::from_bits(self.frame_rate.load(Ordering::Relaxed)),
        }
    }

    /// Update rate calculations
    /// Call this periodically from the UI thread
    pub fn update_rates(&self) -> Rates {
        let now_nanos = self.start_time.elapsed().as_nanos() as u64;
        let last_nanos = self.last_calc_nanos.load(Ordering::Relaxed);
        let elapsed = now_nanos.saturating_sub(last_nanos) as f64 / 1_000_000_000.0;

        if elapsed < RATE_UPDATE_MIN_INTERVAL_SECS {
            return self.cached();
        }

        // Try to claim the update (avoid duplicate calculations)
        if self
            .last_calc_nanos
            .compare_exchange(last_nanos, now_nanos, Ordering::SeqCst, Ordering::Relaxed)
            .is_err()
        {
            return self.cached();
        }

        let rx_now = self.rx_total.load(Ordering::Relaxed);
        let frames_now = self.frames_total.load(Ordering::Relaxed);
        let rx_prev = self.rx_snapshot.swap(rx_now, Ordering::Relaxed);
        let frames_prev = self.frames_snapshot.swap(frames_now, Ordering::Relaxed);

        let rates = Rates {
            bytes_per_sec: (rx_now - rx_prev) as f64 / elapsed,
            frames_per_sec: (frames_now - frames_prev) as f64 / elapsed,
        };

        self.rx_rate
            .store(rates.bytes_per_sec.to_bits(), Ordering::Relaxed);
        self.frame_rate
            .store(rates.frames_per_sec.to_bits(), Ordering::Relaxed);

        rates
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}
