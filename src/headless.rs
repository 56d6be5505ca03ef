//! Headless runner
//!
//! Reads the serial stream without a terminal UI. Each decoded frame is either
//! logged through tracing or written to stdout as a JSON line. The port is
//! reopened after a failure or disconnect until SIGINT/SIGTERM.

use chrono::{Local, SecondsFormat};
use sensor_grapher::codec::TelemetryFrame;
use sensor_grapher::config::Config;
use sensor_grapher::constants::RECONNECT_DELAY_SECS;
use sensor_grapher::error::{GrapherError, Result};
use sensor_grapher::stats::Stats;
use sensor_grapher::telemetry::Pipeline;
use sensor_grapher::transport::{SerialTransport, Transport};
use serde::Serialize;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Interval between throughput reports
const REPORT_INTERVAL_SECS: u64 = 10;

/// One frame as written in `--json` mode
#[derive(Debug, Serialize)]
pub struct FrameRecord {
    pub timestamp: String,
    /// Raw packet type byte, 0 for telemetry
    #[serde(rename = "type")]
    pub packet_type: u8,
    pub vfb: u16,
    pub pressure: f64,
    pub temperature: f64,
}

impl FrameRecord {
    pub fn new(frame: &TelemetryFrame) -> Self {
        Self {
            timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Millis, false),
            packet_type: frame.packet_type.to_byte(),
            vfb: frame.vfb,
            pressure: frame.pressure(),
            temperature: frame.temperature(),
        }
    }
}

/// Run until a shutdown signal arrives
pub async fn run(config: &Config, json: bool) -> Result<()> {
    let port = config
        .port()
        .ok_or(GrapherError::NoPortConfigured)?
        .to_string();
    let baud_rate = config.serial.baud_rate;

    let shutdown = Arc::new(AtomicBool::new(false));
    spawn_shutdown_listener(shutdown.clone());

    let stats = Stats::new();
    let mut pipeline = Pipeline::new(
        config.frame.layout,
        config.frame.integrity,
        config.display.window,
    );

    info!(
        "Reading {} @ {} baud ({:?} layout, integrity {:?})",
        port, baud_rate, config.frame.layout, config.frame.integrity
    );

    // Reconnection loop
    while !shutdown.load(Ordering::Relaxed) {
        let mut rx = match SerialTransport::new(&port, baud_rate).spawn(shutdown.clone()) {
            Ok(rx) => rx,
            Err(e) => {
                warn!("{}, retrying in {}s", e, RECONNECT_DELAY_SECS);
                tokio::time::sleep(Duration::from_secs(RECONNECT_DELAY_SECS)).await;
                continue;
            }
        };
        info!("Connected: {}", port);

        let mut report = tokio::time::interval(Duration::from_secs(REPORT_INTERVAL_SECS));
        report.tick().await;

        loop {
            tokio::select! {
                biased;

                // Periodic shutdown check
                _ = tokio::time::sleep(Duration::from_millis(100)) => {
                    if shutdown.load(Ordering::Relaxed) {
                        break;
                    }
                }

                chunk = rx.recv() => {
                    match chunk {
                        Some(data) => {
                            stats.add_rx(data.len());
                            let frames = pipeline.ingest(&data);
                            stats.add_frames(frames.len());
                            for frame in &frames {
                                emit(frame, json);
                            }
                        }
                        // Channel closed = reader thread stopped
                        None => break,
                    }
                }

                _ = report.tick() => {
                    let rates = stats.update_rates();
                    let decoder = pipeline.decoder_stats();
                    info!(
                        "{:.0} B/s, {:.1} frames/s, {} frames, {} resyncs, {} rejected",
                        rates.bytes_per_sec,
                        rates.frames_per_sec,
                        decoder.frames,
                        decoder.resyncs,
                        decoder.integrity_failures
                    );
                }
            }
        }

        pipeline.resync();

        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        warn!("Connection lost, reconnecting...");
        tokio::time::sleep(Duration::from_secs(RECONNECT_DELAY_SECS)).await;
    }

    info!("Stopped after {} frames", stats.frames());
    Ok(())
}

fn emit(frame: &TelemetryFrame, json: bool) {
    if !json {
        info!(
            vfb = frame.vfb,
            pressure = frame.pressure(),
            temperature = frame.temperature(),
            "frame"
        );
        return;
    }

    match serde_json::to_string(&FrameRecord::new(frame)) {
        Ok(line) => {
            let mut out = std::io::stdout().lock();
            let _ = writeln!(out, "{}", line);
        }
        Err(e) => warn!("Cannot serialize frame: {}", e),
    }
}

fn spawn_shutdown_listener(shutdown: Arc<AtomicBool>) {
    #[cfg(unix)]
    {
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};

            let (Ok(mut sigterm), Ok(mut sigint)) =
                (signal(SignalKind::terminate()), signal(SignalKind::interrupt()))
            else {
                warn!("Cannot install signal handlers");
                return;
            };

            tokio::select! {
                _ = sigterm.recv() => {},
                _ = sigint.recv() => {},
            }
            shutdown.store(true, Ordering::SeqCst);
        });
    }

    #[cfg(windows)]
    {
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            shutdown.store(true, Ordering::SeqCst);
        });
    }
}
