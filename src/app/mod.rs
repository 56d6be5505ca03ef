//! Application state and orchestration
//!
//! Single owner of the serial connection and the ingest pipeline. The UI loop
//! calls `poll()` once per frame; every pending chunk is decoded in arrival
//! order before anything is drawn.

pub mod state;

pub use state::{AppState, Connection};

use crate::input::{self, AppCommand};
use bytes::Bytes;
use crossterm::event::KeyEvent;
use sensor_grapher::config::Config;
use sensor_grapher::constants::{RECONNECT_DELAY_SECS, STATUS_MESSAGE_TIMEOUT_SECS};
use sensor_grapher::stats::{Rates, Stats};
use sensor_grapher::telemetry::{ChannelSet, Pipeline};
use sensor_grapher::transport::{SerialTransport, Transport};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{info, warn};

/// Main application
pub struct App {
    config: Config,
    pipeline: Pipeline,
    stats: Stats,
    rates: Rates,

    // Serial link
    connection: Connection,
    rx: Option<mpsc::Receiver<Bytes>>,
    shutdown: Arc<AtomicBool>,
    retry_at: Option<Instant>,

    // UI state
    paused: bool,
    status_message: Option<(String, Instant)>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let pipeline = Pipeline::new(
            config.frame.layout,
            config.frame.integrity,
            config.display.window,
        );
        let connection = if config.port().is_some() {
            Connection::Disconnected
        } else {
            Connection::NoPort
        };

        Self {
            config,
            pipeline,
            stats: Stats::new(),
            rates: Rates::default(),
            connection,
            rx: None,
            shutdown: Arc::new(AtomicBool::new(false)),
            retry_at: None,
            paused: false,
            status_message: None,
            should_quit: false,
        }
    }

    // =========================================================================
    // State access
    // =========================================================================

    pub fn state(&self) -> AppState<'_> {
        AppState {
            connection: &self.connection,
            baud_rate: self.config.serial.baud_rate,
            layout: self.config.frame.layout,
            integrity: self.config.frame.integrity,
            rates: self.rates,
            decoder: self.pipeline.decoder_stats(),
            rx_bytes: self.stats.rx_bytes(),
            paused: self.paused,
            status_message: self.status_text(),
        }
    }

    pub fn channels(&self) -> &ChannelSet {
        self.pipeline.channels()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn status_text(&self) -> Option<&str> {
        self.status_message
            .as_ref()
            .filter(|(_, at)| at.elapsed().as_secs() < STATUS_MESSAGE_TIMEOUT_SECS)
            .map(|(msg, _)| msg.as_str())
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    // =========================================================================
    // Serial link
    // =========================================================================

    /// Open the configured port
    pub fn connect(&mut self) {
        let Some(port) = self.config.port().map(str::to_string) else {
            self.connection = Connection::NoPort;
            self.set_status("No serial port configured");
            return;
        };

        self.shutdown = Arc::new(AtomicBool::new(false));
        let transport = SerialTransport::new(&port, self.config.serial.baud_rate);

        match transport.spawn(self.shutdown.clone()) {
            Ok(rx) => {
                info!("Connected: {}", port);
                self.rx = Some(rx);
                self.retry_at = None;
                self.set_status(format!("Connected to {}", port));
                self.connection = Connection::Connected { port };
            }
            Err(e) => {
                warn!("{}", e);
                self.set_status(e.to_string());
                self.schedule_retry(port);
            }
        }
    }

    /// Close the port and stop retrying
    pub fn disconnect(&mut self) {
        self.close_link();
        self.retry_at = None;
        if self.connection != Connection::NoPort {
            self.connection = Connection::Disconnected;
        }
        self.set_status("Disconnected");
    }

    fn close_link(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.rx = None;
        self.pipeline.resync();
    }

    fn schedule_retry(&mut self, port: String) {
        self.retry_at = Some(Instant::now() + Duration::from_secs(RECONNECT_DELAY_SECS));
        self.connection = Connection::Waiting { port };
    }

    // =========================================================================
    // Polling
    // =========================================================================

    /// Drain pending serial data and update rates
    pub fn poll(&mut self) {
        let mut lost = false;

        if let Some(rx) = self.rx.as_mut() {
            let mut chunks = Vec::new();
            loop {
                match rx.try_recv() {
                    Ok(chunk) => chunks.push(chunk),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        lost = true;
                        break;
                    }
                }
            }
            for chunk in chunks {
                self.ingest(&chunk);
            }
        }

        if lost {
            warn!("Connection lost, reconnecting...");
            self.close_link();
            if let Connection::Connected { port } = &self.connection {
                let port = port.clone();
                self.set_status(format!("Lost {}", port));
                self.schedule_retry(port);
            }
        }

        if self.retry_at.is_some_and(|at| Instant::now() >= at) {
            self.connect();
        }

        self.rates = self.stats.update_rates();
    }

    /// Decode a chunk of raw bytes
    ///
    /// While paused, frames are decoded but the charts are not updated.
    pub fn ingest(&mut self, data: &[u8]) {
        self.stats.add_rx(data.len());
        let frames = if self.paused {
            self.pipeline.ingest_detached(data)
        } else {
            self.pipeline.ingest(data)
        };
        self.stats.add_frames(frames.len());
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Handle a key press, returns true when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.execute(input::translate_key(key));
        self.should_quit
    }

    pub fn execute(&mut self, command: AppCommand) {
        match command {
            AppCommand::Quit => {
                self.close_link();
                self.should_quit = true;
            }
            AppCommand::ToggleConnection => {
                if self.connection.is_open() || self.retry_at.is_some() {
                    self.disconnect();
                } else {
                    self.connect();
                }
            }
            AppCommand::TogglePause => {
                self.paused = !self.paused;
                self.set_status(if self.paused { "Paused" } else { "Resumed" });
            }
            AppCommand::ResetSeries => {
                self.pipeline.reset();
                self.set_status("Cleared");
            }
            AppCommand::None => {}
        }
    }
}
