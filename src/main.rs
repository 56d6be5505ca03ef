//! Sensor Grapher - live plots of serial vibration/pressure/temperature telemetry
//!
//! Usage:
//!   sensor-grapher --port /dev/ttyUSB0           Run interactive TUI
//!   sensor-grapher --port COM3 --headless        Log frames on the console
//!   sensor-grapher --port COM3 --headless --json One JSON object per frame
//!   sensor-grapher --port COM3 --save-config     Persist settings and exit
//!   sensor-grapher --list-ports                  Show available serial ports

mod app;
mod cli;
mod headless;
mod input;
mod ui;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use sensor_grapher::{config, logging, transport};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_ports {
        let ports = transport::available_ports()?;
        if ports.is_empty() {
            println!("No serial ports found");
        }
        for port in ports {
            println!("{:<24} {}", port.name, port.description);
        }
        return Ok(());
    }

    // Headless mode logs to the console. The TUI owns the terminal, so it
    // logs to a file when asked to
    if cli.headless {
        logging::init_tracing(cli.verbose, "info");
    } else if cli.verbose || cli.log_file.is_some() {
        let path = match &cli.log_file {
            Some(path) => path.clone(),
            None => logging::default_log_path()?,
        };
        logging::init_file_tracing(&path, cli.verbose)?;
    }

    if cli.save_config {
        // Strict load: a broken file must never be overwritten with defaults
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => config::default_path()?,
        };
        let mut config = config::load_from(&path)?;
        cli.apply(&mut config);
        config.validate()?;
        config::save_to(&path, &config)?;
        println!("Saved config to {}", path.display());
        return Ok(());
    }

    let mut config = config::resolve(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    if cli.headless {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(headless::run(&config, cli.json))?;
        return Ok(());
    }

    let mut app = app::App::new(config);
    app.connect();
    ui::run(&mut app)?;
    Ok(())
}
