//! Terminal UI using ratatui
//!
//! Thin layer responsible only for terminal I/O. All business logic
//! is delegated to App via poll() and handle_key().

pub mod theme;
pub mod widgets;

use crate::app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Frame, Terminal,
};
use sensor_grapher::constants::FRAME_DURATION_MS;
use sensor_grapher::error::{GrapherError, Result};
use sensor_grapher::telemetry::Channel;
use std::io;
use std::time::Duration;
use widgets::{actions::ActionsWidget, chart::ChannelChart, status::StatusWidget};

/// Map io::Error to GrapherError::Runtime
fn map_io_err(e: io::Error) -> GrapherError {
    GrapherError::Runtime { source: e }
}

/// Run the TUI event loop
pub fn run(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode().map_err(map_io_err)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(map_io_err)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(map_io_err)?;

    let result = event_loop(&mut terminal, app);

    // Restore terminal even when the loop failed
    disable_raw_mode().map_err(map_io_err)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(map_io_err)?;
    terminal.show_cursor().map_err(map_io_err)?;

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Drain serial data and update state
        app.poll();

        terminal.draw(|f| draw(f, app)).map_err(map_io_err)?;

        // Handle input with timeout
        if event::poll(Duration::from_millis(FRAME_DURATION_MS)).map_err(map_io_err)? {
            if let Event::Key(key) = event::read().map_err(map_io_err)? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) {
                    break;
                }
            }
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(6), // Status widget
        Constraint::Min(9),    // Charts
        Constraint::Length(2), // Actions widget
    ])
    .split(frame.area());

    let state = app.state();

    frame.render_widget(StatusWidget::new(&state), chunks[0]);

    let charts = Layout::vertical([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(chunks[1]);

    for (channel, area) in Channel::ALL.into_iter().zip(charts.iter()) {
        let chart = ChannelChart::new(channel, app.channels().get(channel));
        frame.render_widget(chart, *area);
    }

    frame.render_widget(ActionsWidget::new(&state), chunks[2]);
}
