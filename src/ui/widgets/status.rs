//! Status widget - displays connection, line settings, throughput, decoder counters

use crate::app::{AppState, Connection};
use crate::ui::theme::*;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct StatusWidget<'a> {
    state: &'a AppState<'a>,
}

impl<'a> StatusWidget<'a> {
    pub fn new(state: &'a AppState<'a>) -> Self {
        Self { state }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (symbol, color, text) = match self.state.connection {
            Connection::Connected { port } => {
                (SYMBOL_CONNECTED, COLOR_CONNECTED, format!("{} @ {} baud", port, self.state.baud_rate))
            }
            Connection::Waiting { port } => {
                (SYMBOL_WAITING, COLOR_WAITING, format!("{} (waiting)", port))
            }
            Connection::Disconnected => (SYMBOL_DISCONNECTED, COLOR_DISCONNECTED, "Disconnected".to_string()),
            Connection::NoPort => (SYMBOL_ERROR, COLOR_ERROR, "No port (use --port)".to_string()),
        };

        let decoder = &self.state.decoder;
        let traffic = format!(
            "{:.0} B/s   {:.1} frames/s   {} bytes",
            self.state.rates.bytes_per_sec, self.state.rates.frames_per_sec, self.state.rx_bytes
        );
        let frames = format!(
            "{} ok   {} resync   {} bad check   {} skipped",
            decoder.frames, decoder.resyncs, decoder.integrity_failures, decoder.skipped
        );
        let format_info = format!("{:?} layout, integrity {:?}", self.state.layout, self.state.integrity);

        let mut serial_line = vec![
            Span::styled("  Serial     ", Style::default().fg(COLOR_LABEL)),
            Span::styled(format!("{} ", symbol), Style::default().fg(color)),
            Span::styled(text, Style::default().fg(COLOR_VALUE)),
        ];
        if self.state.paused {
            serial_line.push(Span::styled("   PAUSED", Style::default().fg(COLOR_WARNING)));
        }
        if let Some(message) = self.state.status_message {
            serial_line.push(Span::styled(format!("   {}", message), Style::default().fg(COLOR_MUTED)));
        }

        let lines = vec![
            Line::from(serial_line),
            Line::from(vec![
                Span::styled("  Traffic    ", Style::default().fg(COLOR_LABEL)),
                Span::styled(traffic, Style::default().fg(COLOR_VALUE)),
            ]),
            Line::from(vec![
                Span::styled("  Frames     ", Style::default().fg(COLOR_LABEL)),
                Span::styled(frames, Style::default().fg(COLOR_VALUE)),
            ]),
            Line::from(vec![
                Span::styled("  Format     ", Style::default().fg(COLOR_LABEL)),
                Span::styled(format_info, Style::default().fg(COLOR_VALUE)),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER))
            .title(Span::styled(
                " SENSOR GRAPHER ",
                Style::default()
                    .fg(COLOR_TITLE)
                    .add_modifier(Modifier::BOLD),
            ));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
