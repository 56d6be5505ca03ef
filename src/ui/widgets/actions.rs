//! Actions widget - displays keyboard shortcuts bar

use crate::app::AppState;
use crate::ui::theme::{STYLE_ACTION, STYLE_DIM, STYLE_KEY};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct ActionsWidget<'a> {
    state: &'a AppState<'a>,
}

impl<'a> ActionsWidget<'a> {
    pub fn new(state: &'a AppState<'a>) -> Self {
        Self { state }
    }
}

impl Widget for ActionsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let connect_label = if self.state.connection.is_open() {
            " Disconnect  "
        } else {
            " Connect  "
        };
        let pause_label = if self.state.paused { " Resume  " } else { " Pause  " };

        let spans = vec![
            Span::raw("  "),
            Span::styled("C", STYLE_KEY),
            Span::styled(connect_label, STYLE_ACTION),
            Span::styled("P", STYLE_KEY),
            Span::styled(pause_label, STYLE_ACTION),
            Span::styled("R", STYLE_KEY),
            Span::styled(" Reset  ", STYLE_ACTION),
            Span::styled("Q", STYLE_KEY),
            Span::styled(" Quit", STYLE_ACTION),
        ];

        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(STYLE_DIM);

        Paragraph::new(Line::from(spans))
            .block(block)
            .render(area, buf);
    }
}
