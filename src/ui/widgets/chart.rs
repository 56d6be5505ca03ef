//! Chart widget - one sliding window drawn as a line

use crate::ui::theme::*;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};
use sensor_grapher::series::WindowedSeries;
use sensor_grapher::telemetry::Channel;

pub struct ChannelChart<'a> {
    channel: Channel,
    series: &'a WindowedSeries,
}

impl<'a> ChannelChart<'a> {
    pub fn new(channel: Channel, series: &'a WindowedSeries) -> Self {
        Self { channel, series }
    }

    fn title(&self) -> String {
        match self.series.latest() {
            Some(v) => format!(" {} {:.2} {} ", self.channel.name(), v, self.channel.unit()),
            None => format!(" {} ", self.channel.name()),
        }
    }
}

impl Widget for ChannelChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [x_min, x_max] = self.series.x_bounds();
        let [y_min, y_max] = self.series.axis_bounds();
        let y_mid = (y_min + y_max) / 2.0;

        let dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(channel_color(self.channel)))
            .data(self.series.points());

        let x_axis = Axis::default()
            .style(Style::default().fg(COLOR_LABEL))
            .bounds([x_min, x_max])
            .labels(vec![
                Span::raw(format!("{}", x_min)),
                Span::raw(format!("{}", x_max)),
            ]);

        let y_axis = Axis::default()
            .title(Span::styled(self.channel.unit(), Style::default().fg(COLOR_LABEL)))
            .style(Style::default().fg(COLOR_LABEL))
            .bounds([y_min, y_max])
            .labels(vec![
                Span::raw(format!("{:.0}", y_min)),
                Span::raw(format!("{:.1}", y_mid)),
                Span::raw(format!("{:.0}", y_max)),
            ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER))
            .title(Span::styled(
                self.title(),
                Style::default()
                    .fg(COLOR_TITLE)
                    .add_modifier(Modifier::BOLD),
            ));

        Chart::new(vec![dataset])
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_shows_latest_value() {
        let mut series = WindowedSeries::new(10);
        assert_eq!(ChannelChart::new(Channel::Pressure, &series).title(), " Pressure ");

        series.append(25.5);
        assert_eq!(
            ChannelChart::new(Channel::Pressure, &series).title(),
            " Pressure 25.50 kPa "
        );
    }

    #[test]
    fn test_render_does_not_panic() {
        let mut series = WindowedSeries::new(50);
        for v in 0..80 {
            series.append((v % 7) as f64);
        }
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        ChannelChart::new(Channel::Vfb, &series).render(area, &mut buf);
    }
}
