use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// Single-row tab line showing the active buffer label.
pub struct TablineWidget<'a> {
    label: &'a str,
    theme: &'a ThemeColors,
}

impl<'a> TablineWidget<'a> {
    pub fn new(label: &'a str, theme: &'a ThemeColors) -> Self {
        Self { label, theme }
    }
}

impl<'a> Widget for TablineWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let fill = Style::default()
            .bg(self.theme.tabline_bg)
            .fg(self.theme.tabline_fg);
        buf.set_style(Rect::new(area.x, area.y, area.width, 1), fill);

        let line = Line::from(vec![
            Span::styled(" ", fill),
            Span::styled(self.label, fill.add_modifier(Modifier::BOLD)),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
