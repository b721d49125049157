use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::layout::{BufferView, LineKind};
use crate::theme::ThemeColors;

/// Main pane: line-number gutter on the left, display lines on the right.
pub struct BufferWidget<'a> {
    view: &'a BufferView,
    offset: usize,
    theme: &'a ThemeColors,
}

impl<'a> BufferWidget<'a> {
    pub fn new(view: &'a BufferView, theme: &'a ThemeColors) -> Self {
        Self {
            view,
            offset: 0,
            theme,
        }
    }

    /// First display line to draw.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    fn line_style(&self, kind: &LineKind) -> Style {
        let base = Style::default().fg(self.theme.buffer_fg);
        match kind {
            LineKind::Header => base.fg(self.theme.header_fg),
            LineKind::Text => base,
            LineKind::Directory => base.fg(self.theme.dir_fg).add_modifier(Modifier::BOLD),
            LineKind::Link { .. } => base
                .fg(self.theme.link_fg)
                .add_modifier(Modifier::UNDERLINED),
            LineKind::Filler => base.fg(self.theme.filler_fg),
        }
    }
}

impl<'a> Widget for BufferWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let bg = Style::default().bg(self.theme.buffer_bg);
        buf.set_style(area, bg);

        // Gutter text plus one column of separation.
        let gutter_cols = self
            .view
            .gutter
            .first()
            .map(|g| g.chars().count() as u16 + 1)
            .unwrap_or(0)
            .min(area.width);
        let text_x = area.x + gutter_cols;
        let text_width = area.width - gutter_cols;

        let rows = self
            .view
            .lines
            .iter()
            .zip(&self.view.gutter)
            .enumerate()
            .skip(self.offset)
            .take(area.height as usize);

        for (i, (idx, (line, number))) in rows.enumerate() {
            let y = area.y + i as u16;
            let is_cursor = self.view.cursor == Some(idx);

            let mut gutter_style = Style::default().fg(if is_cursor {
                self.theme.gutter_cursor_fg
            } else {
                self.theme.gutter_fg
            });
            let mut text_style = self.line_style(&line.kind);
            if is_cursor {
                let row = Rect::new(area.x, y, area.width, 1);
                buf.set_style(row, Style::default().bg(self.theme.cursorline_bg));
                gutter_style = gutter_style.bg(self.theme.cursorline_bg);
                text_style = text_style.bg(self.theme.cursorline_bg);
            }

            if gutter_cols > 0 {
                let gutter = Line::from(Span::styled(number.as_str(), gutter_style));
                buf.set_line(area.x, y, &gutter, gutter_cols);
            }
            if text_width > 0 {
                let text = Line::from(Span::styled(line.text.as_str(), text_style));
                buf.set_line(text_x, y, &text, text_width);
            }
        }
    }
}
