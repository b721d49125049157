use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::status::StatusLine;
use crate::theme::ThemeColors;

/// Status line: mode box and path on the left, counts in the middle,
/// file info on the right. A status message replaces the middle segment.
pub struct StatusBarWidget<'a> {
    status: &'a StatusLine,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(status: &'a StatusLine, theme: &'a ThemeColors) -> Self {
        Self {
            status,
            theme,
            status_message: None,
            is_error: false,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }
}

/// Keep the last `max` characters of `s`, marking the cut with `...`.
fn truncate_left(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        return s.to_string();
    }
    if max <= 3 {
        return s.chars().skip(len - max).collect();
    }
    let tail: String = s.chars().skip(len - (max - 3)).collect();
    format!("...{}", tail)
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;
        let base = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.status_fg);
        buf.set_style(Rect::new(area.x, area.y, area.width, 1), base);

        let mode = format!(" {} ", self.status.mode_label);
        let mode_style = Style::default()
            .bg(self.theme.mode_bg)
            .fg(self.theme.mode_fg)
            .add_modifier(Modifier::BOLD);

        let (mid, mid_style) = match self.status_message {
            Some(msg) if self.is_error => (msg, base.fg(self.theme.error_fg)),
            Some(msg) => (msg, base.fg(self.theme.success_fg)),
            None => (self.status.mid.as_str(), base),
        };
        let right = format!("{} ", self.status.right);

        let fixed = mode.chars().count() + 1 + right.chars().count();
        let remaining = width.saturating_sub(fixed);

        // Middle segment gets what it needs first; the path is cut from the left.
        let mid_len = mid.chars().count().min(remaining);
        let mid_display: String = mid.chars().take(mid_len).collect();
        let path_budget = remaining.saturating_sub(mid_len).saturating_sub(2);
        let left = truncate_left(&self.status.left, path_budget);

        let used_left = mode.chars().count() + 1 + left.chars().count();
        let center_start = width.saturating_sub(mid_len) / 2;
        let gap_before_mid = center_start.saturating_sub(used_left).max(1);
        let used = used_left + gap_before_mid + mid_len;
        let gap_before_right = width
            .saturating_sub(used)
            .saturating_sub(right.chars().count());

        let line = Line::from(vec![
            Span::styled(mode, mode_style),
            Span::styled(" ", base),
            Span::styled(left, base),
            Span::styled(" ".repeat(gap_before_mid), base),
            Span::styled(mid_display, mid_style),
            Span::styled(" ".repeat(gap_before_right), base),
            Span::styled(right, base),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
