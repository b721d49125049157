use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

use crate::app::App;
use crate::components::buffer::BufferWidget;
use crate::components::status_bar::StatusBarWidget;
use crate::components::tabline::TablineWidget;

/// Render one frame: tab line, main pane, status line.
pub fn render(app: &mut App, frame: &mut Frame) {
    let [tab_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let view = app.buffer_view(main_area.height);
    app.sync_viewport(&view, main_area.height as usize);
    app.buffer_area = main_area;

    let presentation = app.presentation();

    frame.render_widget(
        TablineWidget::new(&presentation.tab, &app.theme),
        tab_area,
    );
    frame.render_widget(
        BufferWidget::new(&view, &app.theme).offset(app.viewport.offset()),
        main_area,
    );

    let mut status = StatusBarWidget::new(&presentation.status, &app.theme);
    if let Some((msg, is_error, _)) = &app.status_message {
        status = status.status_message(msg, *is_error);
    }
    frame.render_widget(status, status_area);
}
