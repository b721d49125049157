use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::layout::{self, BufferView};
use crate::state::{ChordTracker, NavigationState};
use crate::status::{self, Presentation};
use crate::theme::{self, ThemeColors};
use crate::tree::Tree;
use crate::viewport::Viewport;

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Opens a link target outside the terminal.
pub type LinkOpener = fn(&str) -> std::io::Result<()>;

fn open_detached(target: &str) -> std::io::Result<()> {
    open::that_detached(target)
}

/// Render settings resolved from config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    pub min_visible_lines: usize,
    pub gutter_width: usize,
    pub scroll_step: usize,
    pub mouse: bool,
}

impl ViewSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            min_visible_lines: config.min_visible_lines(),
            gutter_width: config.gutter_width(),
            scroll_step: config.scroll_step(),
            mouse: config.mouse_enabled(),
        }
    }
}

/// Main application state.
pub struct App<'t> {
    pub tree: &'t Tree,
    pub nav: NavigationState<'t>,
    pub viewport: Viewport,
    pub settings: ViewSettings,
    pub theme: ThemeColors,
    pub should_quit: bool,
    /// Message and whether it reports an error.
    pub status_message: Option<(String, bool, Instant)>,
    /// Main pane area from the last render, for mapping mouse rows.
    pub buffer_area: Rect,
    /// Double-click detection, keyed by display row.
    pub clicks: ChordTracker<usize>,
    pub link_opener: LinkOpener,
}

impl<'t> App<'t> {
    pub fn new(tree: &'t Tree, config: &AppConfig) -> Self {
        let nav = NavigationState::new(tree, config.chord_window());
        let clicks = ChordTracker::new(nav.chord.window());
        Self {
            tree,
            nav,
            viewport: Viewport::default(),
            settings: ViewSettings::from_config(config),
            theme: theme::resolve_theme(&config.theme),
            should_quit: false,
            status_message: None,
            buffer_area: Rect::default(),
            clicks,
            link_opener: open_detached,
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status_message(&mut self, msg: String, is_error: bool) {
        self.status_message = Some((msg, is_error, Instant::now()));
    }

    /// Clear the status message once it has been shown long enough.
    pub fn clear_expired_status(&mut self, now: Instant) {
        if let Some((_, _, created)) = self.status_message {
            if now.duration_since(created) > STATUS_MESSAGE_TTL {
                self.status_message = None;
            }
        }
    }

    /// Periodic housekeeping: drop stale chords and messages.
    pub fn on_tick(&mut self, now: Instant) {
        if self.nav.chord.expire(now) {
            log::debug!("Pending chord expired");
        }
        self.clicks.expire(now);
        self.clear_expired_status(now);
    }

    /// Lay out the main pane for `available_rows` terminal rows.
    pub fn buffer_view(&self, available_rows: u16) -> BufferView {
        let visible = layout::visible_lines(available_rows, self.settings.min_visible_lines);
        layout::layout(&self.nav, visible, self.settings.gutter_width)
    }

    pub fn presentation(&self) -> Presentation {
        status::present(self.tree, &self.nav)
    }

    /// Bring the viewport in line with `view` for a pane of `rows` rows.
    pub fn sync_viewport(&mut self, view: &BufferView, rows: usize) {
        match view.cursor {
            Some(cursor) => self.viewport.follow(cursor, rows),
            None => self.viewport.clamp(view.lines.len(), rows),
        }
    }

    /// Open the target of the file being viewed, if it is a link.
    pub fn activate_link(&mut self) {
        let Some(target) = self.nav.open_file().and_then(|f| f.link_target()) else {
            return;
        };
        match (self.link_opener)(target) {
            Ok(()) => {
                log::info!("Opened link {}", target);
                self.set_status_message(format!("Opened {}", target), false);
            }
            Err(e) => {
                log::warn!("Failed to open link {}: {}", target, e);
                self.set_status_message(format!("Cannot open {}: {}", target, e), true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::builtin_tree;
    use crate::state::ModeKind;

    fn failing_opener(_: &str) -> std::io::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no opener"))
    }

    fn ok_opener(_: &str) -> std::io::Result<()> {
        Ok(())
    }

    fn open_resume(app: &mut App) {
        let idx = app
            .nav
            .entries()
            .iter()
            .position(|n| n.name() == "resume.pdf")
            .unwrap();
        app.nav.select_index(idx + 1);
        app.nav.confirm();
    }

    #[test]
    fn new_app_starts_listing() {
        let tree = builtin_tree().unwrap();
        let app = App::new(&tree, &AppConfig::default());
        assert_eq!(app.nav.mode_kind(), ModeKind::Listing);
        assert!(!app.should_quit);
        assert_eq!(app.settings.min_visible_lines, 24);
    }

    #[test]
    fn quit_sets_flag() {
        let tree = builtin_tree().unwrap();
        let mut app = App::new(&tree, &AppConfig::default());
        app.quit();
        assert!(app.should_quit);
    }

    #[test]
    fn buffer_view_pads_to_minimum() {
        let tree = builtin_tree().unwrap();
        let app = App::new(&tree, &AppConfig::default());
        assert_eq!(app.buffer_view(10).lines.len(), 24);
        assert_eq!(app.buffer_view(30).lines.len(), 30);
    }

    #[test]
    fn clear_expired_status_keeps_recent() {
        let tree = builtin_tree().unwrap();
        let mut app = App::new(&tree, &AppConfig::default());
        app.set_status_message("fresh".to_string(), false);
        app.clear_expired_status(Instant::now());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn clear_expired_status_removes_old() {
        let tree = builtin_tree().unwrap();
        let mut app = App::new(&tree, &AppConfig::default());
        app.set_status_message("old".to_string(), false);
        app.on_tick(Instant::now() + Duration::from_secs(5));
        assert!(app.status_message.is_none());
    }

    #[test]
    fn activate_link_reports_failure() {
        let tree = builtin_tree().unwrap();
        let mut app = App::new(&tree, &AppConfig::default());
        app.link_opener = failing_opener;
        open_resume(&mut app);
        app.activate_link();
        let (msg, is_error, _) = app.status_message.as_ref().unwrap();
        assert!(msg.contains("Cannot open #"));
        assert!(*is_error);
    }

    #[test]
    fn activate_link_reports_success() {
        let tree = builtin_tree().unwrap();
        let mut app = App::new(&tree, &AppConfig::default());
        app.link_opener = ok_opener;
        open_resume(&mut app);
        app.activate_link();
        let (msg, is_error, _) = app.status_message.as_ref().unwrap();
        assert_eq!(msg, "Opened #");
        assert!(!*is_error);
    }

    #[test]
    fn activate_link_ignores_text_files() {
        let tree = builtin_tree().unwrap();
        let mut app = App::new(&tree, &AppConfig::default());
        app.link_opener = failing_opener;
        app.nav.open_help();
        app.activate_link();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn sync_viewport_follows_cursor_in_listing() {
        let tree = builtin_tree().unwrap();
        let mut app = App::new(&tree, &AppConfig::default());
        app.nav.select_last();
        let view = app.buffer_view(5);
        app.sync_viewport(&view, 5);
        assert_eq!(app.viewport.offset(), 4);
    }
}
