//! Input dispatch: applies key and mouse events to the app.
//!
//! Every handler returns whether the event was consumed. Unbound input is
//! left untouched so the surrounding terminal keeps its default behavior.

use std::time::Instant;

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;
use crate::keymap::{self, Action, CHORD_KEY};
use crate::layout::{self, LINK_LINE};
use crate::state::{ModeKind, Transition};

/// Handle a key press at time `now`.
pub fn handle_key_event(app: &mut App, key: KeyEvent, now: Instant) -> bool {
    match keymap::resolve(app.nav.mode_kind(), &key) {
        Some(action) => {
            apply(app, action, now);
            true
        }
        None => false,
    }
}

/// Apply a resolved action.
pub fn apply(app: &mut App, action: Action, now: Instant) {
    log::debug!("Action {:?} in {:?}", action, app.nav.mode_kind());
    match action {
        Action::SelectNext => app.nav.select_next(),
        Action::SelectPrevious => app.nav.select_previous(),
        Action::SelectLast => app.nav.select_last(),
        Action::Confirm => {
            if app.nav.confirm() != Transition::None {
                app.viewport.reset();
            }
        }
        Action::GoUp => {
            if app.nav.go_up() == Transition::WentUp {
                app.viewport.reset();
            }
        }
        Action::Help => {
            app.nav.open_help();
            app.viewport.reset();
        }
        Action::Close => {
            if app.nav.close() {
                app.viewport.reset();
            }
        }
        Action::TopChord => {
            if app.nav.chord.press(CHORD_KEY, now) {
                match app.nav.mode_kind() {
                    ModeKind::Listing => app.nav.select_first(),
                    ModeKind::Viewing => app.viewport.scroll_to_top(),
                }
            }
        }
        Action::ScrollDown => app.viewport.scroll_by(app.settings.scroll_step as isize),
        Action::ScrollUp => app.viewport.scroll_by(-(app.settings.scroll_step as isize)),
        Action::ScrollBottom => app.viewport.scroll_to_end(),
        Action::OpenLink => app.activate_link(),
        Action::Quit => app.quit(),
    }
}

/// Display row under terminal row `y`, if it falls inside the main pane.
fn display_row(app: &App, y: u16) -> Option<usize> {
    let area = app.buffer_area;
    if y < area.y || y >= area.y + area.height {
        return None;
    }
    Some((y - area.y) as usize + app.viewport.offset())
}

/// Handle a mouse event at time `now`.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, now: Instant) -> bool {
    if !app.settings.mouse {
        return false;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(row) = display_row(app, mouse.row) else {
                return false;
            };
            click_row(app, row, now)
        }
        MouseEventKind::ScrollDown => {
            match app.nav.mode_kind() {
                ModeKind::Listing => app.nav.select_next(),
                ModeKind::Viewing => app.viewport.scroll_by(app.settings.scroll_step as isize),
            }
            true
        }
        MouseEventKind::ScrollUp => {
            match app.nav.mode_kind() {
                ModeKind::Listing => app.nav.select_previous(),
                ModeKind::Viewing => {
                    app.viewport.scroll_by(-(app.settings.scroll_step as isize))
                }
            }
            true
        }
        _ => false,
    }
}

/// A click on display row `row`: select in listing mode (a second click
/// confirms), activate the link line in viewing mode.
fn click_row(app: &mut App, row: usize, now: Instant) -> bool {
    match app.nav.mode_kind() {
        ModeKind::Listing => {
            let Some(index) = layout::listing_index_for_row(row, app.nav.entry_count()) else {
                return false;
            };
            app.nav.select_index(index);
            if app.clicks.press(row, now) {
                apply(app, Action::Confirm, now);
            }
            true
        }
        ModeKind::Viewing => {
            let is_link = app.nav.open_file().and_then(|f| f.link_target()).is_some();
            if is_link && row == LINK_LINE {
                app.activate_link();
                true
            } else {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::layout::Rect;

    use crate::config::AppConfig;
    use crate::content::builtin_tree;
    use crate::state::Mode;
    use crate::tree::Tree;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn code(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn ok_opener(_: &str) -> std::io::Result<()> {
        Ok(())
    }

    fn setup(tree: &Tree) -> App<'_> {
        let mut app = App::new(tree, &AppConfig::default());
        app.buffer_area = Rect::new(5, 1, 60, 24);
        app.link_opener = ok_opener;
        app
    }

    fn press(app: &mut App, k: KeyEvent) -> bool {
        handle_key_event(app, k, Instant::now())
    }

    /// Move the selection onto `name` with `j` presses.
    fn select(app: &mut App, name: &str) {
        let target = app
            .nav
            .entries()
            .iter()
            .position(|n| n.name() == name)
            .unwrap()
            + 1;
        while app.nav.selection() != target {
            press(app, key('j'));
        }
    }

    #[test]
    fn j_and_k_move_selection_with_wrap() {
        let tree = builtin_tree().unwrap();
        let mut app = setup(&tree);
        assert!(press(&mut app, key('j')));
        assert_eq!(app.nav.selection(), 1);
        press(&mut app, code(KeyCode::Up));
        press(&mut app, code(KeyCode::Up));
        assert_eq!(app.nav.selection(), 5);
        press(&mut app, key('j'));
        assert_eq!(app.nav.selection(), 0);
    }

    #[test]
    fn scenario_resume_opens_link_view() {
        let tree = builtin_tree().unwrap();
        let mut app = setup(&tree);
        select(&mut app, "resume.pdf");
        assert!(press(&mut app, code(KeyCode::Enter)));
        assert_eq!(app.nav.mode_kind(), ModeKind::Viewing);
        let view = app.buffer_view(24);
        assert_eq!(view.content_len, 3);
        assert_eq!(view.lines[2].text, "Open link: #");
    }

    #[test]
    fn l_enters_directory_and_h_goes_up() {
        let tree = builtin_tree().unwrap();
        let mut app = setup(&tree);
        select(&mut app, "projects");
        press(&mut app, key('l'));
        assert_eq!(app.nav.cwd_path(), "~/projects");
        press(&mut app, key('j'));
        press(&mut app, key('h'));
        assert_eq!(app.nav.cwd_path(), "~");
        assert_eq!(app.nav.selection(), 0);
    }

    #[test]
    fn enter_on_parent_at_root_is_noop() {
        let tree = builtin_tree().unwrap();
        let mut app = setup(&tree);
        assert!(press(&mut app, code(KeyCode::Enter)));
        assert_eq!(app.nav.cwd_path(), "~");
        assert_eq!(app.nav.selection(), 0);
        assert_eq!(app.nav.mode(), Mode::Listing);
    }

    #[test]
    fn gg_jumps_to_top_and_shift_g_to_bottom() {
        let tree = builtin_tree().unwrap();
        let mut app = setup(&tree);
        let t0 = Instant::now();
        handle_key_event(&mut app, key('G'), t0);
        assert_eq!(app.nav.selection(), 5);
        handle_key_event(&mut app, key('g'), t0);
        assert_eq!(app.nav.selection(), 5);
        handle_key_event(&mut app, key('g'), t0 + Duration::from_millis(100));
        assert_eq!(app.nav.selection(), 0);
    }

    #[test]
    fn slow_g_then_unrelated_keys_never_jumps() {
        let tree = builtin_tree().unwrap();
        let mut app = setup(&tree);
        let t0 = Instant::now();
        handle_key_event(&mut app, key('G'), t0);
        handle_key_event(&mut app, key('g'), t0);
        let late = t0 + Duration::from_millis(800);
        app.on_tick(late);
        handle_key_event(&mut app, key('k'), late);
        handle_key_event(&mut app, key('k'), late);
        assert_eq!(app.nav.selection(), 3);
    }

    #[test]
    fn slow_second_g_starts_new_chord() {
        let tree = builtin_tree().unwrap();
        let mut app = setup(&tree);
        let t0 = Instant::now();
        handle_key_event(&mut app, key('G'), t0);
        handle_key_event(&mut app, key('g'), t0);
        handle_key_event(&mut app, key('g'), t0 + Duration::from_millis(700));
        assert_eq!(app.nav.selection(), 5);
        handle_key_event(&mut app, key('g'), t0 + Duration::from_millis(800));
        assert_eq!(app.nav.selection(), 0);
    }

    #[test]
    fn viewing_keys_scroll_and_close() {
        let tree = builtin_tree().unwrap();
        let mut app = setup(&tree);
        select(&mut app, "about.txt");
        let selection = app.nav.selection();
        press(&mut app, code(KeyCode::Enter));
        press(&mut app, key('j'));
        press(&mut app, key('j'));
        assert_eq!(app.viewport.offset(), 2);
        press(&mut app, key('k'));
        assert_eq!(app.viewport.offset(), 1);
        assert!(press(&mut app, key('q')));
        assert_eq!(app.nav.mode(), Mode::Listing);
        assert_eq!(app.nav.selection(), selection);
        assert_eq!(app.viewport.offset(), 0);
        assert!(!app.should_quit);
    }

    #[test]
    fn viewing_gg_scrolls_to_top() {
        let tree = builtin_tree().unwrap();
        let mut app = setup(&tree);
        select(&mut app, "about.txt");
        press(&mut app, code(KeyCode::Enter));
        let t0 = Instant::now();
        handle_key_event(&mut app, key('j'), t0);
        handle_key_event(&mut app, key('j'), t0);
        handle_key_event(&mut app, key('g'), t0);
        handle_key_event(&mut app, key('g'), t0 + Duration::from_millis(50));
        assert_eq!(app.viewport.offset(), 0);
    }

    #[test]
    fn viewing_shift_g_scrolls_to_end_on_render() {
        let tree = builtin_tree().unwrap();
        let mut app = setup(&tree);
        select(&mut app, "about.txt");
        press(&mut app, code(KeyCode::Enter));
        press(&mut app, key('G'));
        let view = app.buffer_view(5);
        app.sync_viewport(&view, 5);
        assert_eq!(app.viewport.offset(), view.lines.len() - 5);
    }

    #[test]
    fn help_opens_and_q_returns() {
        let tree = builtin_tree().unwrap();
        let mut app = setup(&tree);
        press(&mut app, key('j'));
        press(&mut app, key('?'));
        assert_eq!(app.nav.open_file().unwrap().name, "netrw-help.txt");
        press(&mut app, key('q'));
        assert_eq!(app.nav.mode(), Mode::Listing);
        assert_eq!(app.nav.selection(), 1);
    }

    #[test]
    fn unbound_keys_not_consumed() {
        let tree = builtin_tree().unwrap();
        let mut app = setup(&tree);
        assert!(!press(&mut app, key('x')));
        assert!(!press(&mut app, code(KeyCode::PageDown)));
        assert_eq!(app.nav.selection(), 0);
    }

    #[test]
    fn q_in_listing_quits() {
        let tree = builtin_tree().unwrap();
        let mut app = setup(&tree);
        press(&mut app, key('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn click_selects_and_double_click_confirms() {
        let tree = builtin_tree().unwrap();
        let mut app = setup(&tree);
        let t0 = Instant::now();
        // Pane starts at y=1; display row 5 is listing index 2 (projects/).
        assert!(handle_mouse_event(&mut app, click(6), t0));
        assert_eq!(app.nav.selection(), 2);
        assert_eq!(app.nav.cwd_path(), "~");
        assert!(handle_mouse_event(
            &mut app,
            click(6),
            t0 + Duration::from_millis(100)
        ));
        assert_eq!(app.nav.cwd_path(), "~/projects");
    }

    #[test]
    fn click_on_header_is_ignored() {
        let tree = builtin_tree().unwrap();
        let mut app = setup(&tree);
        assert!(!handle_mouse_event(&mut app, click(1), Instant::now()));
        assert!(!handle_mouse_event(&mut app, click(0), Instant::now()));
        assert_eq!(app.nav.selection(), 0);
    }

    #[test]
    fn click_on_link_line_opens_link() {
        let tree = builtin_tree().unwrap();
        let mut app = setup(&tree);
        select(&mut app, "resume.pdf");
        press(&mut app, code(KeyCode::Enter));
        assert!(handle_mouse_event(&mut app, click(3), Instant::now()));
        let (msg, _, _) = app.status_message.as_ref().unwrap();
        assert_eq!(msg, "Opened #");
    }

    #[test]
    fn mouse_disabled_ignores_clicks() {
        let tree = builtin_tree().unwrap();
        let mut app = setup(&tree);
        app.settings.mouse = false;
        assert!(!handle_mouse_event(&mut app, click(6), Instant::now()));
        assert_eq!(app.nav.selection(), 0);
    }
}
