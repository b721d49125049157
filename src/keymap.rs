//! Mode-scoped key bindings.
//!
//! `resolve` is a pure lookup; applying the resulting `Action` happens in
//! `handler`. Keys without a binding in the current mode resolve to `None`
//! and are left alone.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::state::ModeKind;

/// Character that starts the go-to-top chord (`gg`).
pub const CHORD_KEY: char = 'g';

/// A bound operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Listing
    SelectNext,
    SelectPrevious,
    Confirm,
    GoUp,
    SelectLast,
    Help,
    // Viewing
    Close,
    ScrollDown,
    ScrollUp,
    ScrollBottom,
    OpenLink,
    // Both
    /// First or second half of the `gg` chord.
    TopChord,
    Quit,
}

/// Look up the action bound to `key` in `mode`.
pub fn resolve(mode: ModeKind, key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    match mode {
        ModeKind::Listing => match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectPrevious),
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => Some(Action::Confirm),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::GoUp),
            KeyCode::Char(CHORD_KEY) => Some(Action::TopChord),
            KeyCode::Char('G') => Some(Action::SelectLast),
            KeyCode::Char('?') => Some(Action::Help),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        ModeKind::Viewing => match key.code {
            KeyCode::Char('q') => Some(Action::Close),
            KeyCode::Char(CHORD_KEY) => Some(Action::TopChord),
            KeyCode::Char('G') => Some(Action::ScrollBottom),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Enter => Some(Action::OpenLink),
            _ => None,
        },
    }
}
