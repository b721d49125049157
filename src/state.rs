//! Navigation state: where the user is, what is selected, and which mode
//! is active. Mutated only by the dispatcher in `handler`.

use std::time::{Duration, Instant};

use crate::content::help_file;
use crate::error::{AppError, Result};
use crate::tree::{join_path, Directory, FileNode, Node, Tree};

/// Default window for two-key chords such as `gg`.
pub const DEFAULT_CHORD_WINDOW: Duration = Duration::from_millis(500);

/// Interaction mode without its payload, for keymap lookups and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Listing,
    Viewing,
}

impl ModeKind {
    /// Short tag shown in the tab line.
    pub fn tag(&self) -> &'static str {
        match self {
            ModeKind::Listing => "netrw",
            ModeKind::Viewing => "buffer",
        }
    }
}

/// Active mode. A file is open exactly when the mode is `Viewing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode<'t> {
    Listing,
    Viewing(&'t FileNode),
}

/// One row of a directory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'t> {
    /// The synthetic `../` row at index 0.
    Parent,
    Node(&'t Node),
}

/// What a confirm or go-up actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    EnteredDirectory,
    WentUp,
    OpenedFile,
}

// ── Chords ───────────────────────────────────────────────────────────────────

/// A pending first press, stamped with the time it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingChord<T> {
    value: T,
    started: Instant,
}

/// Detects a repeated press of the same value within a time window.
///
/// The pending press is only cleared by its window elapsing or by the
/// chord completing; unrelated input leaves it alone.
#[derive(Debug, Clone)]
pub struct ChordTracker<T> {
    pending: Option<PendingChord<T>>,
    window: Duration,
}

impl<T: Copy + PartialEq> ChordTracker<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            pending: None,
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Register a press. Returns `true` when it completes a chord.
    pub fn press(&mut self, value: T, now: Instant) -> bool {
        match self.pending.take() {
            Some(p) if p.value == value && now.duration_since(p.started) <= self.window => true,
            _ => {
                self.pending = Some(PendingChord {
                    value,
                    started: now,
                });
                false
            }
        }
    }

    /// Whether a first press is waiting and still inside its window.
    pub fn is_pending(&self, now: Instant) -> bool {
        self.pending
            .map(|p| now.duration_since(p.started) <= self.window)
            .unwrap_or(false)
    }

    /// Drop a pending press whose window has elapsed. Returns `true` if one was dropped.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.pending.is_some() && !self.is_pending(now) {
            self.pending = None;
            return true;
        }
        false
    }
}

// ── Navigation state ─────────────────────────────────────────────────────────

/// The single value holding all interaction state.
#[derive(Debug, Clone)]
pub struct NavigationState<'t> {
    current: &'t Directory,
    /// Root first, excluding `current`.
    ancestors: Vec<&'t Directory>,
    selection: usize,
    mode: Mode<'t>,
    pub chord: ChordTracker<char>,
}

impl<'t> NavigationState<'t> {
    /// Start at the tree root in listing mode.
    pub fn new(tree: &'t Tree, chord_window: Duration) -> Self {
        Self {
            current: tree.root(),
            ancestors: Vec::new(),
            selection: 0,
            mode: Mode::Listing,
            chord: ChordTracker::new(chord_window),
        }
    }

    pub fn current_dir(&self) -> &'t Directory {
        self.current
    }

    pub fn ancestors(&self) -> &[&'t Directory] {
        &self.ancestors
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn mode(&self) -> Mode<'t> {
        self.mode
    }

    pub fn mode_kind(&self) -> ModeKind {
        match self.mode {
            Mode::Listing => ModeKind::Listing,
            Mode::Viewing(_) => ModeKind::Viewing,
        }
    }

    pub fn open_file(&self) -> Option<&'t FileNode> {
        match self.mode {
            Mode::Listing => None,
            Mode::Viewing(file) => Some(file),
        }
    }

    /// Sorted children of the current directory.
    pub fn entries(&self) -> Vec<&'t Node> {
        Tree::list_children(self.current)
    }

    /// Listing length including the parent row.
    pub fn entry_count(&self) -> usize {
        self.current.entry_count()
    }

    pub fn selected_entry(&self) -> Entry<'t> {
        match self.selection {
            0 => Entry::Parent,
            i => self
                .entries()
                .get(i - 1)
                .map(|&node| Entry::Node(node))
                .unwrap_or(Entry::Parent),
        }
    }

    /// Report a selection outside the listing.
    pub fn check_selection(&self) -> Result<()> {
        let len = self.entry_count();
        if self.selection < len {
            Ok(())
        } else {
            Err(AppError::InvalidSelection {
                index: self.selection,
                len,
            })
        }
    }

    // ── Selection movement (wraps) ───────────────────────────────────────────

    pub fn select_next(&mut self) {
        self.selection = (self.selection + 1) % self.entry_count();
    }

    pub fn select_previous(&mut self) {
        let len = self.entry_count();
        self.selection = (self.selection + len - 1) % len;
    }

    pub fn select_first(&mut self) {
        self.selection = 0;
    }

    pub fn select_last(&mut self) {
        self.selection = self.entry_count() - 1;
    }

    /// Select `index`, clamped to the listing.
    pub fn select_index(&mut self, index: usize) {
        self.selection = index.min(self.entry_count() - 1);
    }

    // ── Transitions ──────────────────────────────────────────────────────────

    /// Activate the selected entry. Only meaningful in listing mode.
    pub fn confirm(&mut self) -> Transition {
        if self.mode != Mode::Listing {
            return Transition::None;
        }
        if let Err(e) = self.check_selection() {
            log::warn!("{}; clamping", e);
            self.select_index(self.selection);
        }
        match self.selected_entry() {
            Entry::Parent => self.go_up(),
            Entry::Node(Node::Directory(dir)) => {
                self.enter_directory(dir);
                Transition::EnteredDirectory
            }
            Entry::Node(Node::File(file)) => {
                self.open(file);
                Transition::OpenedFile
            }
        }
    }

    /// Move to the parent directory. No-op at the root.
    pub fn go_up(&mut self) -> Transition {
        if self.mode != Mode::Listing {
            return Transition::None;
        }
        match self.ancestors.pop() {
            Some(parent) => {
                self.current = parent;
                self.selection = 0;
                log::debug!("Up to {}", self.cwd_path());
                Transition::WentUp
            }
            None => Transition::None,
        }
    }

    fn enter_directory(&mut self, dir: &'t Directory) {
        self.ancestors.push(self.current);
        self.current = dir;
        self.selection = 0;
        log::debug!("Entered {}", self.cwd_path());
    }

    /// Switch to viewing `file`. Listing position is left untouched.
    pub fn open(&mut self, file: &'t FileNode) {
        self.mode = Mode::Viewing(file);
        log::debug!("Opened {}", file.name);
    }

    /// Open the static help file as if it were a real one.
    pub fn open_help(&mut self) {
        if self.mode == Mode::Listing {
            self.open(help_file());
        }
    }

    /// Close the open file. Returns `false` if nothing was open.
    pub fn close(&mut self) -> bool {
        match self.mode {
            Mode::Viewing(file) => {
                log::debug!("Closed {}", file.name);
                self.mode = Mode::Listing;
                true
            }
            Mode::Listing => false,
        }
    }

    // ── Paths ────────────────────────────────────────────────────────────────

    /// Path of the current directory, rebuilt from the ancestor stack.
    pub fn cwd_path(&self) -> String {
        join_path(
            self.ancestors
                .iter()
                .chain(std::iter::once(&self.current))
                .map(|d| d.name.as_str()),
        )
    }

    /// Path of `file` as if it lived in the current directory.
    pub fn file_path(&self, file: &FileNode) -> String {
        join_path(
            self.ancestors
                .iter()
                .chain(std::iter::once(&self.current))
                .map(|d| d.name.as_str())
                .chain(std::iter::once(file.name.as_str())),
        )
    }
}
