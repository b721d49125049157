//! Tab line and status line text, derived from navigation state.

use crate::layout::file_content_lines;
use crate::state::{Mode, ModeKind, NavigationState};
use crate::tree::{NodeRef, Tree};

/// Label in the mode box; this browser never leaves normal mode.
pub const MODE_LABEL: &str = "NORMAL";
/// Right segment of the status line while listing.
pub const LISTING_RIGHT: &str = "utf-8[unix]  netrw";

/// The three status line segments plus the mode box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub mode_label: &'static str,
    pub left: String,
    pub mid: String,
    pub right: String,
}

/// Everything the tab line and status line show for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub tab: String,
    pub status: StatusLine,
}

/// Derive tab and status text from the current state.
pub fn present(tree: &Tree, nav: &NavigationState<'_>) -> Presentation {
    match nav.mode() {
        Mode::Listing => {
            let path = nav.cwd_path();
            let dir = nav.current_dir();
            Presentation {
                tab: format!("[1] {}  {}", ModeKind::Listing.tag(), path),
                status: StatusLine {
                    mode_label: MODE_LABEL,
                    left: path,
                    mid: format!("{} dirs, {} files", dir.dir_count(), dir.file_count()),
                    right: LISTING_RIGHT.to_string(),
                },
            }
        }
        Mode::Viewing(file) => {
            let path = tree.path_of(NodeRef::File(file)).unwrap_or_else(|e| {
                log::debug!("{}; using listing path", e);
                nav.file_path(file)
            });
            Presentation {
                tab: format!("[1] {}", file.name),
                status: StatusLine {
                    mode_label: MODE_LABEL,
                    left: path,
                    mid: String::new(),
                    right: format!("{}  {}L", file.file_type, file_content_lines(file).len()),
                },
            }
        }
    }
}
