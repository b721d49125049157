//! Line layout: turns navigation state into the main pane's display lines,
//! the matching gutter, and the cursor row.
//!
//! Output is rebuilt from scratch on every render.

use crate::state::{Mode, NavigationState};
use crate::tree::{FileContent, FileNode};

/// First header line of a directory listing.
pub const LISTING_BANNER: &str = "Netrw Directory Listing (press ? for help)";
/// Header lines above the blank separator in listing mode.
pub const LISTING_HEADER_LINES: usize = 2;
/// Label of the synthetic parent entry.
pub const PARENT_LABEL: &str = "../";
/// Marker drawn on filler rows.
pub const FILLER_MARKER: &str = "~";
/// Default minimum number of rows in the main pane.
pub const DEFAULT_MIN_VISIBLE_LINES: usize = 24;
/// Default width of line numbers in the gutter.
pub const DEFAULT_GUTTER_WIDTH: usize = 4;
/// Row holding the link line when viewing a link file (after header and blank).
pub const LINK_LINE: usize = 2;

/// How a display line should be styled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Banner, path, or file header.
    Header,
    /// Plain text: blank separators, file entries, file content.
    Text,
    /// A directory entry, including `../`.
    Directory,
    /// The activatable line of a link file.
    Link { target: String },
    /// Padding below the real content.
    Filler,
}

/// One row of the main pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub text: String,
    pub kind: LineKind,
}

impl DisplayLine {
    fn new(text: impl Into<String>, kind: LineKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    fn filler() -> Self {
        Self::new(FILLER_MARKER, LineKind::Filler)
    }
}

/// The fully laid-out main pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferView {
    pub lines: Vec<DisplayLine>,
    /// Same length as `lines`; blank for filler rows.
    pub gutter: Vec<String>,
    /// Highlighted row, listing mode only.
    pub cursor: Option<usize>,
    /// Number of real (non-filler) lines.
    pub content_len: usize,
}

impl BufferView {
    pub fn filler_count(&self) -> usize {
        self.lines.len() - self.content_len
    }
}

/// Rows available for the main pane, never fewer than `minimum`.
pub fn visible_lines(available_rows: u16, minimum: usize) -> usize {
    (available_rows as usize).max(minimum)
}

/// Display row of listing entry `selection`.
pub fn listing_cursor_row(selection: usize) -> usize {
    LISTING_HEADER_LINES + 1 + selection
}

/// Listing entry shown on display row `row`, if any.
pub fn listing_index_for_row(row: usize, entry_count: usize) -> Option<usize> {
    row.checked_sub(LISTING_HEADER_LINES + 1)
        .filter(|&i| i < entry_count)
}

/// Body lines of a file, without header.
pub fn file_content_lines(file: &FileNode) -> Vec<String> {
    match &file.content {
        FileContent::Text { body } => body.split('\n').map(str::to_string).collect(),
        FileContent::Link { target } => vec![link_line(target)],
    }
}

fn link_line(target: &str) -> String {
    format!("Open link: {}", target)
}

/// Lay out the main pane for the current state.
pub fn layout(nav: &NavigationState<'_>, visible: usize, gutter_width: usize) -> BufferView {
    let (lines, cursor) = match nav.mode() {
        Mode::Listing => (listing_lines(nav), Some(listing_cursor_row(nav.selection()))),
        Mode::Viewing(file) => (viewing_lines(file), None),
    };
    pad(lines, cursor, visible, gutter_width)
}

fn listing_lines(nav: &NavigationState<'_>) -> Vec<DisplayLine> {
    let entries = nav.entries();
    let mut lines = Vec::with_capacity(LISTING_HEADER_LINES + 2 + entries.len());
    lines.push(DisplayLine::new(LISTING_BANNER, LineKind::Header));
    lines.push(DisplayLine::new(
        format!("Directory: {}", nav.cwd_path()),
        LineKind::Header,
    ));
    lines.push(DisplayLine::new("", LineKind::Text));
    lines.push(DisplayLine::new(PARENT_LABEL, LineKind::Directory));
    lines.extend(entries.iter().map(|node| {
        let kind = if node.is_dir() {
            LineKind::Directory
        } else {
            LineKind::Text
        };
        DisplayLine::new(node.listing_label(), kind)
    }));
    lines
}

fn viewing_lines(file: &FileNode) -> Vec<DisplayLine> {
    let mut lines = vec![
        DisplayLine::new(format!("\" {}", file.name), LineKind::Header),
        DisplayLine::new("", LineKind::Text),
    ];
    match &file.content {
        FileContent::Text { body } => {
            lines.extend(body.split('\n').map(|l| DisplayLine::new(l, LineKind::Text)));
        }
        FileContent::Link { target } => lines.push(DisplayLine::new(
            link_line(target),
            LineKind::Link {
                target: target.clone(),
            },
        )),
    }
    lines
}

fn pad(
    mut lines: Vec<DisplayLine>,
    cursor: Option<usize>,
    visible: usize,
    gutter_width: usize,
) -> BufferView {
    let content_len = lines.len();
    let mut gutter: Vec<String> = (1..=content_len)
        .map(|n| format!("{:>width$}", n, width = gutter_width))
        .collect();

    let filler = visible.saturating_sub(content_len);
    lines.extend(std::iter::repeat_with(DisplayLine::filler).take(filler));
    gutter.extend(std::iter::repeat(" ".repeat(gutter_width)).take(filler));

    BufferView {
        lines,
        gutter,
        cursor: cursor.filter(|&c| c < content_len),
        content_len,
    }
}
