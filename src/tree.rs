//! Static, read-only tree of directories and files.
//!
//! The tree is built once at startup (see `content`) and never mutated.
//! Everything else holds plain references into it.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::error::{AppError, Result};

/// Separator used when joining node names into a display path.
pub const PATH_SEPARATOR: char = '/';

/// Body of a file node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Plain text shown line by line.
    Text { body: String },
    /// A reference to something outside the tree (opened externally).
    Link { target: String },
}

/// A leaf node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub name: String,
    /// Short label such as `md` or `lua`; display only.
    pub file_type: String,
    pub content: FileContent,
}

impl FileNode {
    pub fn text(name: impl Into<String>, file_type: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_type: file_type.into(),
            content: FileContent::Text { body: body.into() },
        }
    }

    pub fn link(name: impl Into<String>, file_type: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_type: file_type.into(),
            content: FileContent::Link {
                target: target.into(),
            },
        }
    }

    /// Link target, if this file is a link.
    pub fn link_target(&self) -> Option<&str> {
        match &self.content {
            FileContent::Link { target } => Some(target),
            FileContent::Text { .. } => None,
        }
    }
}

/// An interior node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    pub name: String,
    /// Stored order is irrelevant; display order comes from `Tree::list_children`.
    pub children: Vec<Node>,
}

impl Directory {
    pub fn new(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Number of entries in this directory's listing, including `../`.
    pub fn entry_count(&self) -> usize {
        1 + self.children.len()
    }

    pub fn dir_count(&self) -> usize {
        self.children.iter().filter(|c| c.is_dir()).count()
    }

    pub fn file_count(&self) -> usize {
        self.children.len() - self.dir_count()
    }
}

/// A node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Directory(Directory),
    File(FileNode),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Directory(d) => &d.name,
            Node::File(f) => &f.name,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory(_))
    }

    /// Name as shown in a listing: directories carry a trailing separator.
    pub fn listing_label(&self) -> String {
        match self {
            Node::Directory(d) => format!("{}{}", d.name, PATH_SEPARATOR),
            Node::File(f) => f.name.clone(),
        }
    }
}

/// Borrowed handle to either kind of node, used for path lookups.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Directory(&'a Directory),
    File(&'a FileNode),
}

impl<'a> NodeRef<'a> {
    fn name(&self) -> &'a str {
        match *self {
            NodeRef::Directory(d) => &d.name,
            NodeRef::File(f) => &f.name,
        }
    }

    fn is(&self, node: &Node) -> bool {
        match (self, node) {
            (NodeRef::Directory(a), Node::Directory(b)) => std::ptr::eq(*a, b),
            (NodeRef::File(a), Node::File(b)) => std::ptr::eq(*a, b),
            _ => false,
        }
    }
}

/// Total display order: directories before files, then case-sensitive name order.
pub fn display_order(a: &Node, b: &Node) -> Ordering {
    b.is_dir()
        .cmp(&a.is_dir())
        .then_with(|| a.name().cmp(b.name()))
}

/// Join node names into a display path.
///
/// A component that already ends in the separator (a root such as `/`)
/// is not followed by a second one.
pub fn join_path<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut path = String::new();
    for (i, name) in names.into_iter().enumerate() {
        if i > 0 && !path.ends_with(PATH_SEPARATOR) {
            path.push(PATH_SEPARATOR);
        }
        path.push_str(name);
    }
    path
}

/// The validated, immutable tree.
#[derive(Debug, Clone)]
pub struct Tree {
    root: Directory,
}

impl Tree {
    /// Validate and wrap a root directory.
    ///
    /// Names must be non-empty, unique among siblings, and (below the root)
    /// must not contain the path separator.
    pub fn new(root: Directory) -> Result<Self> {
        if root.name.is_empty() {
            return Err(AppError::InvalidTree("root directory has no name".into()));
        }
        validate_children(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Directory {
        &self.root
    }

    /// Children of `dir` in display order. Recomputed on every call.
    pub fn list_children(dir: &Directory) -> Vec<&Node> {
        let mut entries: Vec<&Node> = dir.children.iter().collect();
        entries.sort_by(|a, b| display_order(a, b));
        entries
    }

    /// Full path of `target`, searched from the root by identity.
    pub fn path_of(&self, target: NodeRef<'_>) -> Result<String> {
        if let NodeRef::Directory(d) = target {
            if std::ptr::eq(d, &self.root) {
                return Ok(self.root.name.clone());
            }
        }

        let mut trail = vec![self.root.name.as_str()];
        if find_trail(&self.root, &target, &mut trail) {
            trail.push(target.name());
            Ok(join_path(trail))
        } else {
            Err(AppError::NotFound(target.name().to_string()))
        }
    }
}

fn validate_children(dir: &Directory) -> Result<()> {
    let mut seen = HashSet::new();
    for child in &dir.children {
        let name = child.name();
        if name.is_empty() {
            return Err(AppError::InvalidTree(format!(
                "empty name inside '{}'",
                dir.name
            )));
        }
        if name.contains(PATH_SEPARATOR) {
            return Err(AppError::InvalidTree(format!(
                "name '{}' contains '{}'",
                name, PATH_SEPARATOR
            )));
        }
        if !seen.insert(name) {
            return Err(AppError::InvalidTree(format!(
                "duplicate name '{}' inside '{}'",
                name, dir.name
            )));
        }
        if let Node::Directory(sub) = child {
            validate_children(sub)?;
        }
    }
    Ok(())
}

/// Depth-first search; on success `trail` holds the names of every
/// directory strictly above the target.
fn find_trail<'a>(dir: &'a Directory, target: &NodeRef<'_>, trail: &mut Vec<&'a str>) -> bool {
    for child in &dir.children {
        if target.is(child) {
            return true;
        }
        if let Node::Directory(sub) = child {
            trail.push(&sub.name);
            if find_trail(sub, target, trail) {
                return true;
            }
            trail.pop();
        }
    }
    false
}
