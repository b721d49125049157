//! Content provider: the built-in portfolio tree, the help file, and
//! loading a custom tree from a TOML file.

use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::tree::{Directory, FileNode, Node, Tree};

/// Name of the synthetic help file.
pub const HELP_FILE_NAME: &str = "netrw-help.txt";

const HELP_TEXT: &str = "\
Netrw help

j / k / ↓ / ↑   : move down / up
h / l / ← / →   : go up dir / open
Enter           : open
gg / G          : top / bottom
q               : close buffer (quit from listing)
Ctrl+C          : quit
?               : this help";

const ABOUT: &str = "\
# About Me

Hello. I build pragmatic software with a focus on developer experience, performance, and clean design.

- Languages: Rust, TypeScript, Python
- Interests: compilers, terminals, tiny utilities
- Tools: Neovim, tmux, zsh, Linux

This page is a terminal portfolio you browse the way you browse netrw.";

const TERMINAL_PORTFOLIO: &str = "\
# Terminal-Style Portfolio

This project emulates a Neovim workspace with a Rosé Pine palette.
Navigate with j/k, open with Enter, go up with h, and close buffers with q.

Highlights:
- Netrw-like directory landing
- Keyboard-driven navigation
- Faux statusline and tabline
- Single static binary";

const COOL_ALGORITHMS: &str = "\
# Cool Algorithms

- Implemented an A* pathfinding visualizer
- Wrote a small constraint solver
- Built an image filter playground on top of wasm";

const CONTACT: &str = "\
# Contact

- Email: hello@example.com
- GitHub: https://github.com/example
- Web: https://example.com";

const INIT_LUA: &str = "\
-- ~/.config/nvim/init.lua
-- Minimal Rosé Pine setup (mock)
vim.opt.termguicolors = true
vim.opt.number = true
vim.opt.relativenumber = true
vim.cmd('colorscheme rose-pine')

-- Keymaps
vim.keymap.set('n', '<leader>ff', function() print('Find files') end)
vim.keymap.set('n', '<leader>gg', function() print('Git status') end)";

/// The static help file. Not reachable from any tree root.
pub fn help_file() -> &'static FileNode {
    static HELP: OnceLock<FileNode> = OnceLock::new();
    HELP.get_or_init(|| FileNode::text(HELP_FILE_NAME, "txt", HELP_TEXT))
}

/// The built-in portfolio tree.
pub fn builtin_tree() -> Result<Tree> {
    Tree::new(Directory::new(
        "~",
        vec![
            Node::File(FileNode::text("about.txt", "txt", ABOUT)),
            Node::Directory(Directory::new(
                "projects",
                vec![
                    Node::File(FileNode::text(
                        "01-terminal-portfolio.md",
                        "md",
                        TERMINAL_PORTFOLIO,
                    )),
                    Node::File(FileNode::text(
                        "02-cool-algorithms.md",
                        "md",
                        COOL_ALGORITHMS,
                    )),
                ],
            )),
            Node::File(FileNode::text("contact.txt", "txt", CONTACT)),
            Node::File(FileNode::link("resume.pdf", "pdf", "#")),
            Node::Directory(Directory::new(
                ".config",
                vec![Node::Directory(Directory::new(
                    "nvim",
                    vec![Node::File(FileNode::text("init.lua", "lua", INIT_LUA))],
                ))],
            )),
        ],
    ))
}

// ── TOML tree files ──────────────────────────────────────────────────────────

/// One node as written in a tree file.
///
/// At most one of `content`, `link`, `children` may be present. A node with
/// `children` is a directory; anything else is a file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeDef {
    name: String,
    filetype: Option<String>,
    content: Option<String>,
    link: Option<String>,
    children: Option<Vec<NodeDef>>,
}

impl NodeDef {
    fn into_node(self) -> Result<Node> {
        let filetype = self
            .filetype
            .clone()
            .unwrap_or_else(|| filetype_from_name(&self.name));
        match (self.content, self.link, self.children) {
            (None, None, Some(children)) => {
                let children = children
                    .into_iter()
                    .map(NodeDef::into_node)
                    .collect::<Result<Vec<_>>>()?;
                Ok(Node::Directory(Directory::new(self.name, children)))
            }
            (Some(body), None, None) => Ok(Node::File(FileNode::text(self.name, filetype, body))),
            (None, Some(target), None) => Ok(Node::File(FileNode::link(self.name, filetype, target))),
            (None, None, None) => Ok(Node::File(FileNode::text(self.name, filetype, ""))),
            _ => Err(AppError::InvalidTree(format!(
                "'{}' mixes content, link and children",
                self.name
            ))),
        }
    }
}

/// Extension of `name`, or `txt` when it has none.
fn filetype_from_name(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext.to_string(),
        _ => "txt".to_string(),
    }
}

/// Parse a tree from TOML text. The top-level table is the root directory.
pub fn parse_tree(text: &str) -> Result<Tree> {
    let def: NodeDef = toml::from_str(text).map_err(|e| AppError::Config(e.to_string()))?;
    if def.content.is_some() || def.link.is_some() {
        return Err(AppError::InvalidTree(format!(
            "root '{}' must be a directory",
            def.name
        )));
    }
    let children = def
        .children
        .unwrap_or_default()
        .into_iter()
        .map(NodeDef::into_node)
        .collect::<Result<Vec<_>>>()?;
    Tree::new(Directory::new(def.name, children))
}

/// Load a tree file from disk.
pub fn load_tree_file(path: &Path) -> Result<Tree> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        AppError::InvalidPath(format!("{}: {}", path.display(), e))
    })?;
    let tree = parse_tree(&text)?;
    log::info!(
        "Loaded tree '{}' from {}",
        tree.root().name,
        path.display()
    );
    Ok(tree)
}
