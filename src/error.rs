use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from terminal setup or reading a tree file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid path provided by the user.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A node could not be resolved from the tree root.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A selection index fell outside the current listing.
    #[error("Invalid selection: index {index} outside listing of {len} entries")]
    InvalidSelection { index: usize, len: usize },

    /// A tree definition violated a structural rule.
    #[error("Invalid tree: {0}")]
    InvalidTree(String),

    /// A configuration or tree file could not be parsed.
    #[error("Config error: {0}")]
    Config(String),
}
