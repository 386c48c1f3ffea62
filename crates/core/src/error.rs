use std::io;
use std::path::PathBuf;

use crate::types::Position;

/// Errors that can occur while loading and resolving a source unit
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),

    #[error("syntax error in {} at {position}: {message}", .file.display())]
    Syntax {
        file: PathBuf,
        position: Position,
        message: String,
    },

    #[error("semantic error: {0}")]
    Semantic(String),

    #[error("no top-level declaration named `{0}`")]
    NotFound(String),

    #[error("`{0}` is not a trait")]
    NotATrait(String),
}

/// Result type alias for cargo-mocker operations
pub type Result<T> = std::result::Result<T, Error>;
