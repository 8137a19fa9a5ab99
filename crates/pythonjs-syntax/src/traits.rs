//! Traits for front-end readers.

use crate::tree::Module;

/// Error that can occur when reading source into a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("unsupported syntax: {0}")]
    Unsupported(String),

    #[error("expected {expected}, got {got}")]
    UnexpectedNode { expected: String, got: String },

    #[error("invalid syntax tree: {0}")]
    Json(#[from] serde_json::Error),
}

/// A reader turns source text into the syntax tree.
pub trait Reader: Send + Sync {
    /// Language identifier (e.g., "python", "json").
    fn language(&self) -> &'static str;

    /// File extensions this reader handles (e.g., &["py"]).
    fn extensions(&self) -> &'static [&'static str];

    /// Parse source text into a module tree.
    fn read(&self, source: &str) -> Result<Module, ReadError>;
}
