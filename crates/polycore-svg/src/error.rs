//! Errors raised while configuring or writing SVG documents.

use thiserror::Error;

/// Errors from the SVG layer.
#[derive(Debug, Error)]
pub enum SvgError {
    /// Reading a config or writing the document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A color string was not a known keyword or `#rrggbb`.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
}

/// Result alias for SVG operations.
pub type Result<T> = std::result::Result<T, SvgError>;
