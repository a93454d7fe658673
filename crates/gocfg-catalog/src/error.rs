//! Error types for catalog operations.

use std::path::PathBuf;

/// Errors that can occur while building or loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A name that is not a known GOOS, GOARCH, or link mode.
    #[error("unknown {kind} '{value}'")]
    UnknownName {
        /// What kind of name was being parsed ("goos", "goarch", "linkmode").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading a catalog file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file not found.
    #[error("catalog file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Structural problem in a catalog definition.
    #[error("validation error: {detail}")]
    Validation {
        /// Description of the validation failure.
        detail: String,
    },
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
