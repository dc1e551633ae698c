//! Error types for fa-search
//!
//! Internal helpers return [`IconResult`]; the public search, copy and
//! recolor operations absorb these errors and fall back instead of raising.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the catalog or touching icon assets
#[derive(Debug, Error)]
pub enum IconError {
    /// Catalog loading or conversion errors
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// An asset file could not be read or written
    #[error("Asset error at {path}: {reason}")]
    Asset { path: PathBuf, reason: String },

    /// Requested asset file is absent
    #[error("Missing asset: {0}")]
    MissingAsset(PathBuf),

    /// File exists but has no `<svg` tag
    #[error("Invalid SVG file: {0}")]
    InvalidSvg(PathBuf),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl IconError {
    pub(crate) fn asset(path: impl Into<PathBuf>, err: impl ToString) -> Self {
        IconError::Asset {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias for fa-search operations
pub type IconResult<T> = Result<T, IconError>;
