//! # Error Handling
//!
//! This module defines the centralized error type for the `iconset` crate.
//! It uses the `thiserror` library to derive an `Error` enum covering every
//! failure that can surface to a caller.
//!
//! Most of the icon-set core never fails: invalid alias references are
//! reported as `false`, unresolved chains as `None`, and merging always
//! produces a result. Errors are reserved for the boundaries:
//!
//! - Parsing a malformed icon-set document.
//! - Constructing an icon from collaborator output that is unusable.
//! - Collaborator (markup cleanup or rendering) failures.
//! - CLI configuration problems.
//! - I/O and serialization.

use thiserror::Error;

/// Main error type for icon-set operations
#[derive(Error, Debug)]
pub enum Error {
    /// The icon-set document is malformed and no icon set can be built from it.
    #[error("Icon set parsing error: {message}")]
    Parse { message: String },

    /// An icon could not be constructed from the data it was given.
    #[error("Invalid icon '{name}': {message}")]
    InvalidIcon { name: String, message: String },

    /// A markup collaborator (cleanup or renderer) failed for one icon.
    #[error("Markup error for '{name}': {message}")]
    Markup { name: String, message: String },

    /// An error occurred while parsing the `.iconset.yaml` configuration file.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
