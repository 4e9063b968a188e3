//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `iconset`
//! command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `iconset` library.
//!
//! Commands that finish with a negative verdict (a diff found changes,
//! validation found errors) print their own report and return [`Failed`], so
//! the binary exits non-zero without printing a second error message.

pub mod completions;
pub mod diff;
pub mod info;
pub mod merge;
pub mod resolve;
pub mod validate;

use anyhow::{Context, Result};
use std::path::Path;

use iconset::icon_set::IconSet;

/// A command ran to completion but the outcome is a failure.
#[derive(Debug)]
pub struct Failed;

impl std::fmt::Display for Failed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("command reported failure")
    }
}

impl std::error::Error for Failed {}

/// Read and parse an icon-set document.
pub fn load_icon_set(path: &Path) -> Result<IconSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    content
        .parse::<IconSet>()
        .with_context(|| format!("Failed to load icon set from {}", path.display()))
}

/// Write `content` to `path`, or to stdout without one.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            if content.ends_with('\n') {
                print!("{}", content);
            } else {
                println!("{}", content);
            }
            Ok(())
        }
    }
}
