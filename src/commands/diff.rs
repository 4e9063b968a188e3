//! # Diff Command Implementation
//!
//! This module implements the `diff` subcommand, which reports whether the
//! visible content of two icon sets differs.
//!
//! ## Functionality
//!
//! - **Content Comparison**: Names and alias structure are ignored; only what
//!   each visible entry renders as is compared.
//! - **Change Listing**: Lists the visible names whose content exists only in
//!   the new set (added) or only in the old set (removed).
//! - **Exit Codes**: Returns 0 if nothing changed, 1 if the content differs.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use std::collections::BTreeSet;
use std::path::PathBuf;

use iconset::icon_set::{ContentKey, IconSet};
use iconset::merge::has_icon_data_been_modified;
use iconset::merge::modified::visible_content;
use iconset::output::{Marker, OutputConfig};

use super::{load_icon_set, Failed};

/// Compare the visible content of two icon sets
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// The previous version of the icon set.
    #[arg(value_name = "OLD")]
    pub old: PathBuf,

    /// The new version of the icon set.
    #[arg(value_name = "NEW")]
    pub new: PathBuf,

    /// Show only a summary without listing individual names.
    #[arg(long)]
    pub summary: bool,
}

/// Visible names in `set` whose content is not part of `other`.
fn names_missing_from(set: &IconSet, other: &BTreeSet<ContentKey>) -> Vec<String> {
    set.list()
        .into_iter()
        .filter(|name| set.is_visible(name))
        .filter(|name| set.content_key(name).is_some_and(|key| !other.contains(&key)))
        .map(str::to_string)
        .collect()
}

/// Execute the `diff` command.
///
/// Returns `Ok(())` if the visible content is identical and [`Failed`]
/// otherwise, after printing the changes.
pub fn execute(args: DiffArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let old = load_icon_set(&args.old)?;
    let new = load_icon_set(&args.new)?;

    if !has_icon_data_been_modified(&old, &new) {
        println!("{} No changes detected.", out.marker(Marker::Ok));
        return Ok(());
    }

    let added = names_missing_from(&new, &visible_content(&old));
    let removed = names_missing_from(&old, &visible_content(&new));

    if !args.summary {
        for name in &added {
            println!("  + {}", name);
        }
        for name in &removed {
            println!("  - {}", name);
        }
        println!();
    }
    println!(
        "{} Summary: {} added, {} removed",
        out.marker(Marker::Warn),
        added.len(),
        removed.len()
    );
    Err(Failed.into())
}
