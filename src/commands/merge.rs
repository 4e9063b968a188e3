//! # Merge Command Implementation
//!
//! This module implements the `merge` subcommand, which combines the last
//! published version of an icon set with a freshly generated one.
//!
//! ## Functionality
//!
//! - **Name Retention**: Every name from the old set keeps resolving. Names
//!   whose content disappeared are kept as hidden entries unless
//!   `--keep-visible` is given.
//! - **De-duplication**: Renamed icons become aliases of the entry that
//!   already holds their content.
//! - **Stable Timestamps**: `lastModified` only moves forward when the visible
//!   content actually changed.
//!
//! The merged document is written to `--output` or to stdout.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use iconset::config;
use iconset::merge::{has_icon_data_been_modified, merge_icon_sets_with};
use iconset::output::{Marker, OutputConfig};

use super::{load_icon_set, write_output};

/// Merge an old and a new version of an icon set
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// The previously published icon set.
    #[arg(value_name = "OLD")]
    pub old: PathBuf,

    /// The newly generated icon set.
    #[arg(value_name = "NEW")]
    pub new: PathBuf,

    /// Write the merged icon set to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Keep old icons visible even if their content is gone from the new set.
    #[arg(long)]
    pub keep_visible: bool,

    /// Path to the configuration file (defaults to `.iconset.yaml` if present).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Execute the `merge` command.
pub fn execute(args: MergeArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let config = config::load(args.config.as_deref())?;

    let old = load_icon_set(&args.old)?;
    let new = load_icon_set(&args.new)?;
    config.check_prefix(new.prefix())?;

    let mut options = config.merge_options();
    if args.keep_visible {
        options.mark_as_hidden = false;
    }

    let merged = merge_icon_sets_with(&old, &new, &options);
    let content = merged.to_json_string(config.validate, config.pretty)?;
    write_output(args.output.as_deref(), &content)?;

    if let Some(path) = &args.output {
        let verdict = if has_icon_data_been_modified(&old, &new) {
            "content changed"
        } else {
            "content unchanged"
        };
        println!(
            "{} Merged {} into {}: {} icons, {} names, {}",
            out.marker(Marker::Ok),
            out.name(merged.prefix()),
            path.display(),
            merged.count(),
            merged.list().len(),
            verdict
        );
    }
    Ok(())
}
