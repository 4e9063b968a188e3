//! # Resolve Command Implementation
//!
//! This module implements the `resolve` subcommand, which follows an alias
//! chain and prints the resulting icon, either as JSON or rendered as SVG.

use anyhow::{bail, Result};
use clap::Args;
use serde_json::json;
use std::path::PathBuf;

use iconset::markup::{MarkupRenderer, SvgRenderer};

use super::load_icon_set;

/// Resolve one icon or alias
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// The icon-set JSON document.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Icon or alias name.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Include properties that equal their defaults.
    #[arg(long)]
    pub full: bool,

    /// Print the icon as an SVG document instead of JSON.
    #[arg(long, conflicts_with = "full")]
    pub svg: bool,
}

/// Execute the `resolve` command.
pub fn execute(args: ResolveArgs) -> Result<()> {
    let set = load_icon_set(&args.file)?;
    let Some(resolved) = set.resolve(&args.name, args.full) else {
        if set.exists(&args.name) {
            bail!(
                "'{}' exists in '{}' but its alias chain does not end at an icon",
                args.name,
                set.prefix()
            );
        }
        bail!("'{}' does not exist in '{}'", args.name, set.prefix());
    };

    if args.svg {
        println!("{}", SvgRenderer.render(&resolved)?);
        return Ok(());
    }

    let mut value = serde_json::to_value(resolved.props)?;
    if let Some(object) = value.as_object_mut() {
        object.insert("body".to_string(), json!(resolved.body));
    }
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
