//! # Info Command Implementation
//!
//! This module implements the `info` subcommand, which displays a summary of
//! an icon-set document: entry counts, metadata, categories and themes.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use iconset::icon_set::{IconEntry, IconSet, ThemeKind};
use iconset::output::{Marker, OutputConfig};

use super::load_icon_set;

/// Show a summary of an icon set
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// The icon-set JSON document.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Entry counts shown by `info`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Counts {
    pub icons: usize,
    pub hidden_icons: usize,
    pub aliases: usize,
    pub variations: usize,
    pub names: usize,
}

impl Counts {
    pub fn of(set: &IconSet) -> Self {
        let hidden_icons = set
            .entries()
            .filter(|(_, entry)| matches!(entry, IconEntry::Icon(icon) if icon.props.is_hidden()))
            .count();
        Self {
            icons: set.count(),
            hidden_icons,
            aliases: set.list_aliases().len(),
            variations: set.list_variations().len(),
            names: set.list().len(),
        }
    }
}

/// Execute the `info` command.
pub fn execute(args: InfoArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let set = load_icon_set(&args.file)?;
    let counts = Counts::of(&set);

    println!(
        "{} Icon set {} ({})",
        out.marker(Marker::Info),
        out.name(set.prefix()),
        args.file.display()
    );
    if let Some(info) = set.info() {
        println!("   Name: {}", info.name);
        println!("   Author: {}", info.author.name);
        println!("   License: {}", info.license.title);
        if let Some(version) = &info.version {
            println!("   Version: {}", version);
        }
    }
    match set.last_modified() {
        Some(timestamp) => println!("   Last modified: {}", timestamp),
        None => println!("   Last modified: unknown"),
    }

    println!("\n   Visible icons: {}", counts.icons);
    println!("   Hidden icons: {}", counts.hidden_icons);
    println!("   Aliases: {}", counts.aliases);
    println!("   Variations: {}", counts.variations);
    println!("   Resolvable names: {}", counts.names);

    if !set.categories().is_empty() {
        println!("\n   Categories:");
        for (label, names) in set.categories() {
            println!("     {} ({})", label, names.len());
        }
    }

    for (kind, title) in [(ThemeKind::Prefix, "Prefixes"), (ThemeKind::Suffix, "Suffixes")] {
        let themes = set.themes(kind);
        if themes.is_empty() {
            continue;
        }
        println!("\n   {}:", title);
        for (fragment, theme) in themes {
            let fragment = if fragment.is_empty() { "(none)" } else { fragment.as_str() };
            println!("     {}: {}", fragment, theme);
        }
    }

    Ok(())
}
