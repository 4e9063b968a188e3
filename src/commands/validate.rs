//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks icon-set
//! documents without modifying them.
//!
//! ## Functionality
//!
//! - **Document Loading**: Each document must parse into an icon set.
//! - **Reference Checks**: Reports aliases that do not resolve, characters
//!   mapped to missing entries, and category members that are gone or hidden.
//!   A validating export would drop all of these.
//! - **Theme Checks**: Reports icon names that match none of the registered
//!   theme prefixes or suffixes.
//!
//! Directories are searched recursively for `*.json` files.

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use iconset::icon_set::{IconEntry, IconSet, ThemeKind};
use iconset::output::{Marker, OutputConfig};

use super::{load_icon_set, Failed};

/// Check icon-set documents for broken aliases and stale references
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Icon-set JSON files or directories containing them.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// Problems found in one loaded icon set.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub broken_aliases: Vec<String>,
    pub stale_chars: Vec<(String, String)>,
    pub stale_categories: Vec<(String, String)>,
    pub unthemed_prefixes: Vec<String>,
    pub unthemed_suffixes: Vec<String>,
}

impl ValidationReport {
    pub fn check(set: &IconSet) -> Self {
        let broken_aliases = set
            .entries()
            .filter(|(name, entry)| matches!(entry, IconEntry::Alias(_)) && !set.resolves(name))
            .map(|(name, _)| name.to_string())
            .collect();
        let stale_chars = set
            .chars()
            .iter()
            .filter(|(_, name)| !set.resolves(name))
            .map(|(hex, name)| (hex.clone(), name.clone()))
            .collect();
        let stale_categories = set
            .categories()
            .iter()
            .flat_map(|(label, names)| names.iter().map(move |name| (label, name)))
            .filter(|(_, name)| !set.is_visible(name))
            .map(|(label, name)| (label.clone(), name.clone()))
            .collect();

        let unthemed = |kind: ThemeKind, prefix: bool| {
            if set.themes(kind).is_empty() {
                Vec::new()
            } else {
                set.check_theme(prefix).invalid
            }
        };

        Self {
            broken_aliases,
            stale_chars,
            stale_categories,
            unthemed_prefixes: unthemed(ThemeKind::Prefix, true),
            unthemed_suffixes: unthemed(ThemeKind::Suffix, false),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.broken_aliases.is_empty()
            && self.stale_chars.is_empty()
            && self.stale_categories.is_empty()
            && self.unthemed_prefixes.is_empty()
            && self.unthemed_suffixes.is_empty()
    }
}

/// Expand directories into the JSON documents they contain.
fn collect_documents(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut documents = Vec::new();
    for path in paths {
        if !path.is_dir() {
            documents.push(path.clone());
            continue;
        }
        let mut found: Vec<PathBuf> = WalkDir::new(path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        found.sort();
        documents.extend(found);
    }
    documents
}

fn print_list(out: &OutputConfig, marker: Marker, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("   {} {} ({}): {}", out.marker(marker), title, items.len(), items.join(", "));
}

fn report_document(out: &OutputConfig, path: &Path, set: &IconSet) -> ValidationReport {
    let report = ValidationReport::check(set);
    println!(
        "{} {} {}: {} icons, {} names",
        out.marker(if report.is_clean() { Marker::Ok } else { Marker::Warn }),
        path.display(),
        out.name(set.prefix()),
        set.count(),
        set.list().len()
    );

    print_list(out, Marker::Warn, "Broken aliases", &report.broken_aliases);
    let chars: Vec<String> = report
        .stale_chars
        .iter()
        .map(|(hex, name)| format!("{} -> {}", hex, name))
        .collect();
    print_list(out, Marker::Warn, "Stale characters", &chars);
    let categories: Vec<String> = report
        .stale_categories
        .iter()
        .map(|(label, name)| format!("{}: {}", label, name))
        .collect();
    print_list(out, Marker::Warn, "Stale category members", &categories);
    print_list(out, Marker::Warn, "Names without a prefix theme", &report.unthemed_prefixes);
    print_list(out, Marker::Warn, "Names without a suffix theme", &report.unthemed_suffixes);
    report
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let documents = collect_documents(&args.paths);
    if documents.is_empty() {
        println!("{} No icon-set documents found", out.marker(Marker::Warn));
        return Err(Failed.into());
    }

    let mut has_errors = false;
    let mut has_warnings = false;
    for path in &documents {
        match load_icon_set(path) {
            Ok(set) => {
                let report = report_document(&out, path, &set);
                has_warnings |= !report.is_clean();
            }
            Err(err) => {
                println!("{} {}: {:#}", out.marker(Marker::Err), path.display(), err);
                has_errors = true;
            }
        }
    }

    println!(
        "\n{} Checked {} document(s)",
        out.marker(Marker::Info),
        documents.len()
    );
    if has_errors || (args.strict && has_warnings) {
        return Err(Failed.into());
    }
    Ok(())
}
