//! # Icon Set Library
//!
//! This library manages collections of vector icons stored in the compact
//! icon-set JSON format: real icons with a markup body, aliases that derive
//! from other entries with optional rotation, flips and size overrides, and
//! the auxiliary maps (characters, categories, themes) that refer to entries
//! by name. It is used by the `iconset` command-line tool but is designed to
//! be embedded in any icon build pipeline.
//!
//! ## Quick Example
//!
//! ```
//! use iconset::icon_set::{Alias, Icon, IconSet};
//! use iconset::props::IconProps;
//!
//! let mut set = IconSet::new("demo");
//! set.set_icon("arrow", Icon::new("<path d=\"M0 8h16\"/>"));
//! set.set_variation(
//!     "arrow-down",
//!     Alias::with_props("arrow", IconProps { rotate: Some(1), ..Default::default() }),
//! );
//!
//! let resolved = set.resolve("arrow-down", false).unwrap();
//! assert_eq!(resolved.props.rotate, Some(1));
//! assert_eq!(set.list(), vec!["arrow", "arrow-down"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Store (`icon_set`)**: [`icon_set::IconSet`] holds entries by name and
//!   enforces referential integrity on mutation.
//! - **Resolution (`icon_set::resolve`)**: follows alias chains to the real
//!   icon and composes their transforms, safely handling cycles.
//! - **Export (`icon_set::export`)**: writes the canonical document, dropping
//!   broken references when validating.
//! - **Merge (`merge`)**: combines an old and a new version of a set so that
//!   every previously published name keeps resolving, and detects whether
//!   the visible content changed at all.
//! - **Markup (`markup`)**: the seams where SVG cleanup and rendering plug in.
//!
//! The wire format lives in `format`, shared property types in `props`, and
//! the CLI helpers in `config` and `output`.

pub mod config;
pub mod error;
pub mod format;
pub mod icon_set;
pub mod markup;
pub mod merge;
pub mod output;
pub mod props;

#[cfg(test)]
mod icon_set_proptest;
