//! # Export and Validation
//!
//! Produces the canonical document for an [`IconSet`] and checks theme
//! definitions against the icons that currently exist.
//!
//! Export writes real icons with their properties minus the set defaults,
//! and aliases with only their non-identity deltas. With validation enabled,
//! aliases that do not resolve are dropped; without it they are written
//! as-is so that broken references can be inspected. Categories only keep
//! visible members, and characters only keep mappings to entries that exist.

use indexmap::IndexMap;
use log::debug;

use super::{IconEntry, IconSet, ThemeKind};
use crate::format::{AliasJson, IconJson, IconSetJson};

/// Outcome of [`IconSet::check_theme`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeCheck {
    /// Theme fragment to the names it matches, in registration order.
    pub valid: IndexMap<String, Vec<String>>,
    /// Names that match no registered fragment.
    pub invalid: Vec<String>,
}

impl IconSet {
    /// Export the set as a canonical document.
    pub fn export(&self, validate: bool) -> IconSetJson {
        let base = self.defaults.full();
        let mut icons = IndexMap::new();
        let mut aliases = IndexMap::new();

        for (name, entry) in &self.entries {
            match entry {
                IconEntry::Icon(icon) => {
                    let mut props = base.with_icon(&icon.props).relative_to(&base);
                    props.hidden = icon.props.is_hidden().then_some(true);
                    icons.insert(
                        name.clone(),
                        IconJson {
                            body: icon.body.clone(),
                            props,
                        },
                    );
                }
                IconEntry::Alias(alias) => {
                    if validate && !self.resolves(name) {
                        debug!("Dropping unresolvable alias '{}' from export", name);
                        continue;
                    }
                    aliases.insert(
                        name.clone(),
                        AliasJson {
                            parent: alias.parent.clone(),
                            props: alias.props.normalized_delta(),
                        },
                    );
                }
            }
        }

        let chars = self
            .chars
            .iter()
            .filter(|(_, name)| {
                if validate {
                    self.resolves(name)
                } else {
                    self.exists(name)
                }
            })
            .map(|(hex, name)| (hex.clone(), name.clone()))
            .collect();

        let categories = self
            .categories
            .iter()
            .filter_map(|(label, names)| {
                let visible: Vec<String> = names
                    .iter()
                    .filter(|name| self.is_visible(name))
                    .cloned()
                    .collect();
                (!visible.is_empty()).then(|| (label.clone(), visible))
            })
            .collect();

        let info = self.info.clone().map(|mut info| {
            info.total = Some(self.count());
            info
        });

        IconSetJson {
            prefix: self.prefix.clone(),
            last_modified: self.last_modified,
            defaults: self.defaults,
            icons,
            aliases,
            chars,
            categories,
            prefixes: self.prefixes.clone(),
            suffixes: self.suffixes.clone(),
            info,
        }
    }

    /// Match visible icons and variations against theme fragments.
    ///
    /// With `prefix`, fragments are matched at the start of names
    /// (`fragment-name`), otherwise at the end (`name-fragment`). Longer
    /// fragments are tried first; the empty fragment matches whatever no
    /// other fragment claimed. Pure aliases are not checked.
    pub fn check_theme(&self, prefix: bool) -> ThemeCheck {
        let kind = if prefix {
            ThemeKind::Prefix
        } else {
            ThemeKind::Suffix
        };
        let themes = self.themes(kind);

        let mut fragments: Vec<&str> = themes.keys().map(String::as_str).collect();
        fragments.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut result = ThemeCheck {
            valid: themes.keys().map(|key| (key.clone(), Vec::new())).collect(),
            invalid: Vec::new(),
        };

        let candidates = self.entries.iter().filter(|(name, entry)| {
            let eligible = match entry {
                IconEntry::Icon(_) => true,
                IconEntry::Alias(alias) => alias.is_variation(),
            };
            eligible && self.is_visible(name)
        });

        for (name, _) in candidates {
            let matched = fragments.iter().find(|fragment| {
                if fragment.is_empty() {
                    return true;
                }
                if prefix {
                    name.strip_prefix(*fragment)
                        .is_some_and(|rest| rest.len() > 1 && rest.starts_with('-'))
                } else {
                    name.strip_suffix(*fragment)
                        .is_some_and(|rest| rest.len() > 1 && rest.ends_with('-'))
                }
            });
            match matched {
                Some(fragment) => {
                    if let Some(names) = result.valid.get_mut(*fragment) {
                        names.push(name.clone());
                    }
                }
                None => result.invalid.push(name.clone()),
            }
        }

        result
    }
}
