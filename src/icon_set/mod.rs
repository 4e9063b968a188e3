//! # Icon Set Store
//!
//! [`IconSet`] owns every named entry of an icon set, either a real icon with
//! its own markup body or an alias that derives from another entry, together
//! with the auxiliary maps that reference entries by name (characters,
//! categories, themes).
//!
//! ## Mutation Rules
//!
//! - Names are unique across icons and aliases.
//! - Aliases can only be created on top of an existing parent; the call
//!   returns `false` and changes nothing otherwise.
//! - Removing an entry also removes every alias that depends on it,
//!   transitively.
//! - Renaming an entry re-points its aliases and the characters and
//!   categories that mention it.
//! - Any call that changes content moves `last_modified` forward. Calls that
//!   write identical data leave it untouched, which the merge engine relies
//!   on to detect unchanged sets.
//!
//! Resolution lives in [`resolve`], document export in [`export`].

pub mod export;
pub mod resolve;

use std::collections::{HashMap, HashSet, VecDeque};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use indexmap::IndexMap;
use log::warn;

use crate::error::{Error, Result};
use crate::format::{self, IconSetInfo, IconSetJson};
use crate::props::{IconDefaults, IconProps};

pub use export::ThemeCheck;
pub use resolve::{ContentKey, ResolvedIcon};

/// A real icon: markup body plus absolute properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    /// Markup body, opaque to this crate.
    pub body: String,
    /// Absolute overrides of the set defaults.
    pub props: IconProps,
}

impl Icon {
    /// Create an icon with no property overrides.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            props: IconProps::default(),
        }
    }

    /// Create an icon with explicit properties.
    pub fn with_props(body: impl Into<String>, props: IconProps) -> Self {
        Self {
            body: body.into(),
            props,
        }
    }
}

/// An alias: a reference to another entry plus an incremental transform.
///
/// An alias whose transform is not the identity is a variation.
#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    /// Name of the entry this alias derives from.
    pub parent: String,
    /// Transform deltas, geometry overrides and the alias' own `hidden` flag.
    pub props: IconProps,
}

impl Alias {
    /// Create a plain alias.
    pub fn new(parent: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            props: IconProps::default(),
        }
    }

    /// Create an alias carrying a transform.
    pub fn with_props(parent: impl Into<String>, props: IconProps) -> Self {
        Self {
            parent: parent.into(),
            props,
        }
    }

    /// Whether this alias changes its parent's appearance.
    pub fn is_variation(&self) -> bool {
        self.props.has_transform()
    }
}

/// A named entry of an icon set.
#[derive(Debug, Clone, PartialEq)]
pub enum IconEntry {
    Icon(Icon),
    Alias(Alias),
}

impl IconEntry {
    /// The entry's own properties.
    pub fn props(&self) -> &IconProps {
        match self {
            IconEntry::Icon(icon) => &icon.props,
            IconEntry::Alias(alias) => &alias.props,
        }
    }

    /// Parent name for aliases.
    pub fn parent(&self) -> Option<&str> {
        match self {
            IconEntry::Icon(_) => None,
            IconEntry::Alias(alias) => Some(alias.parent.as_str()),
        }
    }
}

/// Which theme map a fragment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    /// Fragment matched at the start of a name (`outline-home`).
    Prefix,
    /// Fragment matched at the end of a name (`home-outline`).
    Suffix,
}

/// A named collection of icons and aliases.
#[derive(Debug, Clone, PartialEq)]
pub struct IconSet {
    prefix: String,
    last_modified: Option<i64>,
    defaults: IconDefaults,
    entries: IndexMap<String, IconEntry>,
    chars: IndexMap<String, String>,
    categories: IndexMap<String, Vec<String>>,
    prefixes: IndexMap<String, String>,
    suffixes: IndexMap<String, String>,
    info: Option<IconSetInfo>,
}

impl IconSet {
    /// Create an empty icon set.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            last_modified: None,
            defaults: IconDefaults::default(),
            entries: IndexMap::new(),
            chars: IndexMap::new(),
            categories: IndexMap::new(),
            prefixes: IndexMap::new(),
            suffixes: IndexMap::new(),
            info: None,
        }
    }

    /// Build an icon set from a parsed document.
    ///
    /// Icons are inserted first, then aliases, both in document order.
    /// Aliases are taken as-is, without checking that their parent exists,
    /// so a non-validating export can still report them.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` for an empty prefix and `Error::InvalidIcon`
    /// for icons with unusable dimensions.
    pub fn from_json(document: IconSetJson) -> Result<Self> {
        if document.prefix.trim().is_empty() {
            return Err(Error::Parse {
                message: "icon set prefix must not be empty".to_string(),
            });
        }
        validate_dimensions("<defaults>", document.defaults.width, document.defaults.height)?;

        let mut set = IconSet::new(document.prefix);
        set.last_modified = document.last_modified;
        set.defaults = document.defaults;
        set.info = document.info;

        for (name, icon) in document.icons {
            validate_dimensions(&name, icon.props.width, icon.props.height)?;
            set.entries.insert(
                name,
                IconEntry::Icon(Icon::with_props(icon.body, icon.props.normalized())),
            );
        }
        for (name, alias) in document.aliases {
            if set.entries.contains_key(&name) {
                warn!(
                    "Icon set '{}' defines '{}' as both icon and alias, keeping the icon",
                    set.prefix, name
                );
                continue;
            }
            set.entries.insert(
                name,
                IconEntry::Alias(Alias::with_props(alias.parent, alias.props.normalized_delta())),
            );
        }

        set.chars = document
            .chars
            .into_iter()
            .map(|(hex, name)| (hex.to_lowercase(), name))
            .collect();
        set.categories = document.categories;
        set.prefixes = document.prefixes;
        set.suffixes = document.suffixes;
        Ok(set)
    }

    /// Serialize the exported document to JSON text.
    pub fn to_json_string(&self, validate: bool, pretty: bool) -> Result<String> {
        format::to_string(&self.export(validate), pretty)
    }

    /// Icon set prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Last modification time, in seconds since the Unix epoch.
    pub fn last_modified(&self) -> Option<i64> {
        self.last_modified
    }

    /// Overwrite the modification time.
    pub fn set_last_modified(&mut self, value: Option<i64>) {
        self.last_modified = value;
    }

    /// Set-level defaults.
    pub fn defaults(&self) -> &IconDefaults {
        &self.defaults
    }

    /// Replace the set-level defaults.
    pub fn set_defaults(&mut self, defaults: IconDefaults) {
        if self.defaults != defaults {
            self.defaults = defaults;
            self.touch();
        }
    }

    /// Descriptive metadata.
    pub fn info(&self) -> Option<&IconSetInfo> {
        self.info.as_ref()
    }

    /// Replace the descriptive metadata.
    pub fn set_info(&mut self, info: Option<IconSetInfo>) {
        self.info = info;
    }

    /// Whether an icon or alias with this name exists.
    pub fn exists(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Look up an entry.
    pub fn get(&self, name: &str) -> Option<&IconEntry> {
        self.entries.get(name)
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &IconEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Number of stored entries, valid or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add or replace a real icon.
    ///
    /// Any existing entry with the same name, icon or alias, is overwritten.
    /// Writing identical data does not count as a modification.
    pub fn set_icon(&mut self, name: &str, icon: Icon) -> bool {
        let entry = IconEntry::Icon(Icon::with_props(icon.body, icon.props.normalized()));
        self.store(name, entry);
        true
    }

    /// Add or replace an alias.
    ///
    /// Returns `false` without changing anything if `parent` does not exist
    /// or is the alias itself.
    pub fn set_alias(&mut self, name: &str, alias: Alias) -> bool {
        if alias.parent == name || !self.entries.contains_key(&alias.parent) {
            return false;
        }
        let entry = IconEntry::Alias(Alias::with_props(alias.parent, alias.props.normalized_delta()));
        self.store(name, entry);
        true
    }

    /// Add or replace a variation: an alias carrying a transform.
    ///
    /// Behaves exactly like [`IconSet::set_alias`].
    pub fn set_variation(&mut self, name: &str, alias: Alias) -> bool {
        self.set_alias(name, alias)
    }

    fn store(&mut self, name: &str, entry: IconEntry) {
        if self.entries.get(name) == Some(&entry) {
            return;
        }
        self.entries.insert(name.to_string(), entry);
        self.touch();
    }

    /// Insert an entry without reference checks or timestamp updates.
    pub(crate) fn insert_entry(&mut self, name: String, entry: IconEntry) {
        self.entries.insert(name, entry);
    }

    /// Remove an entry and every alias that depends on it.
    ///
    /// Returns the number of removed entries, `0` if `name` does not exist.
    pub fn remove(&mut self, name: &str) -> usize {
        if !self.entries.contains_key(name) {
            return 0;
        }

        let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
        for (child, entry) in &self.entries {
            if let IconEntry::Alias(alias) = entry {
                children
                    .entry(alias.parent.as_str())
                    .or_default()
                    .push(child.as_str());
            }
        }

        let mut doomed: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::from([name]);
        while let Some(current) = queue.pop_front() {
            if !doomed.insert(current.to_string()) {
                continue;
            }
            if let Some(list) = children.get(current) {
                queue.extend(list.iter().copied());
            }
        }

        self.entries.retain(|key, _| !doomed.contains(key));
        self.chars.retain(|_, target| !doomed.contains(target));
        for names in self.categories.values_mut() {
            names.retain(|target| !doomed.contains(target));
        }
        self.categories.retain(|_, names| !names.is_empty());

        self.touch();
        doomed.len()
    }

    /// Rename an entry, keeping its position in the set.
    ///
    /// Aliases pointing at `old_name` are re-pointed, and characters and
    /// categories follow the entry. Returns `false` if `old_name` does not
    /// exist or `new_name` is already taken.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> bool {
        if old_name == new_name {
            return self.exists(old_name);
        }
        if self.exists(new_name) {
            return false;
        }
        let Some(index) = self.entries.get_index_of(old_name) else {
            return false;
        };
        let Some(entry) = self.entries.shift_remove(old_name) else {
            return false;
        };
        self.entries.shift_insert(index, new_name.to_string(), entry);

        for entry in self.entries.values_mut() {
            if let IconEntry::Alias(alias) = entry {
                if alias.parent == old_name {
                    alias.parent = new_name.to_string();
                }
            }
        }
        for target in self.chars.values_mut() {
            if target == old_name {
                *target = new_name.to_string();
            }
        }
        for names in self.categories.values_mut() {
            for target in names.iter_mut() {
                if target == old_name {
                    *target = new_name.to_string();
                }
            }
        }

        self.touch();
        true
    }

    /// Names of all entries that resolve, icons first then aliases.
    ///
    /// Hidden entries are included.
    pub fn list(&self) -> Vec<&str> {
        let icons = self
            .entries
            .iter()
            .filter(|(_, entry)| matches!(entry, IconEntry::Icon(_)));
        let aliases = self
            .entries
            .iter()
            .filter(|(name, entry)| matches!(entry, IconEntry::Alias(_)) && self.resolves(name));
        icons.chain(aliases).map(|(name, _)| name.as_str()).collect()
    }

    /// Resolvable aliases without a transform.
    pub fn list_aliases(&self) -> Vec<&str> {
        self.list_alias_kind(false)
    }

    /// Resolvable aliases with a transform.
    pub fn list_variations(&self) -> Vec<&str> {
        self.list_alias_kind(true)
    }

    fn list_alias_kind(&self, variations: bool) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(name, entry)| match entry {
                IconEntry::Alias(alias) => {
                    alias.is_variation() == variations && self.resolves(name)
                }
                IconEntry::Icon(_) => false,
            })
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Number of visible real icons.
    pub fn count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| matches!(entry, IconEntry::Icon(icon) if !icon.props.is_hidden()))
            .count()
    }

    /// Character map: lowercase hex codepoint to entry name.
    pub fn chars(&self) -> &IndexMap<String, String> {
        &self.chars
    }

    /// Characters mapped to `name`.
    pub fn chars_for(&self, name: &str) -> Vec<&str> {
        self.chars
            .iter()
            .filter(|(_, target)| target.as_str() == name)
            .map(|(hex, _)| hex.as_str())
            .collect()
    }

    /// Map or unmap a character.
    ///
    /// Adding requires `name` to exist and replaces any previous mapping of
    /// the character. Removing only removes a mapping that points at `name`.
    /// Returns `true` if the character map changed.
    pub fn toggle_character(&mut self, name: &str, hex: &str, add: bool) -> bool {
        let hex = hex.to_lowercase();
        let changed = if add {
            if !self.exists(name) || self.chars.get(&hex).map(String::as_str) == Some(name) {
                return false;
            }
            self.chars.insert(hex, name.to_string());
            true
        } else if self.chars.get(&hex).map(String::as_str) == Some(name) {
            self.chars.shift_remove(&hex);
            true
        } else {
            false
        };
        if changed {
            self.touch();
        }
        changed
    }

    /// Category map: label to member names, in insertion order.
    pub fn categories(&self) -> &IndexMap<String, Vec<String>> {
        &self.categories
    }

    /// Members of a category.
    pub fn list_category(&self, label: &str) -> Option<&[String]> {
        self.categories.get(label).map(Vec::as_slice)
    }

    /// Add `name` to or remove it from a category.
    ///
    /// Adding requires `name` to exist. An emptied category is dropped.
    /// Returns `true` if the category map changed.
    pub fn toggle_category(&mut self, name: &str, label: &str, add: bool) -> bool {
        let changed = if add {
            if !self.exists(name) {
                return false;
            }
            let names = self.categories.entry(label.to_string()).or_default();
            if names.iter().any(|n| n == name) {
                false
            } else {
                names.push(name.to_string());
                true
            }
        } else {
            match self.categories.get_mut(label) {
                Some(names) => {
                    let before = names.len();
                    names.retain(|n| n != name);
                    let changed = names.len() != before;
                    if names.is_empty() {
                        self.categories.shift_remove(label);
                    }
                    changed
                }
                None => false,
            }
        };
        if changed {
            self.touch();
        }
        changed
    }

    /// Registered theme fragments of one kind, fragment to title.
    pub fn themes(&self, kind: ThemeKind) -> &IndexMap<String, String> {
        match kind {
            ThemeKind::Prefix => &self.prefixes,
            ThemeKind::Suffix => &self.suffixes,
        }
    }

    /// Register or retitle a theme fragment.
    pub fn set_theme(&mut self, kind: ThemeKind, fragment: &str, title: &str) {
        let themes = self.themes_mut(kind);
        if themes.get(fragment).map(String::as_str) == Some(title) {
            return;
        }
        themes.insert(fragment.to_string(), title.to_string());
        self.touch();
    }

    /// Unregister a theme fragment. Returns `true` if it existed.
    pub fn remove_theme(&mut self, kind: ThemeKind, fragment: &str) -> bool {
        let removed = self.themes_mut(kind).shift_remove(fragment).is_some();
        if removed {
            self.touch();
        }
        removed
    }

    fn themes_mut(&mut self, kind: ThemeKind) -> &mut IndexMap<String, String> {
        match kind {
            ThemeKind::Prefix => &mut self.prefixes,
            ThemeKind::Suffix => &mut self.suffixes,
        }
    }

    pub(crate) fn set_chars(&mut self, chars: IndexMap<String, String>) {
        self.chars = chars;
    }

    pub(crate) fn set_categories(&mut self, categories: IndexMap<String, Vec<String>>) {
        self.categories = categories;
    }

    pub(crate) fn set_themes(&mut self, kind: ThemeKind, themes: IndexMap<String, String>) {
        *self.themes_mut(kind) = themes;
    }

    /// Move `last_modified` forward.
    fn touch(&mut self) {
        self.last_modified = Some(next_timestamp(self.last_modified));
    }
}

impl FromStr for IconSet {
    type Err = Error;

    fn from_str(content: &str) -> Result<Self> {
        IconSet::from_json(format::parse(content)?)
    }
}

/// Current time in seconds since the Unix epoch.
pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// A timestamp that is "now" but never earlier than `previous + 1`.
pub(crate) fn next_timestamp(previous: Option<i64>) -> i64 {
    let now = unix_now();
    match previous {
        Some(previous) => now.max(previous + 1),
        None => now,
    }
}

fn validate_dimensions(name: &str, width: Option<f64>, height: Option<f64>) -> Result<()> {
    for (label, value) in [("width", width), ("height", height)] {
        if let Some(value) = value {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidIcon {
                    name: name.to_string(),
                    message: format!("{} must be a positive number, got {}", label, value),
                });
            }
        }
    }
    Ok(())
}
