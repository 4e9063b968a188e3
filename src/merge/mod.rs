//! # Icon Set Merging
//!
//! Combines an old version of an icon set (for example the last published
//! one) with a new version (for example freshly regenerated from sources)
//! into a single set that keeps every public name resolving.
//!
//! ## Algorithm
//!
//! 1. Both sets are resolved entry by entry. Each name in the result gets a
//!    *target*: the content and visibility it must resolve to. Names defined
//!    in the new set take the new content. Names only found in the old set
//!    keep their old content; if that content no longer appears among the
//!    new set's visible entries they are marked hidden (see
//!    [`MergeOptions::mark_as_hidden`]).
//! 2. Old real icons whose content is unchanged stay real icons.
//! 3. New real icons become real icons unless their content is already held
//!    by one, in which case they become plain aliases of it. A new icon whose
//!    content the old set showed as a variation of a placed body is left to
//!    the next step, so it becomes a variation instead of a copy.
//! 4. Everything else becomes an alias of an already placed entry with the
//!    same body, preferring the old parent, then the new parent, then an
//!    exact content match. The alias carries whatever transform turns the
//!    parent's content into its own target. Names that cannot be expressed
//!    that way become real icons.
//!
//! Every step iterates names in sorted order, so the result does not depend
//! on the order entries were inserted into either input.

pub mod modified;

use std::collections::{BTreeMap, HashMap, HashSet};

use indexmap::IndexMap;
use log::debug;

use crate::icon_set::{next_timestamp, Alias, ContentKey, Icon, IconEntry, IconSet, ThemeKind};
use crate::props::{FullIconProps, IconProps};

pub use modified::has_icon_data_been_modified;

/// Options controlling [`merge_icon_sets_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Hide old entries whose content no longer exists in the new set.
    ///
    /// When `false` such entries are kept with their old visibility.
    pub mark_as_hidden: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            mark_as_hidden: true,
        }
    }
}

/// Merge `old` into `new` with default options.
pub fn merge_icon_sets(old: &IconSet, new: &IconSet) -> IconSet {
    merge_icon_sets_with(old, new, &MergeOptions::default())
}

/// How an entry was stored in one of the inputs.
#[derive(Debug, Clone)]
struct Snapshot {
    key: ContentKey,
    parent: Option<String>,
    visible: bool,
    depth: usize,
}

/// What a name must resolve to in the merged set.
#[derive(Debug, Clone)]
struct Target {
    key: ContentKey,
    props: FullIconProps,
    hidden: bool,
    depth: usize,
}

fn snapshot(set: &IconSet) -> BTreeMap<String, (Snapshot, FullIconProps)> {
    set.entries()
        .filter_map(|(name, entry)| {
            let resolution = set.resolve_chain(name)?;
            let snapshot = Snapshot {
                key: resolution.content_key(),
                parent: entry.parent().map(str::to_string),
                visible: resolution.is_visible(),
                depth: resolution.depth,
            };
            Some((name.to_string(), (snapshot, resolution.props)))
        })
        .collect()
}

/// Merge `old` into `new`.
///
/// The result carries the new set's prefix and defaults. See the module
/// documentation for how entries are placed.
pub fn merge_icon_sets_with(old: &IconSet, new: &IconSet, options: &MergeOptions) -> IconSet {
    let old_entries = snapshot(old);
    let new_entries = snapshot(new);

    let new_visible: HashSet<&ContentKey> = new_entries
        .values()
        .filter(|(snap, _)| snap.visible)
        .map(|(snap, _)| &snap.key)
        .collect();

    let mut targets: BTreeMap<String, Target> = BTreeMap::new();
    for (name, (snap, props)) in &new_entries {
        targets.insert(
            name.clone(),
            Target {
                key: snap.key.clone(),
                props: *props,
                hidden: !snap.visible,
                depth: snap.depth,
            },
        );
    }
    for (name, (snap, props)) in &old_entries {
        if targets.contains_key(name) {
            continue;
        }
        let still_used = new_visible.contains(&snap.key);
        let hidden = !snap.visible || (!still_used && options.mark_as_hidden);
        if !still_used {
            debug!("Retaining '{}' from the old icon set (hidden: {})", name, hidden);
        }
        targets.insert(
            name.clone(),
            Target {
                key: snap.key.clone(),
                props: *props,
                hidden,
                depth: snap.depth,
            },
        );
    }

    let mut merged = IconSet::new(new.prefix());
    merged.set_defaults(*new.defaults());
    let mut placer = Placer {
        base: new.defaults().full(),
        targets: &targets,
        placed: BTreeMap::new(),
        holders: HashMap::new(),
        body_holders: HashMap::new(),
    };

    // Old icons with unchanged content keep their role.
    for (name, (snap, _)) in &old_entries {
        if snap.parent.is_none() && targets[name].key == snap.key {
            placer.place_icon(name);
        }
    }

    // New icons that are not renamed copies of something already held.
    let old_visible: HashSet<&ContentKey> = old_entries
        .values()
        .filter(|(snap, _)| snap.visible)
        .map(|(snap, _)| &snap.key)
        .collect();
    for (name, (snap, _)) in &new_entries {
        if snap.parent.is_some() || placer.is_placed(name) {
            continue;
        }
        let was_alias = old_entries
            .get(name)
            .is_some_and(|(old_snap, _)| old_snap.parent.is_some());
        if was_alias || placer.exact_holder(name).is_some() {
            continue;
        }
        // Content the old set already showed as a variation stays one.
        let held_as_variation = old_visible.contains(&snap.key)
            && placer
                .same_body_holders(name)
                .iter()
                .any(|holder| placer.can_parent(name, holder));
        if held_as_variation {
            continue;
        }
        placer.place_icon(name);
    }

    // Everything else hangs off an entry that is already placed.
    let mut pending: Vec<&String> = targets
        .keys()
        .filter(|name| !placer.is_placed(name))
        .collect();
    pending.sort_by(|a, b| targets[*a].depth.cmp(&targets[*b].depth).then_with(|| a.cmp(b)));

    while !pending.is_empty() {
        let mut progress = false;
        pending.retain(|name| {
            let candidates = parent_candidates(name, &old_entries, &new_entries, &placer);
            match candidates
                .into_iter()
                .find(|parent| placer.can_parent(name, parent))
            {
                Some(parent) => {
                    placer.place_alias(name, &parent);
                    progress = true;
                    false
                }
                None => true,
            }
        });
        if !progress && !pending.is_empty() {
            let name = pending.remove(0);
            placer.place_icon(name);
        }
    }

    for (name, entry) in placer.placed {
        merged.insert_entry(name, entry);
    }

    merge_metadata(old, new, &mut merged);
    merged.set_last_modified(merged_timestamp(old, new));
    merged
}

/// Parent names worth trying for `name`, most preferred first.
fn parent_candidates(
    name: &str,
    old_entries: &BTreeMap<String, (Snapshot, FullIconProps)>,
    new_entries: &BTreeMap<String, (Snapshot, FullIconProps)>,
    placer: &Placer<'_>,
) -> Vec<String> {
    let old_parent = old_entries
        .get(name)
        .and_then(|(snap, _)| snap.parent.clone());
    let old_parent_unchanged = old_parent.as_ref().is_some_and(|parent| {
        let target = placer.targets.get(parent);
        old_entries
            .get(parent)
            .zip(target)
            .is_some_and(|((snap, _), target)| snap.key == target.key)
    });
    let new_parent = new_entries
        .get(name)
        .and_then(|(snap, _)| snap.parent.clone());

    let mut candidates = Vec::new();
    if old_parent_unchanged {
        candidates.extend(old_parent.clone());
    }
    candidates.extend(new_parent);
    candidates.extend(placer.exact_holder(name).map(str::to_string));
    candidates.extend(old_parent);
    candidates.extend(placer.same_body_holders(name));
    candidates
}

/// Builds the merged entries while tracking which real icon holds what.
struct Placer<'a> {
    base: FullIconProps,
    targets: &'a BTreeMap<String, Target>,
    placed: BTreeMap<String, IconEntry>,
    /// Content to the first real icon placed with it.
    holders: HashMap<ContentKey, String>,
    /// Body to every real icon placed with it, in placement order.
    body_holders: HashMap<String, Vec<String>>,
}

impl Placer<'_> {
    fn is_placed(&self, name: &str) -> bool {
        self.placed.contains_key(name)
    }

    fn exact_holder(&self, name: &str) -> Option<&str> {
        let target = &self.targets[name];
        self.holders
            .get(&target.key)
            .map(String::as_str)
            .filter(|holder| *holder != name && self.can_parent(name, holder))
    }

    fn same_body_holders(&self, name: &str) -> Vec<String> {
        self.body_holders
            .get(self.targets[name].key.body())
            .cloned()
            .unwrap_or_default()
    }

    /// Whether `name` can be expressed as an alias of `parent` right now.
    fn can_parent(&self, name: &str, parent: &str) -> bool {
        if name == parent || !self.is_placed(parent) {
            return false;
        }
        let (Some(target), Some(parent_target)) = (self.targets.get(name), self.targets.get(parent))
        else {
            return false;
        };
        target.key.body() == parent_target.key.body() && (target.hidden || !parent_target.hidden)
    }

    fn place_icon(&mut self, name: &str) {
        let target = &self.targets[name];
        let mut props = target.props.relative_to(&self.base);
        props.hidden = target.hidden.then_some(true);
        self.holders
            .entry(target.key.clone())
            .or_insert_with(|| name.to_string());
        self.body_holders
            .entry(target.key.body().to_string())
            .or_default()
            .push(name.to_string());
        self.placed.insert(
            name.to_string(),
            IconEntry::Icon(Icon::with_props(target.key.body(), props)),
        );
    }

    fn place_alias(&mut self, name: &str, parent: &str) {
        let target = &self.targets[name];
        let parent_target = &self.targets[parent];
        let props = IconProps {
            hidden: target.hidden.then_some(true),
            ..target.props.delta_from(&parent_target.props)
        };
        if target.key == parent_target.key {
            debug!("Merged '{}' as an alias of '{}'", name, parent);
        } else {
            debug!("Merged '{}' as a variation of '{}'", name, parent);
        }
        self.placed.insert(
            name.to_string(),
            IconEntry::Alias(Alias::with_props(parent, props)),
        );
    }
}

/// Characters, categories, themes and info: new values win, old ones fill gaps.
fn merge_metadata(old: &IconSet, new: &IconSet, merged: &mut IconSet) {
    let mut chars: IndexMap<String, String> = new
        .chars()
        .iter()
        .filter(|(_, name)| merged.exists(name))
        .map(|(hex, name)| (hex.clone(), name.clone()))
        .collect();
    for (hex, name) in old.chars() {
        if !chars.contains_key(hex) && !new.chars().contains_key(hex) && merged.exists(name) {
            chars.insert(hex.clone(), name.clone());
        }
    }

    let mut categories: IndexMap<String, Vec<String>> = new
        .categories()
        .iter()
        .map(|(label, names)| {
            let names = names.iter().filter(|n| merged.exists(n)).cloned().collect();
            (label.clone(), names)
        })
        .collect();
    for (label, names) in old.categories() {
        let carried: Vec<&String> = names
            .iter()
            .filter(|n| !new.exists(n) && merged.exists(n))
            .collect();
        if carried.is_empty() {
            continue;
        }
        let members = categories.entry(label.clone()).or_default();
        for name in carried {
            if !members.contains(name) {
                members.push(name.clone());
            }
        }
    }
    categories.retain(|_, names| !names.is_empty());

    for kind in [ThemeKind::Prefix, ThemeKind::Suffix] {
        let mut themes = new.themes(kind).clone();
        for (fragment, title) in old.themes(kind) {
            themes
                .entry(fragment.clone())
                .or_insert_with(|| title.clone());
        }
        merged.set_themes(kind, themes);
    }

    merged.set_chars(chars);
    merged.set_categories(categories);
    merged.set_info(new.info().or(old.info()).cloned());
}

/// Unchanged content keeps the older timestamp; changes get a fresh one.
fn merged_timestamp(old: &IconSet, new: &IconSet) -> Option<i64> {
    match (old.last_modified(), new.last_modified()) {
        (Some(a), Some(b)) => {
            if has_icon_data_been_modified(old, new) {
                Some(next_timestamp(Some(a.max(b))))
            } else {
                Some(a.min(b))
            }
        }
        (Some(value), None) | (None, Some(value)) => Some(value),
        (None, None) => None,
    }
}
