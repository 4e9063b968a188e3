//! Content-identity comparison of two icon sets.
//!
//! Names do not matter here, and neither does whether something is stored
//! as an icon or as an alias. Two sets are unchanged when they contain the
//! same visible content.

use std::collections::BTreeSet;

use crate::icon_set::{ContentKey, IconSet};

/// Distinct content of every visible, resolvable entry in `set`.
pub fn visible_content(set: &IconSet) -> BTreeSet<ContentKey> {
    set.entries()
        .filter_map(|(name, _)| set.resolve_chain(name))
        .filter(|resolution| resolution.is_visible())
        .map(|resolution| resolution.content_key())
        .collect()
}

/// Whether the visible content of `a` and `b` differs.
///
/// Returns `false` when every visible entry of either set has an entry with
/// identical resolved content in the other. Neither set is modified.
pub fn has_icon_data_been_modified(a: &IconSet, b: &IconSet) -> bool {
    visible_content(a) != visible_content(b)
}
