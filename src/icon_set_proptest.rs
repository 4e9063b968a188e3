//! Property-based tests for resolution, removal, comparison and merging.
//!
//! Icon sets are generated from a small pool of bodies so that renamed and
//! duplicated content shows up often.

#[cfg(test)]
mod proptest_tests {
    use indexmap::IndexMap;
    use proptest::prelude::*;
    use proptest::sample::Index;

    use crate::format::{AliasJson, IconJson, IconSetJson};
    use crate::icon_set::{Alias, Icon, IconSet};
    use crate::merge::{has_icon_data_been_modified, merge_icon_sets};
    use crate::props::{IconDefaults, IconProps};

    const BODIES: [&str; 3] = ["<path d=\"M0 0\"/>", "<circle r=\"4\"/>", "<rect width=\"2\"/>"];

    #[derive(Debug, Clone)]
    struct IconSpec {
        body: usize,
        rotate: u8,
        hidden: bool,
    }

    #[derive(Debug, Clone)]
    struct AliasSpec {
        parent: Index,
        rotate: u8,
        h_flip: bool,
        hidden: bool,
    }

    #[derive(Debug, Clone)]
    struct SetSpec {
        icons: Vec<IconSpec>,
        aliases: Vec<AliasSpec>,
    }

    fn icon_spec() -> impl Strategy<Value = IconSpec> {
        (0..BODIES.len(), 0u8..4, prop::bool::weighted(0.2))
            .prop_map(|(body, rotate, hidden)| IconSpec { body, rotate, hidden })
    }

    fn alias_spec() -> impl Strategy<Value = AliasSpec> {
        (any::<Index>(), 0u8..4, any::<bool>(), prop::bool::weighted(0.2)).prop_map(
            |(parent, rotate, h_flip, hidden)| AliasSpec {
                parent,
                rotate,
                h_flip,
                hidden,
            },
        )
    }

    fn set_spec() -> impl Strategy<Value = SetSpec> {
        (
            prop::collection::vec(icon_spec(), 1..6),
            prop::collection::vec(alias_spec(), 0..6),
        )
            .prop_map(|(icons, aliases)| SetSpec { icons, aliases })
    }

    fn flag(value: bool) -> Option<bool> {
        value.then_some(true)
    }

    /// Build a document; `reversed` inserts every entry in reverse order.
    fn document(shape: &SetSpec, last_modified: i64, reversed: bool) -> IconSetJson {
        let mut icons: Vec<(String, IconJson)> = shape
            .icons
            .iter()
            .enumerate()
            .map(|(i, icon)| {
                let json = IconJson {
                    body: BODIES[icon.body].to_string(),
                    props: IconProps {
                        rotate: Some(icon.rotate).filter(|r| *r != 0),
                        hidden: flag(icon.hidden),
                        ..Default::default()
                    },
                };
                (format!("icon-{}", i), json)
            })
            .collect();

        let mut aliases: Vec<(String, AliasJson)> = Vec::new();
        for (i, alias) in shape.aliases.iter().enumerate() {
            let available = shape.icons.len() + i;
            let index = alias.parent.index(available);
            let parent = if index < shape.icons.len() {
                format!("icon-{}", index)
            } else {
                format!("alias-{}", index - shape.icons.len())
            };
            let json = AliasJson {
                parent,
                props: IconProps {
                    rotate: Some(alias.rotate).filter(|r| *r != 0),
                    h_flip: flag(alias.h_flip),
                    hidden: flag(alias.hidden),
                    ..Default::default()
                },
            };
            aliases.push((format!("alias-{}", i), json));
        }

        if reversed {
            icons.reverse();
            aliases.reverse();
        }

        IconSetJson {
            prefix: "demo".to_string(),
            last_modified: Some(last_modified),
            defaults: IconDefaults::default(),
            icons: icons.into_iter().collect(),
            aliases: aliases.into_iter().collect(),
            chars: IndexMap::new(),
            categories: IndexMap::new(),
            prefixes: IndexMap::new(),
            suffixes: IndexMap::new(),
            info: None,
        }
    }

    fn build(shape: &SetSpec, last_modified: i64, reversed: bool) -> IconSet {
        IconSet::from_json(document(shape, last_modified, reversed)).unwrap()
    }

    fn export_without_timestamp(mut set: IconSet) -> String {
        set.set_last_modified(None);
        set.to_json_string(false, false).unwrap()
    }

    proptest! {
        /// Property: a chain of plain aliases resolves exactly like its icon
        #[test]
        fn plain_alias_chain_matches_icon(length in 1usize..40, rotate in 0u8..4, h_flip: bool) {
            let mut set = IconSet::new("demo");
            set.set_icon("icon", Icon::with_props("<g/>", IconProps {
                rotate: Some(rotate),
                h_flip: Some(h_flip),
                ..Default::default()
            }));
            let mut parent = "icon".to_string();
            for i in 0..length {
                let name = format!("alias-{}", i);
                prop_assert!(set.set_alias(&name, Alias::new(parent.as_str())));
                parent = name;
            }
            prop_assert_eq!(set.resolve(&parent, true), set.resolve("icon", true));
        }

        /// Property: transforms along a chain compose as one transform
        #[test]
        fn chain_composes_transforms(steps in prop::collection::vec((0u8..4, any::<bool>(), any::<bool>()), 1..16)) {
            let mut set = IconSet::new("demo");
            set.set_icon("icon", Icon::new("<g/>"));
            let mut parent = "icon".to_string();
            for (i, (rotate, h_flip, v_flip)) in steps.iter().enumerate() {
                let name = format!("alias-{}", i);
                let props = IconProps {
                    rotate: Some(*rotate),
                    h_flip: Some(*h_flip),
                    v_flip: Some(*v_flip),
                    ..Default::default()
                };
                prop_assert!(set.set_variation(&name, Alias::with_props(parent.as_str(), props)));
                parent = name;
            }

            let rotate = steps.iter().map(|(r, _, _)| *r as u32).sum::<u32>() % 4;
            let h_flip = steps.iter().fold(false, |acc, (_, h, _)| acc ^ h);
            let v_flip = steps.iter().fold(false, |acc, (_, _, v)| acc ^ v);

            let mut single = IconSet::new("demo");
            single.set_icon("icon", Icon::new("<g/>"));
            single.set_variation("alias", Alias::with_props("icon", IconProps {
                rotate: Some(rotate as u8),
                h_flip: Some(h_flip),
                v_flip: Some(v_flip),
                ..Default::default()
            }));
            prop_assert_eq!(set.resolve(&parent, true), single.resolve("alias", true));
        }

        /// Property: cyclic chains never resolve and never hang
        #[test]
        fn cycles_do_not_resolve(length in 1usize..20) {
            let aliases: Vec<String> = (0..length)
                .map(|i| format!("\"a{}\":\"a{}\"", i, (i + 1) % length))
                .collect();
            let json = format!(
                r#"{{"prefix":"demo","icons":{{"icon":{{"body":"<g/>"}}}},"aliases":{{{},"tail":"a0"}}}}"#,
                aliases.join(",")
            );
            let set: IconSet = json.parse().unwrap();
            for i in 0..length {
                let name = format!("a{}", i);
                prop_assert!(set.resolve(&name, false).is_none());
            }
            prop_assert!(set.resolve("tail", false).is_none());
            prop_assert_eq!(set.list(), vec!["icon"]);
        }

        /// Property: removing an icon removes it and all k aliases that depend on it
        #[test]
        fn remove_counts_dependents(parents in prop::collection::vec(any::<Index>(), 0..20)) {
            let mut set = IconSet::new("demo");
            set.set_icon("icon", Icon::new("<g/>"));
            set.set_icon("other", Icon::new("<g/>"));
            set.set_alias("unrelated", Alias::new("other"));
            for (i, parent) in parents.iter().enumerate() {
                let index = parent.index(i + 1);
                let parent = if index == 0 {
                    "icon".to_string()
                } else {
                    format!("alias-{}", index - 1)
                };
                let name = format!("alias-{}", i);
                prop_assert!(set.set_alias(&name, Alias::new(parent.as_str())));
            }
            prop_assert_eq!(set.remove("icon"), parents.len() + 1);
            prop_assert_eq!(set.len(), 2);
            prop_assert!(set.exists("unrelated"));
        }

        /// Property: exporting and reloading reaches a fixed point after one pass
        #[test]
        fn export_is_idempotent(shape in set_spec()) {
            let set = build(&shape, 1_000, false);
            let first = set.to_json_string(true, true).unwrap();
            let reloaded: IconSet = first.parse().unwrap();
            let second = reloaded.to_json_string(true, true).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: the comparator is reflexive and symmetric
        #[test]
        fn comparator_reflexive_and_symmetric(a in set_spec(), b in set_spec()) {
            let a = build(&a, 1_000, false);
            let b = build(&b, 1_000, false);
            prop_assert!(!has_icon_data_been_modified(&a, &a));
            prop_assert_eq!(
                has_icon_data_been_modified(&a, &b),
                has_icon_data_been_modified(&b, &a)
            );
        }

        /// Property: insertion order does not change the comparator or the merge
        #[test]
        fn merge_ignores_insertion_order(old in set_spec(), new in set_spec()) {
            let forward = merge_icon_sets(&build(&old, 1_000, false), &build(&new, 2_000, false));
            let backward = merge_icon_sets(&build(&old, 1_000, true), &build(&new, 2_000, true));
            prop_assert!(!has_icon_data_been_modified(&build(&new, 0, false), &build(&new, 0, true)));
            prop_assert_eq!(export_without_timestamp(forward), export_without_timestamp(backward));
        }

        /// Property: every name keeps resolving after a merge
        #[test]
        fn merge_keeps_every_name(old in set_spec(), new in set_spec()) {
            let old = build(&old, 1_000, false);
            let new = build(&new, 2_000, false);
            let merged = merge_icon_sets(&old, &new);

            for name in new.list() {
                prop_assert_eq!(merged.content_key(name), new.content_key(name), "content of {}", name);
                prop_assert_eq!(merged.is_visible(name), new.is_visible(name), "visibility of {}", name);
            }
            for name in old.list() {
                prop_assert!(merged.resolves(name), "{} no longer resolves", name);
                if !new.exists(name) {
                    prop_assert_eq!(merged.content_key(name), old.content_key(name));
                }
            }
        }

        /// Property: merging a set with itself changes nothing
        #[test]
        fn merge_with_self_is_identity(shape in set_spec(), a in 1i64..1_000_000, b in 1i64..1_000_000) {
            let old = build(&shape, a, false);
            let new = build(&shape, b, true);
            let merged = merge_icon_sets(&old, &new);
            prop_assert!(!has_icon_data_been_modified(&merged, &new));
            prop_assert_eq!(merged.last_modified(), Some(a.min(b)));
            for name in new.list() {
                prop_assert_eq!(merged.content_key(name), new.content_key(name));
            }
        }
    }
}
