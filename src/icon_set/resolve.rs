//! # Alias Resolution
//!
//! Follows an alias chain down to the real icon it ends at and composes the
//! transforms found along the way. The walk is iterative and remembers every
//! name it has visited: chains of any length resolve, and a chain that loops
//! back on itself resolves to `None` instead of recursing forever.

use std::collections::HashSet;

use super::{IconEntry, IconSet};
use crate::props::{FullIconProps, IconProps};

/// Result of resolving a name: the terminal body and composed properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedIcon {
    pub body: String,
    pub props: IconProps,
}

impl ResolvedIcon {
    /// Properties with implicit defaults filled in for anything omitted.
    pub fn full_props(&self) -> FullIconProps {
        FullIconProps::default().with_icon(&self.props)
    }
}

/// Resolved visual content of an entry, independent of its name.
///
/// Two entries with equal keys render identically. Numbers are compared by
/// bit pattern after folding `-0.0` into `0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentKey {
    body: String,
    geometry: [u64; 4],
    rotate: u8,
    h_flip: bool,
    v_flip: bool,
}

impl ContentKey {
    pub fn new(body: &str, props: &FullIconProps) -> Self {
        Self {
            body: body.to_string(),
            geometry: [props.left, props.top, props.width, props.height].map(number_bits),
            rotate: props.rotate % 4,
            h_flip: props.h_flip,
            v_flip: props.v_flip,
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

fn number_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// Internal resolution result borrowing from the set.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Resolution<'a> {
    pub body: &'a str,
    pub props: FullIconProps,
    /// The entry's own `hidden` flag.
    pub hidden: bool,
    /// Whether the terminal real icon is hidden.
    pub terminal_hidden: bool,
    /// Number of alias hops to the terminal icon.
    pub depth: usize,
}

impl Resolution<'_> {
    pub fn is_visible(&self) -> bool {
        !self.hidden && !self.terminal_hidden
    }

    pub fn content_key(&self) -> ContentKey {
        ContentKey::new(self.body, &self.props)
    }
}

impl IconSet {
    /// Resolve `name` to its content and composed properties.
    ///
    /// With `include_defaults`, every property is present. Without it,
    /// properties equal to the implicit defaults are omitted. Returns `None`
    /// for unknown names and for chains that are dangling or cyclic.
    pub fn resolve(&self, name: &str, include_defaults: bool) -> Option<ResolvedIcon> {
        let resolution = self.resolve_chain(name)?;
        let full = resolution.props;
        let props = if include_defaults {
            IconProps {
                left: Some(full.left),
                top: Some(full.top),
                width: Some(full.width),
                height: Some(full.height),
                rotate: Some(full.rotate),
                h_flip: Some(full.h_flip),
                v_flip: Some(full.v_flip),
                hidden: Some(resolution.hidden),
            }
        } else {
            IconProps {
                hidden: resolution.hidden.then_some(true),
                ..full.relative_to(&FullIconProps::default())
            }
        };
        Some(ResolvedIcon {
            body: resolution.body.to_string(),
            props,
        })
    }

    /// Whether `name` exists and its chain ends at a real icon.
    pub fn resolves(&self, name: &str) -> bool {
        self.resolve_chain(name).is_some()
    }

    /// Whether `name` resolves, is not hidden itself and ends at a visible icon.
    pub fn is_visible(&self, name: &str) -> bool {
        self.resolve_chain(name)
            .is_some_and(|resolution| resolution.is_visible())
    }

    /// Content identity of `name`, if it resolves.
    pub fn content_key(&self, name: &str) -> Option<ContentKey> {
        self.resolve_chain(name).map(|resolution| resolution.content_key())
    }

    pub(crate) fn resolve_chain(&self, name: &str) -> Option<Resolution<'_>> {
        let mut chain: Vec<&IconProps> = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = name;

        loop {
            if !visited.insert(current) {
                return None;
            }
            match self.entries.get(current)? {
                IconEntry::Alias(alias) => {
                    chain.push(&alias.props);
                    current = alias.parent.as_str();
                }
                IconEntry::Icon(icon) => {
                    let mut props = self.defaults.full().with_icon(&icon.props);
                    for delta in chain.iter().rev() {
                        props = props.with_alias(delta);
                    }
                    let terminal_hidden = icon.props.is_hidden();
                    let hidden = chain
                        .first()
                        .map(|own| own.is_hidden())
                        .unwrap_or(terminal_hidden);
                    return Some(Resolution {
                        body: &icon.body,
                        props,
                        hidden,
                        terminal_hidden,
                        depth: chain.len(),
                    });
                }
            }
        }
    }
}
