//! # Icon Set Document Format
//!
//! Serde representations of the canonical icon-set JSON document. These types
//! are the ingestion and emission boundary of the crate: [`IconSet`] is built
//! from an [`IconSetJson`] and exported back into one.
//!
//! ```json
//! {
//!   "prefix": "demo",
//!   "lastModified": 1700000000,
//!   "height": 24,
//!   "icons": { "home": { "body": "<path d=\"M0 0h24v24H0z\"/>" } },
//!   "aliases": { "house": { "parent": "home" } }
//! }
//! ```
//!
//! Legacy documents may write an alias as a bare string naming its parent
//! (`"house": "home"`). That form is normalized into [`AliasJson`] during
//! deserialization so the rest of the crate only ever sees one shape.
//!
//! [`IconSet`]: crate::icon_set::IconSet

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::props::{IconDefaults, IconProps};

/// A complete icon-set document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSetJson {
    pub prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<i64>,
    #[serde(flatten)]
    pub defaults: IconDefaults,
    pub icons: IndexMap<String, IconJson>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub aliases: IndexMap<String, AliasJson>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub chars: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub categories: IndexMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub prefixes: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub suffixes: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<IconSetInfo>,
}

/// A real icon as written in the `icons` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconJson {
    pub body: String,
    #[serde(flatten)]
    pub props: IconProps,
}

/// An alias as written in the `aliases` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AliasRepr")]
pub struct AliasJson {
    pub parent: String,
    #[serde(flatten)]
    pub props: IconProps,
}

/// Every shape an alias has been written in.
#[derive(Deserialize)]
#[serde(untagged)]
enum AliasRepr {
    Parent(String),
    Object {
        parent: String,
        #[serde(flatten)]
        props: IconProps,
    },
}

impl From<AliasRepr> for AliasJson {
    fn from(repr: AliasRepr) -> Self {
        match repr {
            AliasRepr::Parent(parent) => AliasJson {
                parent,
                props: IconProps::default(),
            },
            AliasRepr::Object { parent, props } => AliasJson { parent, props },
        }
    }
}

/// Descriptive metadata about an icon set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSetInfo {
    pub name: String,
    pub author: Author,
    pub license: License,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<InfoHeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

/// Icon set author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Icon set license.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spdx: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Grid height of the icons: one value, or several for multi-grid sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoHeight {
    Single(u32),
    Multiple(Vec<u32>),
}

/// Parse an icon-set document from JSON text.
///
/// # Errors
///
/// Returns `Error::Parse` if the text is not valid JSON or does not match the
/// document shape (for example, an icon without a `body`).
pub fn parse(content: &str) -> Result<IconSetJson> {
    serde_json::from_str(content).map_err(|err| Error::Parse {
        message: err.to_string(),
    })
}

/// Serialize an icon-set document to JSON text.
///
/// Pretty output uses two-space indentation and ends with a newline.
pub fn to_string(document: &IconSetJson, pretty: bool) -> Result<String> {
    let mut content = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    if pretty {
        content.push('\n');
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_document() {
        let doc = parse(r#"{"prefix":"demo","icons":{"a":{"body":"<g/>"}}}"#).unwrap();
        assert_eq!(doc.prefix, "demo");
        assert_eq!(doc.icons.len(), 1);
        assert!(doc.aliases.is_empty());
        assert_eq!(doc.last_modified, None);
    }

    #[test]
    fn test_parse_defaults_are_flattened() {
        let doc = parse(r#"{"prefix":"demo","width":24,"height":20,"hFlip":true,"icons":{}}"#)
            .unwrap();
        assert_eq!(doc.defaults.width, Some(24.0));
        assert_eq!(doc.defaults.height, Some(20.0));
        assert_eq!(doc.defaults.h_flip, Some(true));
    }

    #[test]
    fn test_parse_missing_body_is_error() {
        let result = parse(r#"{"prefix":"demo","icons":{"a":{"width":24}}}"#);
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("body"));
    }

    #[test]
    fn test_parse_missing_icons_is_error() {
        assert!(parse(r#"{"prefix":"demo"}"#).is_err());
    }

    #[test]
    fn test_legacy_string_alias_is_normalized() {
        let doc = parse(r#"{"prefix":"demo","icons":{"a":{"body":""}},"aliases":{"b":"a"}}"#)
            .unwrap();
        let alias = &doc.aliases["b"];
        assert_eq!(alias.parent, "a");
        assert_eq!(alias.props, IconProps::default());
    }

    #[test]
    fn test_object_alias_keeps_transform() {
        let doc = parse(
            r#"{"prefix":"demo","icons":{"a":{"body":""}},"aliases":{"b":{"parent":"a","rotate":1,"vFlip":true}}}"#,
        )
        .unwrap();
        let alias = &doc.aliases["b"];
        assert_eq!(alias.props.rotate, Some(1));
        assert_eq!(alias.props.v_flip, Some(true));
    }

    #[test]
    fn test_info_parses() {
        let doc = parse(
            r#"{"prefix":"demo","icons":{},"info":{"name":"Demo","author":{"name":"Me"},"license":{"title":"MIT","spdx":"MIT"},"height":[16,24]}}"#,
        )
        .unwrap();
        let info = doc.info.unwrap();
        assert_eq!(info.name, "Demo");
        assert_eq!(info.license.spdx.as_deref(), Some("MIT"));
        assert_eq!(info.height, Some(InfoHeight::Multiple(vec![16, 24])));
    }

    #[test]
    fn test_serialize_key_order_and_omissions() {
        let doc = parse(
            r#"{"icons":{"a":{"body":"<g/>","height":24}},"prefix":"demo","lastModified":5}"#,
        )
        .unwrap();
        let text = to_string(&doc, false).unwrap();
        assert_eq!(
            text,
            r#"{"prefix":"demo","lastModified":5,"icons":{"a":{"body":"<g/>","height":24}}}"#
        );
    }

    #[test]
    fn test_pretty_output_ends_with_newline() {
        let doc = parse(r#"{"prefix":"demo","icons":{}}"#).unwrap();
        let text = to_string(&doc, true).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("  \"prefix\": \"demo\""));
    }
}
