//! # Icon Properties
//!
//! Optional geometry and transformation properties shared by icons, aliases
//! and icon-set defaults, plus the fully-populated form produced by
//! resolution.
//!
//! Three layers are involved when an icon is resolved:
//!
//! 1. **Implicit defaults**: `left = 0`, `top = 0`, `width = 16`,
//!    `height = 16`, `rotate = 0`, `hFlip = false`, `vFlip = false`.
//! 2. **Set-level defaults** ([`IconDefaults`]): override the implicit ones
//!    for every icon in a set.
//! 3. **Per-entry properties** ([`IconProps`]): absolute values on a real
//!    icon, incremental transforms on an alias.
//!
//! [`FullIconProps`] is the result of folding those layers together.

use serde::{Deserialize, Serialize, Serializer};

/// Implicit width and height of an icon when nothing else is specified.
pub const DEFAULT_SIZE: f64 = 16.0;

/// Properties an icon or alias may carry.
///
/// On a real icon every value is absolute. On an alias, `rotate`, `h_flip`
/// and `v_flip` are deltas applied on top of the parent, while `left`, `top`,
/// `width` and `height` replace the parent's values. `hidden` always belongs
/// to the entry itself.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconProps {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_number"
    )]
    pub left: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_number"
    )]
    pub top: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_number"
    )]
    pub width: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_number"
    )]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h_flip: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v_flip: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl IconProps {
    /// Whether `hidden` is explicitly `true`.
    pub fn is_hidden(&self) -> bool {
        self.hidden.unwrap_or(false)
    }

    /// Whether these properties, read as alias deltas, change anything.
    ///
    /// An alias with a non-identity transform is a variation.
    pub fn has_transform(&self) -> bool {
        self.left.is_some()
            || self.top.is_some()
            || self.width.is_some()
            || self.height.is_some()
            || self.rotate.is_some_and(|r| r % 4 != 0)
            || self.h_flip.unwrap_or(false)
            || self.v_flip.unwrap_or(false)
    }

    /// Bring loaded values into canonical form.
    ///
    /// Rotation is reduced modulo 4; `false`/`0` transform values that carry
    /// no information are dropped so that equal data compares equal.
    pub fn normalized(mut self) -> Self {
        self.rotate = self.rotate.map(|r| r % 4);
        if self.hidden == Some(false) {
            self.hidden = None;
        }
        self
    }

    /// Alias deltas in canonical form: identity transforms are omitted.
    pub(crate) fn normalized_delta(mut self) -> Self {
        self = self.normalized();
        if self.rotate == Some(0) {
            self.rotate = None;
        }
        if self.h_flip == Some(false) {
            self.h_flip = None;
        }
        if self.v_flip == Some(false) {
            self.v_flip = None;
        }
        self
    }
}

/// Set-level fallback values, applied to icons that omit a property.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconDefaults {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_number"
    )]
    pub left: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_number"
    )]
    pub top: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_number"
    )]
    pub width: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_number"
    )]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h_flip: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v_flip: Option<bool>,
}

impl IconDefaults {
    /// Implicit defaults overridden by whatever this set declares.
    pub fn full(&self) -> FullIconProps {
        let implicit = FullIconProps::default();
        FullIconProps {
            left: self.left.unwrap_or(implicit.left),
            top: self.top.unwrap_or(implicit.top),
            width: self.width.unwrap_or(implicit.width),
            height: self.height.unwrap_or(implicit.height),
            rotate: self.rotate.map(|r| r % 4).unwrap_or(implicit.rotate),
            h_flip: self.h_flip.unwrap_or(implicit.h_flip),
            v_flip: self.v_flip.unwrap_or(implicit.v_flip),
        }
    }
}

/// Fully resolved geometry and transformation of an icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FullIconProps {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub rotate: u8,
    pub h_flip: bool,
    pub v_flip: bool,
}

impl Default for FullIconProps {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            rotate: 0,
            h_flip: false,
            v_flip: false,
        }
    }
}

impl FullIconProps {
    /// Apply the absolute properties of a real icon.
    pub fn with_icon(self, props: &IconProps) -> Self {
        Self {
            left: props.left.unwrap_or(self.left),
            top: props.top.unwrap_or(self.top),
            width: props.width.unwrap_or(self.width),
            height: props.height.unwrap_or(self.height),
            rotate: props.rotate.map(|r| r % 4).unwrap_or(self.rotate),
            h_flip: props.h_flip.unwrap_or(self.h_flip),
            v_flip: props.v_flip.unwrap_or(self.v_flip),
        }
    }

    /// Compose an alias on top of its resolved parent.
    ///
    /// Rotation accumulates modulo 4, flips are XORed and explicit geometry
    /// replaces the parent's.
    pub fn with_alias(self, delta: &IconProps) -> Self {
        Self {
            left: delta.left.unwrap_or(self.left),
            top: delta.top.unwrap_or(self.top),
            width: delta.width.unwrap_or(self.width),
            height: delta.height.unwrap_or(self.height),
            rotate: (self.rotate + delta.rotate.unwrap_or(0) % 4) % 4,
            h_flip: self.h_flip ^ delta.h_flip.unwrap_or(false),
            v_flip: self.v_flip ^ delta.v_flip.unwrap_or(false),
        }
    }

    /// Properties of a real icon that differ from `base`.
    ///
    /// Used to store or export an icon relative to a set's defaults.
    pub fn relative_to(&self, base: &FullIconProps) -> IconProps {
        IconProps {
            left: differs(self.left, base.left),
            top: differs(self.top, base.top),
            width: differs(self.width, base.width),
            height: differs(self.height, base.height),
            rotate: (self.rotate != base.rotate).then_some(self.rotate),
            h_flip: (self.h_flip != base.h_flip).then_some(self.h_flip),
            v_flip: (self.v_flip != base.v_flip).then_some(self.v_flip),
            hidden: None,
        }
    }

    /// Alias deltas that turn `parent` into `self`.
    pub fn delta_from(&self, parent: &FullIconProps) -> IconProps {
        IconProps {
            left: differs(self.left, parent.left),
            top: differs(self.top, parent.top),
            width: differs(self.width, parent.width),
            height: differs(self.height, parent.height),
            rotate: Some((self.rotate + 4 - parent.rotate) % 4).filter(|r| *r != 0),
            h_flip: (self.h_flip != parent.h_flip).then_some(true),
            v_flip: (self.v_flip != parent.v_flip).then_some(true),
            hidden: None,
        }
    }
}

fn differs(value: f64, base: f64) -> Option<f64> {
    (value != base).then_some(value)
}

/// Write whole numbers as JSON integers so `24` does not come back as `24.0`.
pub(crate) fn serialize_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < 9_007_199_254_740_992.0 => {
            serializer.serialize_i64(*v as i64)
        }
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_none(),
    }
}
