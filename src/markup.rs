//! # Markup Collaborators
//!
//! The icon-set core treats icon bodies as opaque strings. Turning source
//! SVG into a clean body, and turning a resolved icon back into a complete
//! SVG document, belongs to external stages that plug in through the traits
//! defined here:
//!
//! - [`MarkupCleaner`] normalizes source markup into a body plus its viewBox.
//! - [`MarkupRenderer`] renders a [`ResolvedIcon`] into a standalone string.
//!
//! [`IconSet::import_markup`] feeds a batch of sources through a cleaner one
//! icon at a time. A failing icon is logged and skipped; the rest of the
//! batch is still imported.

use log::{info, warn};

use crate::error::{Error, Result};
use crate::icon_set::{Icon, IconSet, ResolvedIcon};
use crate::props::{FullIconProps, IconProps};

/// Output of a markup cleanup stage.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanMarkup {
    /// Normalized body: the content of the `<svg>` element.
    pub body: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Normalizes source markup for one icon.
pub trait MarkupCleaner {
    /// Clean `source`, the markup of icon `name`.
    fn clean(&self, name: &str, source: &str) -> Result<CleanMarkup>;
}

/// Renders a resolved icon.
pub trait MarkupRenderer {
    fn render(&self, icon: &ResolvedIcon) -> Result<String>;
}

impl Icon {
    /// Build a real icon from cleaned markup.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidIcon` if the body is empty or the viewBox has a
    /// non-positive or non-finite size.
    pub fn from_markup(name: &str, markup: CleanMarkup) -> Result<Icon> {
        if markup.body.trim().is_empty() {
            return Err(Error::InvalidIcon {
                name: name.to_string(),
                message: "markup cleanup produced an empty body".to_string(),
            });
        }
        for (label, value) in [("width", markup.width), ("height", markup.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidIcon {
                    name: name.to_string(),
                    message: format!("{} must be a positive number, got {}", label, value),
                });
            }
        }
        if !markup.left.is_finite() || !markup.top.is_finite() {
            return Err(Error::InvalidIcon {
                name: name.to_string(),
                message: "viewBox origin must be finite".to_string(),
            });
        }
        Ok(Icon::with_props(
            markup.body,
            IconProps {
                left: Some(markup.left),
                top: Some(markup.top),
                width: Some(markup.width),
                height: Some(markup.height),
                ..Default::default()
            },
        ))
    }
}

/// Outcome of [`IconSet::import_markup`].
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Names that were imported, in input order.
    pub imported: Vec<String>,
    /// Names that were skipped, with the reason.
    pub skipped: Vec<(String, Error)>,
}

impl ImportReport {
    /// True if nothing was skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl IconSet {
    /// Clean and import a batch of icons.
    ///
    /// Each `(name, source)` pair is passed to `cleaner`; successful results
    /// are stored with [`IconSet::set_icon`]. Failures skip that icon only.
    pub fn import_markup<C, I, N, S>(&mut self, cleaner: &C, items: I) -> ImportReport
    where
        C: MarkupCleaner + ?Sized,
        I: IntoIterator<Item = (N, S)>,
        N: AsRef<str>,
        S: AsRef<str>,
    {
        let mut report = ImportReport::default();
        for (name, source) in items {
            let name = name.as_ref();
            let icon = cleaner
                .clean(name, source.as_ref())
                .and_then(|markup| Icon::from_markup(name, markup));
            match icon {
                Ok(icon) => {
                    self.set_icon(name, icon);
                    report.imported.push(name.to_string());
                }
                Err(err) => {
                    warn!("Skipping icon '{}': {}", name, err);
                    report.skipped.push((name.to_string(), err));
                }
            }
        }
        info!(
            "Imported {} icon(s) into '{}', skipped {}",
            report.imported.len(),
            self.prefix(),
            report.skipped.len()
        );
        report
    }
}

/// Renders a resolved icon as a standalone `<svg>` document.
///
/// Rotation and flips are applied with a `<g transform>` wrapper around the
/// body; flipping both axes is rendered as a half turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRenderer;

impl MarkupRenderer for SvgRenderer {
    fn render(&self, icon: &ResolvedIcon) -> Result<String> {
        let props = icon.full_props();
        Ok(render_svg(&icon.body, &props))
    }
}

fn render_svg(body: &str, props: &FullIconProps) -> String {
    let (mut left, mut top, mut width, mut height) =
        (props.left, props.top, props.width, props.height);
    let mut rotate = props.rotate as u32;
    let mut transforms: Vec<String> = Vec::new();

    if props.h_flip && props.v_flip {
        rotate += 2;
    } else if props.h_flip {
        transforms.push(format!(
            "translate({} {})",
            number(width + left),
            number(-top)
        ));
        transforms.push("scale(-1 1)".to_string());
        left = 0.0;
        top = 0.0;
    } else if props.v_flip {
        transforms.push(format!(
            "translate({} {})",
            number(-left),
            number(height + top)
        ));
        transforms.push("scale(1 -1)".to_string());
        left = 0.0;
        top = 0.0;
    }

    rotate %= 4;
    match rotate {
        1 => {
            let center = number(height / 2.0 + top);
            transforms.insert(0, format!("rotate(90 {} {})", center, center));
        }
        2 => transforms.insert(
            0,
            format!(
                "rotate(180 {} {})",
                number(width / 2.0 + left),
                number(height / 2.0 + top)
            ),
        ),
        3 => {
            let center = number(width / 2.0 + left);
            transforms.insert(0, format!("rotate(-90 {} {})", center, center));
        }
        _ => {}
    }
    if rotate % 2 == 1 {
        std::mem::swap(&mut left, &mut top);
        std::mem::swap(&mut width, &mut height);
    }

    let content = if transforms.is_empty() {
        body.to_string()
    } else {
        format!("<g transform=\"{}\">{}</g>", transforms.join(" "), body)
    };
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"{l} {t} {w} {h}\">{content}</svg>",
        w = number(width),
        h = number(height),
        l = number(left),
        t = number(top),
        content = content
    )
}

/// Format a number the way it would appear in markup: no trailing `.0`.
fn number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
