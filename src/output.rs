//! # Output Configuration
//!
//! Controls how the `iconset` CLI decorates its reports: coloured status
//! markers on capable terminals, plain bracketed labels everywhere else.
//!
//! The decision follows, in order:
//! - `--color=never|always|auto`
//! - `NO_COLOR` (any value disables colours, see https://no-color.org/)
//! - `CLICOLOR=0` / `CLICOLOR_FORCE=1`
//! - `TERM=dumb`
//! - terminal detection from the `console` crate
//!
//! ```rust,ignore
//! use iconset::output::{Marker, OutputConfig};
//!
//! let out = OutputConfig::from_env_and_flag("auto");
//! println!("{} 12 aliases dropped", out.marker(Marker::Warn));
//! ```

use std::env;

use console::style;

/// Output configuration for controlling colours and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colours and emojis should be used in output.
    pub use_color: bool,
}

/// Status marker printed in front of report lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Ok,
    Warn,
    Err,
    Info,
}

impl Marker {
    fn plain(self) -> &'static str {
        match self {
            Marker::Ok => "[OK]",
            Marker::Warn => "[WARN]",
            Marker::Err => "[ERR]",
            Marker::Info => "[INFO]",
        }
    }

    fn emoji(self) -> &'static str {
        match self {
            Marker::Ok => "✅",
            Marker::Warn => "⚠️",
            Marker::Err => "❌",
            Marker::Info => "📊",
        }
    }
}

impl OutputConfig {
    /// Create an output configuration from environment and the `--color` flag.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }

    /// Marker text for a report line.
    pub fn marker(&self, marker: Marker) -> &'static str {
        if self.use_color {
            marker.emoji()
        } else {
            marker.plain()
        }
    }

    /// Highlight an icon or set name.
    pub fn name(&self, name: &str) -> String {
        if self.use_color {
            style(name).cyan().force_styling(true).to_string()
        } else {
            format!("'{}'", name)
        }
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_always() {
        let config = OutputConfig::from_env_and_flag("always");
        assert!(config.use_color);
    }

    #[test]
    fn test_color_never() {
        let config = OutputConfig::from_env_and_flag("NEVER");
        assert!(!config.use_color);
    }

    #[test]
    fn test_marker_with_color() {
        let config = OutputConfig::with_color();
        assert_eq!(config.marker(Marker::Ok), "✅");
        assert_eq!(config.marker(Marker::Err), "❌");
    }

    #[test]
    fn test_marker_without_color() {
        let config = OutputConfig::without_color();
        assert_eq!(config.marker(Marker::Warn), "[WARN]");
        assert_eq!(config.marker(Marker::Info), "[INFO]");
    }

    #[test]
    fn test_name_highlight() {
        assert_eq!(OutputConfig::without_color().name("home"), "'home'");
        let colored = OutputConfig::with_color().name("home");
        assert!(colored.contains("home"));
        assert!(colored.contains('\u{1b}'));
    }
}
