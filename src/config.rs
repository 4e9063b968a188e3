//! # Configuration Schema and Parsing
//!
//! This module defines the `.iconset.yaml` configuration file read by the
//! `iconset` command-line tool, and the logic for parsing it.
//!
//! ## Fields
//!
//! Every field is optional:
//!
//! - `mark_as_hidden` (default `true`): when merging, hide old icons whose
//!   content no longer exists in the new set.
//! - `validate` (default `true`): drop broken aliases and stale references
//!   when exporting.
//! - `pretty` (default `true`): pretty-print JSON output.
//! - `prefix`: if set, documents processed by the CLI must use this prefix.
//!
//! ```yaml
//! mark_as_hidden: false
//! pretty: false
//! prefix: mdi
//! ```
//!
//! Unknown keys are rejected so that typos do not silently fall back to
//! defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::merge::MergeOptions;

/// Name of the configuration file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = ".iconset.yaml";

const ACCEPTED_KEYS: &str = "mark_as_hidden, validate, pretty, prefix";

/// Options for the `iconset` CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    pub mark_as_hidden: bool,
    pub validate: bool,
    pub pretty: bool,
    pub prefix: Option<String>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            mark_as_hidden: true,
            validate: true,
            pretty: true,
            prefix: None,
        }
    }
}

impl MergeConfig {
    /// Merge options derived from this configuration.
    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            mark_as_hidden: self.mark_as_hidden,
        }
    }

    /// Check a document prefix against the configured one.
    pub fn check_prefix(&self, prefix: &str) -> Result<()> {
        match &self.prefix {
            Some(expected) if expected != prefix => Err(Error::ConfigParse {
                message: format!(
                    "icon set prefix '{}' does not match configured prefix '{}'",
                    prefix, expected
                ),
                hint: Some(format!(
                    "remove `prefix` from {} or use a '{}' icon set",
                    DEFAULT_CONFIG_FILE, expected
                )),
            }),
            _ => Ok(()),
        }
    }
}

/// Parses a YAML string into a [`MergeConfig`].
///
/// An empty document yields the defaults.
pub fn parse(yaml_content: &str) -> Result<MergeConfig> {
    if yaml_content.trim().is_empty() {
        return Ok(MergeConfig::default());
    }
    serde_yaml::from_str(yaml_content).map_err(|err| {
        let message = err.to_string();
        let hint = message
            .contains("unknown field")
            .then(|| format!("accepted keys are: {}", ACCEPTED_KEYS));
        Error::ConfigParse { message, hint }
    })
}

/// Parse a [`MergeConfig`] from a YAML file path.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<MergeConfig> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Load configuration for the CLI.
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is read
/// if present in the current directory; otherwise defaults apply.
pub fn load(explicit: Option<&Path>) -> Result<MergeConfig> {
    match explicit {
        Some(path) => from_file(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.is_file() {
                from_file(path)
            } else {
                Ok(MergeConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
mark_as_hidden: false
validate: false
pretty: false
prefix: mdi
"#;
        let config = parse(yaml).unwrap();
        assert!(!config.mark_as_hidden);
        assert!(!config.validate);
        assert!(!config.pretty);
        assert_eq!(config.prefix.as_deref(), Some("mdi"));
        assert!(!config.merge_options().mark_as_hidden);
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let config = parse("pretty: false\n").unwrap();
        assert!(config.mark_as_hidden);
        assert!(config.validate);
        assert!(!config.pretty);
        assert_eq!(config.prefix, None);
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(parse("").unwrap(), MergeConfig::default());
        assert_eq!(parse("  \n").unwrap(), MergeConfig::default());
    }

    #[test]
    fn test_parse_unknown_key_has_hint() {
        let err = parse("mark_hidden: true\n").unwrap_err();
        match err {
            Error::ConfigParse { message, hint } => {
                assert!(message.contains("unknown field"));
                assert!(hint.unwrap().contains("mark_as_hidden"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_wrong_type() {
        let err = parse("pretty: maybe\n").unwrap_err();
        match err {
            Error::ConfigParse { hint, .. } => assert!(hint.is_none()),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_from_file_nonexistent() {
        let result = from_file("nonexistent_file.yaml");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        std::fs::write(&path, "validate: false\n").unwrap();
        let config = load(Some(&path)).unwrap();
        assert!(!config.validate);
    }

    #[test]
    fn test_check_prefix() {
        let config = MergeConfig {
            prefix: Some("mdi".to_string()),
            ..Default::default()
        };
        assert!(config.check_prefix("mdi").is_ok());
        let err = config.check_prefix("fa").unwrap_err();
        assert!(err.to_string().contains("does not match"));
        assert!(MergeConfig::default().check_prefix("anything").is_ok());
    }
}
