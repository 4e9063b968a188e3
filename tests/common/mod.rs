//! Shared test utilities for CLI end-to-end tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_file("old.json", documents::OLD);
//!     fixture.command().arg("info").arg("old.json").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::documents;
    pub use super::TestFixture;
}

/// Icon-set documents used across the CLI tests.
#[allow(dead_code)]
pub mod documents {
    /// Published version: `home`, a `house` alias and an `arrow` variation.
    pub const OLD: &str = r#"{
  "prefix": "demo",
  "lastModified": 1700000000,
  "icons": {
    "home": { "body": "<path d=\"M1 1\"/>" },
    "arrow": { "body": "<path d=\"M0 8h16\"/>" },
    "legacy": { "body": "<path d=\"M9 9\"/>" }
  },
  "aliases": {
    "house": "home",
    "arrow-down": { "parent": "arrow", "rotate": 1 }
  }
}
"#;

    /// Regenerated version: `home` renamed to `house-filled`, `legacy` gone.
    pub const NEW: &str = r#"{
  "prefix": "demo",
  "lastModified": 1700000500,
  "icons": {
    "house-filled": { "body": "<path d=\"M1 1\"/>" },
    "arrow": { "body": "<path d=\"M0 8h16\"/>" }
  },
  "aliases": {
    "arrow-down": { "parent": "arrow", "rotate": 1 }
  }
}
"#;

    /// Same content as `OLD` under different names and structure.
    pub const OLD_RENAMED: &str = r#"{
  "prefix": "demo",
  "icons": {
    "building": { "body": "<path d=\"M1 1\"/>" },
    "arrow-south": { "body": "<path d=\"M0 8h16\"/>", "rotate": 1 },
    "old": { "body": "<path d=\"M9 9\"/>" }
  },
  "aliases": {
    "arrow-east": { "parent": "arrow-south", "rotate": 3 }
  }
}
"#;

    /// Broken alias, stale character and stale category member.
    pub const STALE: &str = r#"{
  "prefix": "stale",
  "icons": { "a": { "body": "<g/>" } },
  "aliases": { "b": "missing" },
  "chars": { "e001": "a", "e002": "gone" },
  "categories": { "Letters": ["a", "gone"] }
}
"#;

    /// Not an icon set: icons lack a body.
    pub const MALFORMED: &str = r#"{ "prefix": "bad", "icons": { "a": { "width": 16 } } }"#;
}

/// A temporary directory populated with test documents.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Add a `.iconset.yaml` configuration file with the given content.
    #[allow(dead_code)]
    pub fn with_config(self, content: &str) -> Self {
        self.with_file(".iconset.yaml", content)
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("iconset");
        cmd.current_dir(self.path()).arg("--color").arg("never");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_with_file() {
        let fixture = TestFixture::new().with_file("old.json", documents::OLD);
        assert!(fixture.path().join("old.json").exists());
    }

    #[test]
    fn test_documents_are_valid_json() {
        for document in [
            documents::OLD,
            documents::NEW,
            documents::OLD_RENAMED,
            documents::STALE,
            documents::MALFORMED,
        ] {
            serde_json::from_str::<serde_json::Value>(document).expect("Document should be JSON");
        }
    }
}
