//! Warnings the library reports through the `log` facade.

use iconset::error::{Error, Result};
use iconset::icon_set::IconSet;
use iconset::markup::{CleanMarkup, MarkupCleaner};
use log::Level;

#[test]
fn duplicate_name_warns_and_keeps_icon() {
    testing_logger::setup();

    let set: IconSet = r#"{
        "prefix": "demo",
        "icons": { "home": { "body": "<g/>" }, "other": { "body": "<path/>" } },
        "aliases": { "home": "other" }
    }"#
    .parse()
    .unwrap();

    assert_eq!(set.resolve("home", false).unwrap().body, "<g/>");
    testing_logger::validate(|captured_logs| {
        let warnings: Vec<_> = captured_logs
            .iter()
            .filter(|log| log.level == Level::Warn)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].body.contains("'home'"));
        assert!(warnings[0].body.contains("keeping the icon"));
    });
}

/// Cleaner that rejects anything containing `<script`.
struct StrictCleaner;

impl MarkupCleaner for StrictCleaner {
    fn clean(&self, name: &str, source: &str) -> Result<CleanMarkup> {
        if source.contains("<script") {
            return Err(Error::Markup {
                name: name.to_string(),
                message: "scripts are not allowed".to_string(),
            });
        }
        Ok(CleanMarkup {
            body: source.to_string(),
            left: 0.0,
            top: 0.0,
            width: 24.0,
            height: 24.0,
        })
    }
}

#[test]
fn failed_cleanup_warns_and_continues() {
    testing_logger::setup();

    let mut set = IconSet::new("demo");
    let report = set.import_markup(
        &StrictCleaner,
        vec![
            ("first", "<path d=\"M0 0\"/>"),
            ("evil", "<script>alert(1)</script>"),
            ("last", "<circle r=\"2\"/>"),
        ],
    );

    assert_eq!(report.imported, vec!["first", "last"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(set.list(), vec!["first", "last"]);

    testing_logger::validate(|captured_logs| {
        let warnings: Vec<_> = captured_logs
            .iter()
            .filter(|log| log.level == Level::Warn)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].body.contains("evil"));
        assert!(warnings[0].body.contains("scripts are not allowed"));
    });
}
