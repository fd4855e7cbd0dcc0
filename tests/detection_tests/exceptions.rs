//! The whole-module exception override and reviewed corpus additions.

use std::collections::BTreeSet;

use crate::fixtures::{self, HOUSE_LICENSE, MIT, PROPRIETARY};
use license_detector::{Config, Detector, LicenseType, MemTree};
use pretty_assertions::assert_eq;
use serde_json::json;

const MODULE: &str = "example.com/house";

fn house_config() -> Config {
    fixtures::config_with_exceptions(json!({
        "modules": {
            MODULE: [
                { "path": "LICENSE", "types": ["MIT"], "contents": HOUSE_LICENSE }
            ]
        }
    }))
}

fn mit() -> BTreeSet<LicenseType> {
    BTreeSet::from([LicenseType::Mit])
}

#[test]
fn test_exact_declared_files_override_classification() {
    let config = house_config();
    let reformatted = HOUSE_LICENSE.to_uppercase().replace(' ', "  \n");
    let tree = MemTree::new()
        .with_file("LICENSE", reformatted.as_str())
        .with_file("main.go", "package main");
    let detector = Detector::new(MODULE, "v1.0.0", &tree, &config);

    assert!(detector.module_is_redistributable());
    let licenses = detector.module_licenses();
    assert_eq!(licenses.len(), 1);
    assert_eq!(licenses[0].metadata.types, mit());
    assert!(licenses[0].metadata.coverage.percent < 75.0);
    assert!(licenses[0].contents.is_some());
}

#[test]
fn test_without_exception_the_same_tree_is_unknown() {
    let config = fixtures::config();
    let tree = MemTree::new().with_file("LICENSE", HOUSE_LICENSE);
    let detector = Detector::new(MODULE, "v1.0.0", &tree, &config);

    assert!(!detector.module_is_redistributable());
    assert_eq!(
        detector.module_licenses()[0].metadata.types,
        BTreeSet::from([LicenseType::Unknown])
    );
}

#[test]
fn test_changed_contents_fall_back_to_classification() {
    let config = house_config();
    let edited = HOUSE_LICENSE.replace("nice", "mice");
    let tree = MemTree::new().with_file("LICENSE", edited.as_str());
    let detector = Detector::new(MODULE, "v1.0.0", &tree, &config);

    assert!(!detector.module_is_redistributable());
    assert_eq!(
        detector.module_licenses()[0].metadata.types,
        BTreeSet::from([LicenseType::Unknown])
    );
}

#[test]
fn test_changed_contents_with_known_license_still_classified() {
    let config = house_config();
    let tree = MemTree::new().with_file("LICENSE", MIT);
    let detector = Detector::new(MODULE, "v1.0.0", &tree, &config);

    assert!(detector.module_is_redistributable());
    assert_eq!(detector.module_licenses()[0].metadata.types, mit());
    assert_eq!(detector.module_licenses()[0].metadata.coverage.percent, 100.0);
}

#[test]
fn test_missing_declared_file_disables_override() {
    let config = house_config();
    let tree = MemTree::new().with_file("COPYING", HOUSE_LICENSE);
    let detector = Detector::new(MODULE, "v1.0.0", &tree, &config);

    assert!(!detector.module_is_redistributable());
}

#[test]
fn test_undeclared_license_file_disables_override() {
    let config = house_config();
    let tree = MemTree::new()
        .with_file("LICENSE", HOUSE_LICENSE)
        .with_file("extra/COPYING", MIT);
    let mut detector = Detector::new(MODULE, "v1.0.0", &tree, &config);

    assert!(!detector.module_is_redistributable());
    assert!(!detector.package_info("extra").redistributable);
}

#[test]
fn test_testdata_license_files_do_not_disable_override() {
    let config = house_config();
    let tree = MemTree::new()
        .with_file("LICENSE", HOUSE_LICENSE)
        .with_file("pkg/testdata/LICENSE", PROPRIETARY);
    let mut detector = Detector::new(MODULE, "v1.0.0", &tree, &config);

    assert!(detector.module_is_redistributable());
    assert!(detector.package_info("pkg/testdata").redistributable);
    let paths: Vec<&str> = detector
        .all_licenses()
        .iter()
        .map(|l| l.file_path())
        .collect();
    assert_eq!(paths, vec!["LICENSE"]);
}

#[test]
fn test_override_applies_only_to_listed_module() {
    let config = house_config();
    let tree = MemTree::new().with_file("LICENSE", HOUSE_LICENSE);
    let detector = Detector::new("example.com/elsewhere", "v1.0.0", &tree, &config);

    assert!(!detector.module_is_redistributable());
}

#[test]
fn test_override_with_nested_declared_file() {
    let config = fixtures::config_with_exceptions(json!({
        "modules": {
            MODULE: [
                { "path": "LICENSE", "types": ["MIT"], "contents": HOUSE_LICENSE },
                { "path": "sub/LICENSE", "types": ["Apache-2.0"], "contents": HOUSE_LICENSE }
            ]
        }
    }));
    let tree = MemTree::new()
        .with_file("LICENSE", HOUSE_LICENSE)
        .with_file("sub/LICENSE", HOUSE_LICENSE);
    let mut detector = Detector::new(MODULE, "v1.0.0", &tree, &config);

    assert!(detector.module_is_redistributable());
    assert_eq!(detector.module_licenses().len(), 1);

    let info = detector.package_info("sub/pkg");
    assert!(info.redistributable);
    assert_eq!(
        info.licenses[0].metadata.types,
        BTreeSet::from([LicenseType::Apache20])
    );
    assert_eq!(info.licenses[1].file_path(), "LICENSE");
}

#[test]
fn test_reviewed_corpus_addition_is_recognized() {
    let json_license = MIT.replace(
        "copies or substantial portions of the Software.",
        "copies or substantial portions of the Software.\n\nThe Software shall be used for Good, not Evil.",
    );
    let tree = MemTree::new().with_file("LICENSE", json_license.as_str());

    let bundled = Config::bundled().unwrap();
    let detector = Detector::new("example.com/json", "v1.0.0", &tree, &bundled);
    assert!(detector.module_is_redistributable());
    assert_eq!(
        detector.module_licenses()[0].metadata.types,
        BTreeSet::from([LicenseType::Json])
    );
}
