//! Module-level detection outcomes.

use std::collections::BTreeSet;

use crate::fixtures::{
    self, APACHE, BSD_3_CLAUSE, COMMONS_CLAUSE, GPL_3, MIT, MPL_2, PATENTS, PROPRIETARY,
};
use license_detector::{Detector, LicenseType, MemTree};
use pretty_assertions::assert_eq;

fn types(list: &[LicenseType]) -> BTreeSet<LicenseType> {
    list.iter().cloned().collect()
}

#[test]
fn test_mit_root_license_is_redistributable() {
    let config = fixtures::config();
    let tree = MemTree::new()
        .with_file("LICENSE", MIT)
        .with_file("main.go", "package main");
    let detector = Detector::new("example.com/mit", "v1.0.0", &tree, &config);

    assert!(detector.module_is_redistributable());
    let licenses = detector.module_licenses();
    assert_eq!(licenses.len(), 1);
    assert_eq!(licenses[0].metadata.types, types(&[LicenseType::Mit]));
    assert_eq!(licenses[0].metadata.file_path, "LICENSE");
    assert_eq!(licenses[0].metadata.coverage.percent, 100.0);
    assert_eq!(licenses[0].contents.as_deref(), Some(MIT.as_bytes()));
}

#[test]
fn test_real_copyright_holder_does_not_change_result() {
    let config = fixtures::config();
    let text = fixtures::mit_with_holder("The Example Authors");
    let tree = MemTree::new().with_file("LICENSE.md", text.as_str());
    let detector = Detector::new("example.com/mit", "v1.0.0", &tree, &config);

    assert!(detector.module_is_redistributable());
    assert_eq!(detector.module_licenses()[0].metadata.types, types(&[LicenseType::Mit]));
}

#[test]
fn test_unknown_package_license_under_mit_module() {
    let config = fixtures::config();
    let tree = MemTree::new()
        .with_file("LICENSE", MIT)
        .with_file("pkg/LICENSE", PROPRIETARY);
    let mut detector = Detector::new("example.com/mixed", "v1.0.0", &tree, &config);

    assert!(detector.module_is_redistributable());

    let info = detector.package_info("pkg");
    assert!(!info.redistributable);
    let summary: Vec<(&str, BTreeSet<LicenseType>)> = info
        .licenses
        .iter()
        .map(|l| (l.file_path(), l.types().clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("pkg/LICENSE", types(&[LicenseType::Unknown])),
            ("LICENSE", types(&[LicenseType::Mit])),
        ]
    );
    assert!(info.licenses[0].contents.is_none());
    assert!(info.licenses[1].contents.is_some());
}

#[test]
fn test_unrecognized_root_license_blocks_every_package() {
    let config = fixtures::config();
    let tree = MemTree::new()
        .with_file("LICENSE", PROPRIETARY)
        .with_file("pkg/LICENSE", MIT)
        .with_file("pkg/sub/COPYING", APACHE);
    let mut detector = Detector::new("example.com/closed", "v0.1.0", &tree, &config);

    assert!(!detector.module_is_redistributable());
    assert!(detector.module_licenses()[0].metadata.coverage.percent < 75.0);
    assert!(detector.module_licenses()[0].contents.is_none());

    for dir in ["", "pkg", "pkg/sub", "other"] {
        assert!(!detector.package_info(dir).redistributable, "package {dir:?}");
    }
}

#[test]
fn test_module_without_license_is_not_redistributable() {
    let config = fixtures::config();
    let tree = MemTree::new()
        .with_file("README.md", "MIT licensed, honest")
        .with_file("pkg/LICENSE", MIT);
    let mut detector = Detector::new("example.com/none", "v1.0.0", &tree, &config);

    assert!(!detector.module_is_redistributable());
    assert!(detector.module_licenses().is_empty());
    assert!(!detector.package_info("pkg").redistributable);
}

#[test]
fn test_patents_file_does_not_block_redistribution() {
    let config = fixtures::config();
    let tree = MemTree::new()
        .with_file("LICENSE", BSD_3_CLAUSE)
        .with_file("PATENTS", PATENTS)
        .with_file("COPYING", PATENTS);
    let detector = Detector::new("example.com/patents", "v1.0.0", &tree, &config);

    assert!(detector.module_is_redistributable());
    let copying = &detector.module_licenses()[0];
    assert_eq!(copying.file_path(), "COPYING");
    assert_eq!(copying.metadata.types, types(&[LicenseType::GooglePatentsFile]));
    assert!(copying.contents.is_none());
}

#[test]
fn test_license_with_combined_patents_text() {
    let config = fixtures::config();
    let text = format!("{BSD_3_CLAUSE}\n\n{PATENTS}");
    let tree = MemTree::new().with_file("LICENSE", text.as_str());
    let detector = Detector::new("example.com/patents", "v1.0.0", &tree, &config);

    assert!(detector.module_is_redistributable());
    assert_eq!(
        detector.module_licenses()[0].metadata.types,
        types(&[LicenseType::Bsd3Clause, LicenseType::GooglePatentsFile])
    );
}

#[test]
fn test_disqualifying_clause_fails_module() {
    let config = fixtures::config();
    let text = format!("{APACHE}\n\n{COMMONS_CLAUSE}");
    let tree = MemTree::new().with_file("LICENSE", text.as_str());
    let detector = Detector::new("example.com/commons", "v1.0.0", &tree, &config);

    assert!(!detector.module_is_redistributable());
    assert_eq!(
        detector.module_licenses()[0].metadata.types,
        types(&[LicenseType::Apache20, LicenseType::CommonsClause])
    );
    assert!(detector.module_licenses()[0].contents.is_none());
}

#[test]
fn test_one_bad_root_file_fails_module() {
    let config = fixtures::config();
    let tree = MemTree::new()
        .with_file("LICENSE-MIT", MIT)
        .with_file("LICENSE-APACHE", APACHE)
        .with_file("COPYING", PROPRIETARY);
    let detector = Detector::new("example.com/dual", "v1.0.0", &tree, &config);

    assert!(!detector.module_is_redistributable());
    assert_eq!(detector.module_licenses().len(), 3);
}

#[test]
fn test_results_are_deterministic() {
    let config = fixtures::config();
    let tree = MemTree::new()
        .with_file("LICENSE", MIT)
        .with_file("a/LICENSE", PROPRIETARY)
        .with_file("b/COPYING", APACHE);

    let mut first = Detector::new("example.com/det", "v1.0.0", &tree, &config);
    let mut second = Detector::new("example.com/det", "v1.0.0", &tree, &config);

    assert_eq!(first.module_is_redistributable(), second.module_is_redistributable());
    assert_eq!(first.all_licenses().to_vec(), second.all_licenses().to_vec());
    assert_eq!(
        first.package_info("a").redistributable,
        second.package_info("a").redistributable
    );
}

#[test]
fn test_truncated_license_is_not_redistributable() {
    let config = fixtures::config();
    let cut = MIT.find("THE SOFTWARE IS PROVIDED").unwrap();
    let tree = MemTree::new().with_file("LICENSE", &MIT[..cut]);
    let detector = Detector::new("example.com/cut", "v1.0.0", &tree, &config);

    assert!(!detector.module_is_redistributable());
    assert_eq!(detector.module_licenses()[0].metadata.types, types(&[LicenseType::Unknown]));
    assert!(detector.module_licenses()[0].contents.is_none());
}

#[test]
fn test_terms_added_on_copyright_line_are_not_redistributable() {
    let config = fixtures::config();
    let text = format!(
        "Copyright 2022 Example Corp. This notice grants no right to redistribute, display, \
         mirror or host any part of this source code on any public service.\n\n{MIT}"
    );
    let tree = MemTree::new().with_file("LICENSE", text.as_str());
    let detector = Detector::new("example.com/notice", "v1.0.0", &tree, &config);

    assert!(!detector.module_is_redistributable());
    assert_eq!(detector.module_licenses()[0].metadata.types, types(&[LicenseType::Unknown]));
    assert!(detector.module_licenses()[0].contents.is_none());
}

#[test]
fn test_license_without_grant_is_not_redistributable() {
    let config = fixtures::config();
    let grant = BSD_3_CLAUSE.find("Redistribution and use").unwrap();
    let disclaimer = BSD_3_CLAUSE.find("THIS SOFTWARE IS PROVIDED").unwrap();
    let text = format!(
        "{}You may read this code. No other use is permitted.\n\n{}",
        &BSD_3_CLAUSE[..grant],
        &BSD_3_CLAUSE[disclaimer..]
    );
    let tree = MemTree::new()
        .with_file("LICENSE", MIT)
        .with_file("third_party/LICENSE", text.as_str());
    let mut detector = Detector::new("example.com/grantless", "v1.0.0", &tree, &config);

    assert!(detector.module_is_redistributable());
    let info = detector.package_info("third_party");
    assert!(!info.redistributable);
    assert_eq!(info.licenses[0].metadata.types, types(&[LicenseType::Unknown]));
}

#[test]
fn test_full_copyleft_license_is_redistributable() {
    let config = fixtures::config();
    let tree = MemTree::new()
        .with_file("COPYING", GPL_3)
        .with_file("LICENSE.md", MPL_2);
    let detector = Detector::new("example.com/copyleft", "v1.0.0", &tree, &config);

    assert!(detector.module_is_redistributable());
    let found: Vec<BTreeSet<LicenseType>> = detector
        .module_licenses()
        .iter()
        .map(|l| l.types().clone())
        .collect();
    assert_eq!(
        found,
        vec![types(&[LicenseType::Gpl30]), types(&[LicenseType::Mpl20])]
    );
}
