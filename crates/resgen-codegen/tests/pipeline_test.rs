//! End-to-end tests of the generation pipeline on fixture record sets

use pretty_assertions::assert_eq;
use resgen_codegen::generators::build_all;
use resgen_codegen::{generate, validate, Artifacts, GenerateOptions, Generator};
use resgen_core::{Locale, ResourceSet, Struct, WarningKind};
use resgen_test_fixtures::{conflicting_images, image, sample_app, scene, string};
use std::collections::BTreeSet;

fn run(resources: &ResourceSet, options: &GenerateOptions) -> Artifacts {
    generate(resources, options).expect("generation succeeds")
}

fn run_builders(resources: &ResourceSet) -> Struct {
    let outputs = build_all(&Generator::ALL, resources, false).expect("builders succeed");
    resgen_codegen::aggregate::aggregate_outputs(outputs).0
}

fn assert_unique_names(tree: &Struct, path: &str) {
    let mut seen = BTreeSet::new();
    for name in tree
        .children()
        .iter()
        .map(|c| &c.name)
        .chain(tree.members().iter().map(|m| &m.identifier))
    {
        assert!(
            seen.insert(name.sanitized_name.clone()),
            "duplicate '{}' in {}",
            name.sanitized_name,
            path
        );
    }
    for child in tree.children() {
        assert_unique_names(child, &format!("{}.{}", path, child.name));
    }
}

#[test]
fn test_conflicting_names_keep_first_and_warn_once() {
    let resources = conflicting_images(&["My Icon", "my-icon"]);
    let artifacts = run(&resources, &GenerateOptions::default());

    let conflicts: Vec<_> = artifacts
        .warnings
        .iter()
        .filter(|w| w.kind == WarningKind::NameConflict)
        .collect();
    assert_eq!(conflicts.len(), 1);
    assert!(conflicts[0].message.contains("'My Icon'"));
    assert!(conflicts[0].message.contains("'my-icon'"));
    assert_eq!(conflicts[0].path, "R.image");

    assert_eq!(artifacts.primary.matches("func myIcon(").count(), 1);
    assert!(artifacts.primary.contains("UIKit.UIImage(named: \"My Icon\""));
    assert!(!artifacts.primary.contains("named: \"my-icon\""));
}

#[test]
fn test_demoted_member_stays_in_internal_tree() {
    let resources = conflicting_images(&["My Icon", "my-icon"]);
    let artifacts = run(&resources, &GenerateOptions::default());

    let images = artifacts.internal.find(&["image"]).unwrap();
    assert!(images.member("My Icon").is_some());
    assert!(images.member("my-icon").is_some());
}

#[test]
fn test_three_way_conflict_uses_raw_name_order() {
    // Input order must not matter, only raw name byte order
    let forward = conflicting_images(&["my icon", "My-Icon", "My Icon"]);
    let backward = conflicting_images(&["My Icon", "My-Icon", "my icon"]);

    let forward = run(&forward, &GenerateOptions::default());
    let backward = run(&backward, &GenerateOptions::default());

    assert_eq!(forward.primary, backward.primary);
    assert!(forward.primary.contains("named: \"My Icon\""));
    let conflicts = forward
        .warnings
        .iter()
        .filter(|w| w.kind == WarningKind::NameConflict)
        .count();
    assert_eq!(conflicts, 2);
}

#[test]
fn test_external_tree_has_unique_names() {
    let mut records = resgen_test_fixtures::sample_app_records();
    records.push(image("app logo"));
    records.push(image("App-Logo"));
    records.push(image("default"));
    records.push(image("1x"));
    let resources = ResourceSet::new(records).unwrap();

    let validation = validate(&run_builders(&resources));
    assert_unique_names(&validation.external, "R");
    assert!(validation.internal.member_count() > validation.external.member_count());
}

#[test]
fn test_unused_images_report() {
    let resources = ResourceSet::new(vec![
        image("C"),
        image("A"),
        image("B"),
        scene("Main", None, Vec::new(), Vec::new(), &["A"]),
    ])
    .unwrap();
    let options = GenerateOptions {
        unused_images: true,
        ..GenerateOptions::default()
    };
    let artifacts = run(&resources, &options);
    assert!(artifacts
        .primary
        .ends_with("}\n\n/* Potentially Unused Images\nb\nc\n*/\n"));
}

#[test]
fn test_unused_images_report_stays_a_comment() {
    let resources = ResourceSet::new(vec![image("logo*/bad"), image("two\nlines")]).unwrap();
    let options = GenerateOptions {
        unused_images: true,
        ..GenerateOptions::default()
    };
    let artifacts = run(&resources, &options);

    let report = &artifacts.primary[artifacts
        .primary
        .rfind("/* Potentially Unused Images")
        .unwrap()..];
    assert_eq!(report, "/* Potentially Unused Images\nlogoBad\ntwoLines\n*/\n");
}

#[test]
fn test_multi_locale_merge() {
    let matching = ResourceSet::new(vec![
        string("Localizable", "greeting", "Hello %@", Locale::language("en")),
        string("Localizable", "greeting", "Bonjour %@", Locale::language("fr")),
    ])
    .unwrap();
    let artifacts = run(&matching, &GenerateOptions::default());
    assert!(artifacts.warnings.is_empty());
    assert!(artifacts
        .primary
        .contains("static func greeting(_ value1: String) -> String {"));

    let mismatched = ResourceSet::new(vec![
        string("Localizable", "greeting", "Hello %@", Locale::language("en")),
        string("Localizable", "greeting", "Bonjour %@ %@", Locale::language("fr")),
    ])
    .unwrap();
    let artifacts = run(&mismatched, &GenerateOptions::default());
    assert_eq!(artifacts.warnings.len(), 1);
    assert_eq!(artifacts.warnings[0].kind, WarningKind::InconsistentDeclaration);
    assert!(artifacts
        .primary
        .contains("static func greeting(_ value1: String) -> String {"));
    assert!(!artifacts.primary.contains("value2"));
}

#[test]
fn test_parallel_and_sequential_runs_are_identical() {
    let resources = sample_app();
    let sequential = run(&resources, &GenerateOptions::default());
    let parallel = run(
        &resources,
        &GenerateOptions {
            parallel: true,
            ..GenerateOptions::default()
        },
    );
    let again = run(&resources, &GenerateOptions::default());

    assert_eq!(sequential.primary, parallel.primary);
    assert_eq!(sequential.primary, again.primary);
    assert_eq!(sequential.warnings, parallel.warnings);
}

#[test]
fn test_ui_test_artifact_contains_only_accessibility_identifiers() {
    let resources = sample_app();
    let options = GenerateOptions {
        ui_test: true,
        ..GenerateOptions::default()
    };
    let artifacts = run(&resources, &options);
    let ui_test = artifacts.ui_test.expect("ui test artifact requested");

    assert!(ui_test.contains("struct id {"));
    assert!(ui_test.contains("static let loginSubmit: String = \"login.submit\""));
    assert!(!ui_test.contains("struct image {"));
    assert!(!ui_test.contains("import "));

    let without = run(&resources, &GenerateOptions::default());
    assert!(without.ui_test.is_none());
}

#[test]
fn test_empty_record_set_still_generates_root() {
    let resources = ResourceSet::new(Vec::new()).unwrap();
    let artifacts = run(&resources, &GenerateOptions::default());
    assert!(artifacts.warnings.is_empty());
    assert!(artifacts.primary.contains("internal struct R {"));
    assert!(artifacts
        .primary
        .contains("internal static let hostingBundle: Foundation.Bundle = Foundation.Bundle.main"));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn external_tree_names_are_unique(names in prop::collection::vec("[a-zA-Z0-9._-][a-zA-Z0-9 ._-]{0,7}", 1..12)) {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            let tree = validate(&run_builders(&conflicting_images(&names))).external;
            assert_unique_names(&tree, "R");
        }

        #[test]
        fn conflict_warnings_ignore_input_order(names in prop::collection::vec("[a-zA-Z0-9._-][a-zA-Z0-9 ._-]{0,7}", 1..12)) {
            let forward: Vec<&str> = names.iter().map(String::as_str).collect();
            let backward: Vec<&str> = forward.iter().rev().copied().collect();

            let a = run(&conflicting_images(&forward), &GenerateOptions::default());
            let b = run(&conflicting_images(&backward), &GenerateOptions::default());
            prop_assert_eq!(a.warnings, b.warnings);
            prop_assert_eq!(a.primary, b.primary);
        }
    }
}
