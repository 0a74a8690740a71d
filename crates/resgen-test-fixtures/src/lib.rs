//! Test fixtures for resgen
//!
//! Record constructors plus a few representative record sets. Sets can be
//! handed to the pipeline directly or written out as a JSON manifest the way
//! the CLI reads them.

use resgen_core::format_specifier::{StringParam, StringParamKind};
use resgen_core::record::{ClassRef, Segue, ViewController};
use resgen_core::{Locale, RecordMetadata, ResourceRecord, ResourceSet};
use serde_json::json;
use std::fs;
use std::path::PathBuf;

pub fn image(name: &str) -> ResourceRecord {
    namespaced_image(&[], name)
}

pub fn namespaced_image(namespace: &[&str], name: &str) -> ResourceRecord {
    ResourceRecord::new(
        name,
        RecordMetadata::Image {
            namespace: namespace.iter().map(|s| s.to_string()).collect(),
            on_demand_tags: Vec::new(),
        },
    )
    .with_source_extension("xcassets")
}

pub fn color(name: &str) -> ResourceRecord {
    ResourceRecord::new(
        name,
        RecordMetadata::Color {
            namespace: Vec::new(),
        },
    )
    .with_source_extension("xcassets")
}

pub fn font(name: &str, family: &str) -> ResourceRecord {
    ResourceRecord::new(
        name,
        RecordMetadata::Font {
            postscript_name: name.to_string(),
            family: Some(family.to_string()),
        },
    )
    .with_source_extension("ttf")
}

pub fn string(table: &str, key: &str, value: &str, locale: Locale) -> ResourceRecord {
    ResourceRecord::new(
        key,
        RecordMetadata::StringEntry {
            table: table.to_string(),
            value: Some(value.to_string()),
            params: None,
        },
    )
    .with_locale(locale)
    .with_source_extension("strings")
}

pub fn plural_string(table: &str, key: &str, params: &[StringParamKind]) -> ResourceRecord {
    ResourceRecord::new(
        key,
        RecordMetadata::StringEntry {
            table: table.to_string(),
            value: None,
            params: Some(params.iter().map(|kind| StringParam::new(*kind)).collect()),
        },
    )
    .with_source_extension("stringsdict")
}

pub fn view_controller(identifier: Option<&str>, class: &str) -> ViewController {
    ViewController {
        storyboard_identifier: identifier.map(str::to_string),
        class: ClassRef::new(class),
    }
}

pub fn segue(identifier: &str, source: &str, destination: &str) -> Segue {
    Segue {
        identifier: identifier.to_string(),
        source: ClassRef::new(source),
        destination: ClassRef::new(destination),
        segue_class: None,
    }
}

pub fn scene(
    name: &str,
    initial: Option<&str>,
    view_controllers: Vec<ViewController>,
    segues: Vec<Segue>,
    used_images: &[&str],
) -> ResourceRecord {
    ResourceRecord::new(
        name,
        RecordMetadata::Scene {
            initial_view_controller: initial.map(ClassRef::new),
            view_controllers,
            segues,
            used_images: used_images.iter().map(|s| s.to_string()).collect(),
            used_colors: Vec::new(),
        },
    )
    .with_source_extension("storyboard")
}

pub fn nib(name: &str, root_views: &[&str], used_images: &[&str]) -> ResourceRecord {
    ResourceRecord::new(
        name,
        RecordMetadata::ViewHierarchy {
            root_views: root_views.iter().map(|class| ClassRef::new(class)).collect(),
            used_images: used_images.iter().map(|s| s.to_string()).collect(),
            used_colors: Vec::new(),
        },
    )
    .with_source_extension("xib")
}

pub fn reuse_identifier(name: &str, class: &str) -> ResourceRecord {
    ResourceRecord::new(
        name,
        RecordMetadata::ReuseIdentifier {
            class: ClassRef::new(class),
        },
    )
    .with_source_extension("xib")
}

pub fn accessibility_identifier(owner: &str, name: &str) -> ResourceRecord {
    ResourceRecord::new(
        name,
        RecordMetadata::AccessibilityIdentifier {
            owner: owner.to_string(),
        },
    )
    .with_source_extension("storyboard")
}

pub fn file(name: &str) -> ResourceRecord {
    ResourceRecord::new(name, RecordMetadata::MiscFile { extension: None })
}

/// Records of a small but complete app: every category, two languages
pub fn sample_app_records() -> Vec<ResourceRecord> {
    vec![
        image("app-logo"),
        image("avatar-placeholder"),
        image("onboarding_background"),
        namespaced_image(&["Tab Bar"], "home"),
        color("Brand Primary"),
        font("Inter-Regular", "Inter"),
        string("Localizable", "welcome.title", "Welcome", Locale::language("en")),
        string("Localizable", "welcome.title", "Bienvenue", Locale::language("fr")),
        string("Localizable", "inbox.count", "%@ has %d new messages", Locale::language("en")),
        string("Localizable", "inbox.count", "%@ a %d nouveaux messages", Locale::language("fr")),
        plural_string("Plurals", "items", &[StringParamKind::Int]),
        scene(
            "Main",
            Some("UINavigationController"),
            vec![
                view_controller(Some("Profile"), "ProfileViewController"),
                view_controller(None, "SettingsViewController"),
            ],
            vec![segue("showProfile", "HomeViewController", "ProfileViewController")],
            &["app-logo"],
        ),
        nib("ProfileHeader", &["ProfileHeaderView"], &["avatar-placeholder"]),
        reuse_identifier("ProfileCell", "ProfileTableViewCell"),
        accessibility_identifier("Main", "login.submit"),
        accessibility_identifier("ProfileHeader", "profile.avatar"),
        file("seed-data.json"),
    ]
}

pub fn sample_app() -> ResourceSet {
    ResourceSet::new(sample_app_records()).expect("sample records are well formed")
}

/// Images whose names all sanitize to the same identifier
pub fn conflicting_images(names: &[&str]) -> ResourceSet {
    ResourceSet::new(names.iter().map(|name| image(name)).collect())
        .expect("image records are well formed")
}

/// Fixture categories that can be written to disk
pub enum FixtureType {
    SampleApp,
    Empty,
    MalformedRecord,
}

/// Writes fixture manifests into a temporary directory that lives as long
/// as the fixture provider
pub struct TestFixtures {
    temp_dir: Option<tempfile::TempDir>,
}

impl Default for TestFixtures {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixtures {
    pub fn new() -> Self {
        Self { temp_dir: None }
    }

    /// Write a manifest for `fixture_type` and return its path
    pub fn setup(&mut self, fixture_type: FixtureType) -> PathBuf {
        let dir = tempfile::tempdir().expect("create fixture directory");
        let manifest = dir.path().join("records.json");

        let contents = match fixture_type {
            FixtureType::SampleApp => json!({ "records": sample_app_records() }),
            FixtureType::Empty => json!({ "records": [] }),
            FixtureType::MalformedRecord => json!({
                "records": [{
                    "kind": "font",
                    "raw_name": "Inter",
                    "source_extension": "woff",
                    "metadata": { "font": { "postscript_name": "Inter-Regular" } }
                }]
            }),
        };
        fs::write(
            &manifest,
            serde_json::to_string_pretty(&contents).expect("serialize fixture"),
        )
        .expect("write fixture manifest");

        self.temp_dir = Some(dir);
        manifest
    }

    /// Directory of the most recent fixture
    pub fn dir(&self) -> Option<PathBuf> {
        self.temp_dir.as_ref().map(|dir| dir.path().to_path_buf())
    }
}
