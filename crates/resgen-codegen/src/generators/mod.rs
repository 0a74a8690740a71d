//! Leaf builders: one namespace subtree per resource category
//!
//! Every builder reads the records of its input kind from a shared
//! [`ResourceSet`] and returns an unvalidated subtree. Builders are
//! independent of each other and only read the set, so they may run in
//! parallel.

mod accessibility;
mod color;
mod file;
mod font;
mod image;
mod nib;
mod reuse_identifier;
mod segue;
mod storyboard;
mod strings;

use crate::error::CodegenError;
use crate::ROOT_NAME;
use rayon::prelude::*;
use resgen_core::{
    sanitize, Identifier, IdentifierCase, Locale, Lookup, Member, Parameter, RecordId,
    RecordMetadata, ResourceKind, ResourceRecord, ResourceSet, Struct, StructKind,
    TypeReference, Warning,
};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, instrument};

/// A resource category with its own top-level struct
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Generator {
    Image,
    Color,
    Font,
    Segue,
    Storyboard,
    Nib,
    ReuseIdentifier,
    File,
    String,
    AccessibilityIdentifier,
}

impl Generator {
    pub const ALL: [Generator; 10] = [
        Generator::Image,
        Generator::Color,
        Generator::Font,
        Generator::Segue,
        Generator::Storyboard,
        Generator::Nib,
        Generator::ReuseIdentifier,
        Generator::File,
        Generator::String,
        Generator::AccessibilityIdentifier,
    ];

    /// Name of the top-level struct, e.g. `image` for `R.image`
    pub fn name(&self) -> &'static str {
        match self {
            Generator::Image => "image",
            Generator::Color => "color",
            Generator::Font => "font",
            Generator::Segue => "segue",
            Generator::Storyboard => "storyboard",
            Generator::Nib => "nib",
            Generator::ReuseIdentifier => "reuseIdentifier",
            Generator::File => "file",
            Generator::String => "string",
            Generator::AccessibilityIdentifier => "id",
        }
    }

    pub fn input_kind(&self) -> ResourceKind {
        match self {
            Generator::Image => ResourceKind::Image,
            Generator::Color => ResourceKind::Color,
            Generator::Font => ResourceKind::Font,
            Generator::Segue | Generator::Storyboard => ResourceKind::Scene,
            Generator::Nib => ResourceKind::ViewHierarchy,
            Generator::ReuseIdentifier => ResourceKind::ReuseIdentifier,
            Generator::File => ResourceKind::MiscFile,
            Generator::String => ResourceKind::StringEntry,
            Generator::AccessibilityIdentifier => ResourceKind::AccessibilityIdentifier,
        }
    }

    /// Dotted path of the top-level struct, e.g. `R.image`
    pub fn path(&self) -> String {
        format!("{}.{}", ROOT_NAME, self.name())
    }

    /// Build the subtree for this category
    #[instrument(skip(resources), level = "debug")]
    pub fn build(&self, resources: &ResourceSet) -> Result<LeafOutput, CodegenError> {
        let output = match self {
            Generator::Image => image::build(resources),
            Generator::Color => color::build(resources),
            Generator::Font => font::build(resources),
            Generator::Segue => segue::build(resources),
            Generator::Storyboard => storyboard::build(resources),
            Generator::Nib => nib::build(resources),
            Generator::ReuseIdentifier => reuse_identifier::build(resources),
            Generator::File => file::build(resources),
            Generator::String => strings::build(resources),
            Generator::AccessibilityIdentifier => accessibility::build(resources),
        }?;
        debug!(
            members = output.subtree.member_count(),
            warnings = output.warnings.len(),
            "built {}",
            self.path()
        );
        Ok(output)
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Subtree produced by one builder, plus what it found along the way
#[derive(Debug, Clone)]
pub struct LeafOutput {
    pub subtree: Struct,
    pub warnings: Vec<Warning>,
}

/// Run several builders over the same records.
///
/// Results come back in the order of `generators` whether or not the
/// builders ran in parallel.
pub fn build_all(
    generators: &[Generator],
    resources: &ResourceSet,
    parallel: bool,
) -> Result<Vec<LeafOutput>, CodegenError> {
    if parallel {
        generators
            .par_iter()
            .map(|generator| generator.build(resources))
            .collect()
    } else {
        generators
            .iter()
            .map(|generator| generator.build(resources))
            .collect()
    }
}

/// A record together with the metadata its builder cares about
pub(crate) struct Declaration<'a, D> {
    pub id: RecordId,
    pub record: &'a ResourceRecord,
    pub data: D,
}

/// Extract typed declarations for a builder from the records of its kind
pub(crate) fn declarations<'a, D>(
    resources: &'a ResourceSet,
    generator: Generator,
    extract: impl Fn(&'a RecordMetadata) -> Option<D>,
) -> Result<Vec<Declaration<'a, D>>, CodegenError> {
    resources
        .of_kind(generator.input_kind())
        .map(|(id, record)| {
            let data = extract(&record.metadata).ok_or_else(|| {
                CodegenError::generation(
                    generator.path(),
                    format!(
                        "record '{}' carries {} metadata",
                        record.raw_name,
                        record.metadata.kind()
                    ),
                )
            })?;
            Ok(Declaration { id, record, data })
        })
        .collect()
}

pub(crate) fn group_by<'a, D, K: Ord>(
    declarations: Vec<Declaration<'a, D>>,
    key: impl Fn(&Declaration<'a, D>) -> K,
) -> BTreeMap<K, Vec<Declaration<'a, D>>> {
    let mut groups: BTreeMap<K, Vec<Declaration<'a, D>>> = BTreeMap::new();
    for declaration in declarations {
        groups.entry(key(&declaration)).or_default().push(declaration);
    }
    groups
}

/// The declarations of one resource that agree with its reference declaration
pub(crate) struct Merged<'a, D> {
    /// Never empty; the reference declaration comes first
    declarations: Vec<Declaration<'a, D>>,
}

impl<'a, D> Merged<'a, D> {
    pub fn reference(&self) -> &Declaration<'a, D> {
        &self.declarations[0]
    }

    pub fn declarations(&self) -> &[Declaration<'a, D>] {
        &self.declarations
    }

    /// Distinct locales of the accepted declarations, reference first
    pub fn locales(&self) -> Vec<Locale> {
        let mut locales: Vec<Locale> = Vec::new();
        for declaration in &self.declarations {
            if !locales.contains(&declaration.record.locale) {
                locales.push(declaration.record.locale.clone());
            }
        }
        locales
    }
}

/// Merge the declarations of one resource across locales.
///
/// Declarations are ordered by locale (unlocalized, then Base, then
/// languages), ties broken by input order; the first one is the reference.
/// A later declaration whose shape differs from the reference is left out
/// and reported as an inconsistent declaration.
pub(crate) fn merge_declarations<'a, D, S: PartialEq>(
    path: &str,
    entry: &str,
    mut declarations: Vec<Declaration<'a, D>>,
    shape: impl Fn(&D) -> S,
    describe: impl Fn(&S) -> String,
    warnings: &mut Vec<Warning>,
) -> Option<Merged<'a, D>> {
    declarations.sort_by(|a, b| {
        a.record
            .locale
            .cmp(&b.record.locale)
            .then(a.id.cmp(&b.id))
    });

    let mut accepted: Vec<Declaration<'a, D>> = Vec::with_capacity(declarations.len());
    for declaration in declarations {
        if let Some(reference) = accepted.first() {
            let expected = shape(&reference.data);
            let actual = shape(&declaration.data);
            if actual != expected {
                warnings.push(Warning::inconsistent(
                    path,
                    format!(
                        "Skipping {} '{}' for locale {}: it has {} while locale {} has {}",
                        entry,
                        declaration.record.raw_name,
                        declaration.record.locale,
                        describe(&actual),
                        reference.record.locale,
                        describe(&expected)
                    ),
                ));
                continue;
            }
        }
        accepted.push(declaration);
    }

    if accepted.is_empty() {
        None
    } else {
        Some(Merged {
            declarations: accepted,
        })
    }
}

/// Members collected under nested folder names
#[derive(Default)]
pub(crate) struct FolderTree {
    members: Vec<Member>,
    folders: BTreeMap<String, FolderTree>,
}

impl FolderTree {
    pub fn insert(&mut self, path: &[String], member: Member) {
        match path.split_first() {
            None => self.members.push(member),
            Some((folder, rest)) => self
                .folders
                .entry(folder.clone())
                .or_default()
                .insert(rest, member),
        }
    }

    /// Fill `container` with the members, one nested struct per folder
    pub fn into_struct(self, container: Struct) -> Struct {
        let children = self.folders.into_iter().map(|(name, folder)| {
            folder.into_struct(Struct::new(
                sanitize(&name, IdentifierCase::Value),
                StructKind::AssetFolder,
            ))
        });
        container.with_members(self.members).with_children(children)
    }
}

/// Name an image is loaded by: namespace folders joined with `/`
pub fn asset_name(namespace: &[String], raw_name: &str) -> String {
    namespace
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(raw_name))
        .collect::<Vec<_>>()
        .join("/")
}

/// The top-level struct of a category
pub(crate) fn top_level(generator: Generator, count: usize, noun: &str) -> Struct {
    Struct::new(Identifier::verbatim(generator.name()), StructKind::Namespace).with_comment(
        format!(
            "This `{}` struct is generated, and contains static references to {} {}.",
            generator.path(),
            count,
            noun
        ),
    )
}

/// Names generated alongside resource accessors in storyboard and nib structs
pub(crate) const NAME_MEMBER: &str = "name";
pub(crate) const BUNDLE_MEMBER: &str = "bundle";

pub(crate) fn name_member(raw_name: &str) -> Member {
    Member::property(
        Identifier::verbatim(NAME_MEMBER),
        TypeReference::string(),
        Lookup::Literal(raw_name.to_string()),
    )
}

pub(crate) fn bundle_member() -> Member {
    Member::property(
        Identifier::verbatim(BUNDLE_MEMBER),
        TypeReference::foundation("Bundle"),
        Lookup::HostingBundle,
    )
}

/// Keep a resource-derived identifier clear of generated member names
pub(crate) fn avoid_reserved(identifier: Identifier, reserved: &[&str]) -> Identifier {
    if reserved.contains(&identifier.bare()) {
        identifier.with_suffix(1)
    } else {
        identifier
    }
}

/// `compatibleWith traitCollection: UIKit.UITraitCollection? = nil`
pub(crate) fn trait_collection_parameter() -> Parameter {
    Parameter::new(
        Some("compatibleWith"),
        "traitCollection",
        TypeReference::uikit("UITraitCollection").optional(),
    )
    .with_default("nil")
}

pub(crate) fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        singular.to_string()
    } else {
        plural.to_string()
    }
}
