//! Namespace validation: resolve naming collisions before emission
//!
//! Validation never fails. It produces two views of the tree:
//!
//! - the **external** tree, where every scope binds each sanitized name
//!   exactly once and every member can be emitted as valid code
//! - the **internal** tree, a full-fidelity copy that still holds every
//!   entry, demoted ones included, for lookup and debugging
//!
//! Within a scope, entries are visited by raw name (byte order), child
//! structs before members when raw names are equal. The first entry to
//! claim a sanitized name keeps it; every later claimant is demoted with a
//! warning naming both raw names. The outcome only depends on the scope's
//! contents, never on the order builders produced them in.

use resgen_core::naming::is_valid_identifier;
use resgen_core::{Lookup, Member, Struct, StructKind, Warning};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

/// Result of validating a namespace tree
#[derive(Debug, Clone)]
pub struct Validation {
    pub external: Struct,
    pub internal: Struct,
    pub warnings: Vec<Warning>,
}

impl Validation {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[derive(Clone, Copy)]
enum Entry<'a> {
    Child(&'a Struct),
    Member(&'a Member),
}

impl<'a> Entry<'a> {
    fn raw_name(self) -> &'a str {
        match self {
            Entry::Child(child) => &child.name.raw_name,
            Entry::Member(member) => &member.identifier.raw_name,
        }
    }

    fn sanitized_name(self) -> &'a str {
        match self {
            Entry::Child(child) => &child.name.sanitized_name,
            Entry::Member(member) => &member.identifier.sanitized_name,
        }
    }

    /// Child structs sort before members with the same raw name
    fn rank(self) -> u8 {
        match self {
            Entry::Child(_) => 0,
            Entry::Member(_) => 1,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Entry::Child(child) => match child.kind {
                StructKind::Root | StructKind::Namespace => "namespace",
                StructKind::AssetFolder => "asset folder",
                StructKind::Storyboard => "storyboard",
                StructKind::SegueSource => "segue source",
                StructKind::Nib => "nib",
                StructKind::StringTable => "string table",
                StructKind::AccessibilityOwner => "accessibility owner",
            },
            Entry::Member(member) => match member.lookup {
                Lookup::Literal(_) => "constant",
                Lookup::HostingBundle | Lookup::Bundle(_) => "bundle",
                Lookup::Image { .. } => "image",
                Lookup::Color { .. } => "color",
                Lookup::Font { .. } => "font",
                Lookup::File { .. } => "file",
                Lookup::LocalizedString { .. } => "string",
                Lookup::InitialViewController { .. } | Lookup::ViewController { .. } => {
                    "view controller"
                }
                Lookup::NibView { .. } => "nib view",
                Lookup::ReuseIdentifier { .. } => "reuse identifier",
                Lookup::SegueIdentifier { .. } => "segue",
            },
        }
    }

    /// Two entries that describe the same declaration
    fn is_same_declaration(self, other: Entry) -> bool {
        match (self, other) {
            (Entry::Member(a), Entry::Member(b)) => {
                a.identifier == b.identifier && a.signature() == b.signature()
            }
            (Entry::Child(a), Entry::Child(b)) => a.name == b.name && a.kind == b.kind,
            _ => false,
        }
    }
}

/// Why a member cannot be emitted, if it cannot
fn structural_problem(member: &Member) -> Option<String> {
    if !is_valid_identifier(&member.identifier.sanitized_name) {
        return Some(format!(
            "'{}' is not a valid identifier",
            member.identifier.sanitized_name
        ));
    }
    let mut seen = BTreeSet::new();
    for parameter in member.parameters() {
        if !is_valid_identifier(&parameter.name) {
            return Some(format!(
                "parameter '{}' is not a valid identifier",
                parameter.name
            ));
        }
        if !seen.insert(parameter.name.as_str()) {
            return Some(format!(
                "parameter '{}' is declared more than once",
                parameter.name
            ));
        }
    }
    None
}

/// Validate a whole tree, producing the external and internal views
#[instrument(skip_all, fields(root = %tree.name))]
pub fn validate(tree: &Struct) -> Validation {
    let mut warnings = Vec::new();
    let external = validate_scope(tree, &tree.name.sanitized_name, &mut warnings);
    debug!(
        kept = external.member_count(),
        total = tree.member_count(),
        warnings = warnings.len(),
        "validated namespace"
    );
    Validation {
        external,
        internal: tree.clone(),
        warnings,
    }
}

fn validate_scope(scope: &Struct, path: &str, warnings: &mut Vec<Warning>) -> Struct {
    let mut entries: Vec<Entry> = scope
        .children()
        .iter()
        .map(Entry::Child)
        .chain(scope.members().iter().map(Entry::Member))
        .collect();
    entries.sort_by(|a, b| (a.raw_name(), a.rank()).cmp(&(b.raw_name(), b.rank())));

    let mut owners: BTreeMap<&str, Entry> = BTreeMap::new();
    let mut validated = scope.emptied();
    for entry in entries {
        if let Entry::Member(member) = entry {
            if let Some(problem) = structural_problem(member) {
                warnings.push(Warning::invalid_member(
                    path,
                    format!(
                        "Skipping {} '{}': {}",
                        entry.describe(),
                        entry.raw_name(),
                        problem
                    ),
                ));
                continue;
            }
        }

        if let Some(owner) = owners.get(entry.sanitized_name()) {
            if !owner.is_same_declaration(entry) {
                warnings.push(Warning::name_conflict(
                    path,
                    entry.describe(),
                    entry.sanitized_name(),
                    owner.raw_name(),
                    entry.raw_name(),
                ));
            }
            continue;
        }
        owners.insert(entry.sanitized_name(), entry);

        validated = match entry {
            Entry::Child(child) => {
                let child_path = format!("{}.{}", path, child.name.sanitized_name);
                validated.with_child(validate_scope(child, &child_path, warnings))
            }
            Entry::Member(member) => validated.with_member(member.clone()),
        };
    }
    validated
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use resgen_core::{sanitize, Identifier, IdentifierCase, TypeReference, WarningKind};

    fn image(raw: &str) -> Member {
        Member::property(
            sanitize(raw, IdentifierCase::Value),
            TypeReference::uikit("UIImage").optional(),
            Lookup::Image {
                name: raw.to_string(),
            },
        )
    }

    fn scope(members: Vec<Member>) -> Struct {
        Struct::new(Identifier::verbatim("image"), StructKind::Namespace).with_members(members)
    }

    #[test]
    fn test_conflict_keeps_lowest_raw_name() {
        let tree = scope(vec![image("my-icon"), image("My Icon")]);
        let validation = validate(&tree);

        assert_eq!(validation.external.members().len(), 1);
        assert_eq!(validation.external.members()[0].raw_name(), "My Icon");
        assert_eq!(validation.warnings.len(), 1);
        assert_eq!(validation.warnings[0].kind, WarningKind::NameConflict);
        assert_eq!(
            validation.warnings[0].message,
            "Skipping image 'my-icon' because 'My Icon' already generates 'myIcon'"
        );
        assert_eq!(validation.internal.members().len(), 2);
    }

    #[test]
    fn test_child_wins_over_member_with_same_raw_name() {
        let folder = Struct::new(sanitize("icons", IdentifierCase::Value), StructKind::AssetFolder)
            .with_member(image("home"));
        let tree = scope(vec![image("icons")]).with_child(folder);
        let validation = validate(&tree);

        assert_eq!(validation.external.children().len(), 1);
        assert!(validation.external.members().is_empty());
        assert!(validation.warnings[0]
            .message
            .starts_with("Skipping image 'icons'"));
    }

    #[test]
    fn test_invalid_member_is_dropped() {
        let mut broken = image("ok");
        broken.identifier = Identifier::verbatim("not valid");
        let tree = scope(vec![broken, image("fine")]);
        let validation = validate(&tree);

        assert_eq!(validation.external.members().len(), 1);
        assert_eq!(validation.warnings[0].kind, WarningKind::InvalidMember);
        assert_eq!(validation.warnings[0].path, "image");
    }

    #[test]
    fn test_nested_paths_in_warnings() {
        let table = Struct::new(sanitize("Localizable", IdentifierCase::Value), StructKind::StringTable)
            .with_member(image("a b"))
            .with_member(image("a-b"));
        let tree = Struct::new(Identifier::verbatim("R"), StructKind::Root).with_child(table);
        let validation = validate(&tree);
        assert_eq!(validation.warnings[0].path, "R.localizable");
    }
}
