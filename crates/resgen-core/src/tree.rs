//! The namespace tree: nested named containers holding typed accessors
//!
//! A [`Struct`] becomes a nested `struct` in the generated Swift, a [`Member`]
//! becomes a `static let` or `static func` inside it. Trees are built
//! bottom-up by consuming `with_*` methods and are never mutated once a stage
//! hands them on; every pipeline stage produces a fresh tree.
//!
//! Children and members are kept ordered by raw name. Before validation a
//! scope may still contain entries whose sanitized names collide; after
//! validation the external tree never does.

use crate::naming::{Identifier, UsedIdentifiers};
use crate::record::{Locale, RecordId};
use crate::types::{Module, TypeReference, FOUNDATION, RSWIFT, UIKIT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Selects the emission rules for a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructKind {
    Root,
    Namespace,
    AssetFolder,
    Storyboard,
    SegueSource,
    Nib,
    StringTable,
    AccessibilityOwner,
}

/// Where the generated code finds its resource bundle at runtime
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleSource {
    /// `Bundle.main`
    #[default]
    Main,
    /// Look the bundle up by identifier, falling back to the main bundle
    Identifier(String),
}

/// A function parameter of a generated accessor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    /// External label; `None` renders as `_`
    pub label: Option<String>,
    pub name: String,
    pub ty: TypeReference,
    #[serde(default)]
    pub default_value: Option<String>,
}

impl Parameter {
    pub fn new(label: Option<&str>, name: &str, ty: TypeReference) -> Self {
        Self {
            label: label.map(str::to_string),
            name: name.to_string(),
            ty,
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Property,
    Function { parameters: Vec<Parameter> },
}

/// The runtime lookup an accessor performs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lookup {
    /// A string constant
    Literal(String),
    /// The bundle the generated code was configured with
    HostingBundle,
    /// Resolve the hosting bundle itself
    Bundle(BundleSource),
    Image { name: String },
    Color { name: String },
    Font { postscript_name: String },
    File { name: String, extension: Option<String> },
    LocalizedString {
        table: String,
        key: String,
        locales: Vec<Locale>,
    },
    InitialViewController { storyboard: String },
    ViewController { storyboard: String, identifier: String },
    NibView { nib: String, index: usize },
    ReuseIdentifier { identifier: String },
    SegueIdentifier { identifier: String },
}

impl Lookup {
    /// Modules the generated body refers to, beyond the member's signature
    pub fn collect_modules(&self, modules: &mut BTreeSet<Module>) {
        let module = match self {
            Lookup::Literal(_) | Lookup::HostingBundle => return,
            Lookup::Bundle(_) | Lookup::File { .. } | Lookup::LocalizedString { .. } => FOUNDATION,
            Lookup::Image { .. }
            | Lookup::Color { .. }
            | Lookup::Font { .. }
            | Lookup::InitialViewController { .. }
            | Lookup::ViewController { .. }
            | Lookup::NibView { .. } => UIKIT,
            Lookup::ReuseIdentifier { .. } | Lookup::SegueIdentifier { .. } => RSWIFT,
        };
        modules.insert(Module::named(module));
    }
}

/// What makes two members with the same name different declarations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberSignature {
    pub is_function: bool,
    pub labels: Vec<String>,
    pub return_type: TypeReference,
}

/// A typed accessor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    pub identifier: Identifier,
    pub kind: MemberKind,
    pub return_type: TypeReference,
    pub lookup: Lookup,
    /// Record this accessor was generated from, if any
    #[serde(default)]
    pub record: Option<RecordId>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub comment: Vec<String>,
}

impl Member {
    pub fn property(identifier: Identifier, return_type: TypeReference, lookup: Lookup) -> Self {
        Self {
            identifier,
            kind: MemberKind::Property,
            return_type,
            lookup,
            record: None,
            availability: None,
            comment: Vec::new(),
        }
    }

    pub fn function(
        identifier: Identifier,
        parameters: Vec<Parameter>,
        return_type: TypeReference,
        lookup: Lookup,
    ) -> Self {
        Self {
            kind: MemberKind::Function { parameters },
            ..Self::property(identifier, return_type, lookup)
        }
    }

    pub fn with_record(mut self, record: RecordId) -> Self {
        self.record = Some(record);
        self
    }

    pub fn with_availability(mut self, availability: &str) -> Self {
        self.availability = Some(availability.to_string());
        self
    }

    pub fn with_comment(mut self, line: impl Into<String>) -> Self {
        self.comment.push(line.into());
        self
    }

    pub fn raw_name(&self) -> &str {
        &self.identifier.raw_name
    }

    pub fn parameters(&self) -> &[Parameter] {
        match &self.kind {
            MemberKind::Property => &[],
            MemberKind::Function { parameters } => parameters,
        }
    }

    pub fn signature(&self) -> MemberSignature {
        MemberSignature {
            is_function: matches!(self.kind, MemberKind::Function { .. }),
            labels: self
                .parameters()
                .iter()
                .map(|p| p.label.clone().unwrap_or_else(|| "_".to_string()))
                .collect(),
            return_type: self.return_type.clone(),
        }
    }

    /// Every module this member mentions in its signature or body
    pub fn collect_modules(&self, modules: &mut BTreeSet<Module>) {
        self.lookup.collect_modules(modules);
        self.return_type.collect_modules(modules);
        for parameter in self.parameters() {
            parameter.ty.collect_modules(modules);
        }
    }
}

/// A named container
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Struct {
    pub name: Identifier,
    pub kind: StructKind,
    #[serde(default)]
    pub comment: Vec<String>,
    children: Vec<Struct>,
    members: Vec<Member>,
}

impl Struct {
    pub fn new(name: Identifier, kind: StructKind) -> Self {
        Self {
            name,
            kind,
            comment: Vec::new(),
            children: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn with_comment(mut self, line: impl Into<String>) -> Self {
        self.comment.push(line.into());
        self
    }

    pub fn with_child(mut self, child: Struct) -> Self {
        let position = self
            .children
            .partition_point(|c| c.name.raw_name <= child.name.raw_name);
        self.children.insert(position, child);
        self
    }

    pub fn with_member(mut self, member: Member) -> Self {
        let position = self
            .members
            .partition_point(|m| m.identifier.raw_name <= member.identifier.raw_name);
        self.members.insert(position, member);
        self
    }

    pub fn with_children(self, children: impl IntoIterator<Item = Struct>) -> Self {
        children.into_iter().fold(self, Struct::with_child)
    }

    pub fn with_members(self, members: impl IntoIterator<Item = Member>) -> Self {
        members.into_iter().fold(self, Struct::with_member)
    }

    /// Same container, without children or members
    pub fn emptied(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            comment: self.comment.clone(),
            children: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn children(&self) -> &[Struct] {
        &self.children
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.members.is_empty()
    }

    pub fn child(&self, raw_name: &str) -> Option<&Struct> {
        self.children.iter().find(|c| c.name.raw_name == raw_name)
    }

    pub fn member(&self, raw_name: &str) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| m.identifier.raw_name == raw_name)
    }

    /// Walk down by raw names
    pub fn find(&self, path: &[&str]) -> Option<&Struct> {
        path.iter()
            .try_fold(self, |current, segment| current.child(segment))
    }

    /// Sanitized name to raw name for every direct entry, first entry wins
    pub fn used_identifiers(&self) -> UsedIdentifiers {
        let mut used = UsedIdentifiers::new();
        let names = self
            .children
            .iter()
            .map(|c| &c.name)
            .chain(self.members.iter().map(|m| &m.identifier));
        for name in names {
            used.entry(name.sanitized_name.clone())
                .or_insert_with(|| name.raw_name.clone());
        }
        used
    }

    /// Children in emission order
    pub fn sorted_children(&self) -> Vec<&Struct> {
        let mut children: Vec<&Struct> = self.children.iter().collect();
        children.sort_by(|a, b| emission_key(&a.name).cmp(&emission_key(&b.name)));
        children
    }

    /// Members in emission order
    pub fn sorted_members(&self) -> Vec<&Member> {
        let mut members: Vec<&Member> = self.members.iter().collect();
        members.sort_by(|a, b| emission_key(&a.identifier).cmp(&emission_key(&b.identifier)));
        members
    }

    /// Total number of members in this subtree
    pub fn member_count(&self) -> usize {
        self.members.len() + self.children.iter().map(Struct::member_count).sum::<usize>()
    }

    pub fn collect_modules(&self, modules: &mut BTreeSet<Module>) {
        for member in &self.members {
            member.collect_modules(modules);
        }
        for child in &self.children {
            child.collect_modules(modules);
        }
    }
}

fn emission_key(identifier: &Identifier) -> (&str, &str) {
    (identifier.bare(), identifier.raw_name.as_str())
}
