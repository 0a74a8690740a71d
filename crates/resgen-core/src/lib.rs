//! Core data model for resgen: resource records, identifiers and the namespace tree

pub mod error;
pub mod format_specifier;
pub mod naming;
pub mod record;
pub mod tree;
pub mod types;
pub mod warning;

pub use error::CoreError;
pub use naming::{sanitize, Identifier, IdentifierCase};
pub use record::{Locale, RecordId, RecordMetadata, ResourceKind, ResourceRecord, ResourceSet};
pub use tree::{BundleSource, Lookup, Member, MemberKind, Parameter, Struct, StructKind};
pub use types::{AccessLevel, Module, TypeReference};
pub use warning::{Warning, WarningKind};
