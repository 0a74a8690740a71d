//! Semantic type references used by generated accessors
//!
//! A [`TypeReference`] records which module a type lives in so the emitter can
//! compute the import list from the types that are actually used.

use crate::record::ClassRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Swift access level of generated declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Public,
    #[default]
    Internal,
    #[serde(rename = "fileprivate")]
    FilePrivate,
    Private,
}

impl AccessLevel {
    pub fn keyword(&self) -> &'static str {
        match self {
            AccessLevel::Public => "public",
            AccessLevel::Internal => "internal",
            AccessLevel::FilePrivate => "fileprivate",
            AccessLevel::Private => "private",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl std::str::FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(AccessLevel::Public),
            "internal" => Ok(AccessLevel::Internal),
            "fileprivate" => Ok(AccessLevel::FilePrivate),
            "private" => Ok(AccessLevel::Private),
            other => Err(format!(
                "unknown access level '{}', expected public, internal, fileprivate or private",
                other
            )),
        }
    }
}

/// Module a referenced type belongs to
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    /// The Swift standard library, never imported
    Stdlib,
    /// The module the generated file is compiled into
    Host,
    Named(String),
}

impl Module {
    pub fn named(name: impl Into<String>) -> Self {
        Module::Named(name.into())
    }

    /// Name to use in an `import` statement, if this module needs one
    pub fn import_name(&self) -> Option<&str> {
        match self {
            Module::Named(name) => Some(name),
            Module::Stdlib | Module::Host => None,
        }
    }
}

pub const UIKIT: &str = "UIKit";
pub const FOUNDATION: &str = "Foundation";
/// Runtime support library providing typed resource wrappers
pub const RSWIFT: &str = "Rswift";

/// A (possibly generic, possibly optional) type used in a generated signature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeReference {
    pub module: Module,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generics: Vec<TypeReference>,
    #[serde(default)]
    pub optional: bool,
}

impl TypeReference {
    pub fn new(module: Module, name: impl Into<String>) -> Self {
        Self {
            module,
            name: name.into(),
            generics: Vec::new(),
            optional: false,
        }
    }

    pub fn stdlib(name: &str) -> Self {
        Self::new(Module::Stdlib, name)
    }

    pub fn uikit(name: &str) -> Self {
        Self::new(Module::named(UIKIT), name)
    }

    pub fn foundation(name: &str) -> Self {
        Self::new(Module::named(FOUNDATION), name)
    }

    pub fn rswift(name: &str, generics: Vec<TypeReference>) -> Self {
        Self {
            generics,
            ..Self::new(Module::named(RSWIFT), name)
        }
    }

    /// Type for a class named in a scene or view hierarchy.
    ///
    /// Classes without a module are assumed to live in the host module.
    pub fn class(class: &ClassRef) -> Self {
        let module = match &class.module {
            Some(module) if module == UIKIT => Module::named(UIKIT),
            Some(module) => Module::named(module.clone()),
            None if class.name.starts_with("UI") => Module::named(UIKIT),
            None => Module::Host,
        };
        Self::new(module, class.name.clone())
    }

    pub fn string() -> Self {
        Self::stdlib("String")
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Collect every module this type (and its generic arguments) refers to
    pub fn collect_modules(&self, modules: &mut BTreeSet<Module>) {
        modules.insert(self.module.clone());
        for generic in &self.generics {
            generic.collect_modules(modules);
        }
    }

    /// Whether the type can cross into Objective-C
    pub fn is_objc_representable(&self) -> bool {
        if !self.generics.is_empty() {
            return false;
        }
        if matches!(&self.module, Module::Named(name) if name == RSWIFT) {
            return false;
        }
        !matches!(
            self.name.as_str(),
            "UnsafePointer<CChar>" | "UnsafeRawPointer" | "UnsafeMutableRawPointer"
        )
    }
}

impl fmt::Display for TypeReference {
    /// Fully qualified Swift spelling, e.g. `UIKit.UIImage?`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.module {
            Module::Named(module) => write!(f, "{}.{}", module, self.name)?,
            Module::Stdlib | Module::Host => write!(f, "{}", self.name)?,
        }
        if !self.generics.is_empty() {
            let generics: Vec<String> = self.generics.iter().map(|g| g.to_string()).collect();
            write!(f, "<{}>", generics.join(", "))?;
        }
        if self.optional {
            write!(f, "?")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_qualifies_named_modules() {
        assert_eq!(TypeReference::uikit("UIImage").optional().to_string(), "UIKit.UIImage?");
        assert_eq!(TypeReference::string().to_string(), "String");
        let reuse = TypeReference::rswift(
            "ReuseIdentifier",
            vec![TypeReference::class(&ClassRef::new("ProfileCell"))],
        );
        assert_eq!(reuse.to_string(), "Rswift.ReuseIdentifier<ProfileCell>");
    }

    #[test]
    fn test_class_module_resolution() {
        assert_eq!(
            TypeReference::class(&ClassRef::new("UITableViewCell")).module,
            Module::named("UIKit")
        );
        assert_eq!(TypeReference::class(&ClassRef::new("ProfileCell")).module, Module::Host);
        let external = ClassRef {
            module: Some("DesignKit".to_string()),
            name: "Badge".to_string(),
        };
        assert_eq!(TypeReference::class(&external).module, Module::named("DesignKit"));
    }

    #[test]
    fn test_collect_modules_walks_generics() {
        let segue = TypeReference::rswift(
            "StoryboardSegueIdentifier",
            vec![
                TypeReference::uikit("UIStoryboardSegue"),
                TypeReference::class(&ClassRef::new("ProfileViewController")),
            ],
        );
        let mut modules = BTreeSet::new();
        segue.collect_modules(&mut modules);
        assert!(modules.contains(&Module::named("Rswift")));
        assert!(modules.contains(&Module::named("UIKit")));
        assert!(modules.contains(&Module::Host));
    }

    #[test]
    fn test_objc_representable() {
        assert!(TypeReference::uikit("UIImage").optional().is_objc_representable());
        assert!(TypeReference::string().is_objc_representable());
        assert!(!TypeReference::rswift("ReuseIdentifier", vec![]).is_objc_representable());
        assert!(!TypeReference::stdlib("UnsafePointer<CChar>").is_objc_representable());
    }

    #[test]
    fn test_access_level_parse() {
        assert_eq!("public".parse::<AccessLevel>().unwrap(), AccessLevel::Public);
        assert!("protected".parse::<AccessLevel>().is_err());
    }
}
