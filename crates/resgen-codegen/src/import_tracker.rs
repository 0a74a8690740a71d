//! Import list for a generated file
//!
//! Imports are derived from the modules the emitted tree actually refers to,
//! plus any the caller asks for explicitly. The standard library, the host
//! module and the product module itself are never imported.

use resgen_core::{Module, Struct};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct ImportTracker {
    modules: BTreeSet<String>,
    excluded: BTreeSet<String>,
}

impl ImportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never import `module`, typically the product module being compiled
    pub fn excluding(mut self, module: &str) -> Self {
        self.excluded.insert(module.to_string());
        self
    }

    pub fn add_module(&mut self, module: &str) {
        let module = module.trim();
        if !module.is_empty() {
            self.modules.insert(module.to_string());
        }
    }

    /// Record every module referenced by members of `tree`
    pub fn add_tree(&mut self, tree: &Struct) {
        let mut modules = BTreeSet::new();
        tree.collect_modules(&mut modules);
        for module in modules.iter().filter_map(Module::import_name) {
            self.add_module(module);
        }
    }

    /// Sorted, deduplicated modules to import
    pub fn modules(&self) -> Vec<&str> {
        self.modules
            .iter()
            .filter(|module| !self.excluded.contains(*module))
            .map(String::as_str)
            .collect()
    }

    pub fn generate_import_statements(&self) -> String {
        self.modules()
            .into_iter()
            .map(|module| format!("import {}\n", module))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resgen_core::{Identifier, Lookup, Member, StructKind, TypeReference};

    #[test]
    fn test_imports_from_tree_and_extras() {
        let tree = Struct::new(Identifier::verbatim("file"), StructKind::Namespace).with_member(
            Member::function(
                Identifier::verbatim("dataJson"),
                Vec::new(),
                TypeReference::new(Module::named("App"), "Payload").optional(),
                Lookup::File {
                    name: "data".to_string(),
                    extension: Some("json".to_string()),
                },
            ),
        );
        let mut tracker = ImportTracker::new().excluding("App");
        tracker.add_tree(&tree);
        tracker.add_module("SnapshotTesting");
        tracker.add_module("Foundation");

        assert_eq!(tracker.modules(), vec!["Foundation", "SnapshotTesting"]);
        assert_eq!(
            tracker.generate_import_statements(),
            "import Foundation\nimport SnapshotTesting\n"
        );
    }
}
