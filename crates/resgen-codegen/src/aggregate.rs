//! Combine the per-category subtrees under the root struct

use crate::generators::LeafOutput;
use crate::ROOT_NAME;
use resgen_core::{Identifier, Struct, StructKind, Warning};
use tracing::debug;

/// Root struct with each subtree as a direct child, in the given order
pub fn aggregate(subtrees: impl IntoIterator<Item = Struct>) -> Struct {
    Struct::new(Identifier::verbatim(ROOT_NAME), StructKind::Root)
        .with_comment(format!(
            "This `{}` struct is generated and contains references to static resources.",
            ROOT_NAME
        ))
        .with_children(subtrees)
}

/// Aggregate builder outputs, collecting their warnings in builder order
pub fn aggregate_outputs(outputs: Vec<LeafOutput>) -> (Struct, Vec<Warning>) {
    let mut warnings = Vec::new();
    let mut subtrees = Vec::with_capacity(outputs.len());
    for output in outputs {
        warnings.extend(output.warnings);
        subtrees.push(output.subtree);
    }
    let root = aggregate(subtrees);
    debug!(
        children = root.children().len(),
        members = root.member_count(),
        "aggregated namespace"
    );
    (root, warnings)
}
