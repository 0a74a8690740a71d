//! Members the generated code needs for itself, added after validation

use resgen_core::{BundleSource, Identifier, Lookup, Member, Struct, TypeReference};

pub const HOSTING_BUNDLE: &str = "hostingBundle";

/// Root tree with the `hostingBundle` property every bundle lookup goes through
pub fn inject_internal_properties(tree: &Struct, bundle: &BundleSource) -> Struct {
    let comment = match bundle {
        BundleSource::Main => "Bundle the resources are loaded from: the main bundle".to_string(),
        BundleSource::Identifier(identifier) => {
            format!("Bundle the resources are loaded from: `{}`", identifier)
        }
    };
    tree.clone().with_member(
        Member::property(
            Identifier::verbatim(HOSTING_BUNDLE),
            TypeReference::foundation("Bundle"),
            Lookup::Bundle(bundle.clone()),
        )
        .with_comment(comment),
    )
}
