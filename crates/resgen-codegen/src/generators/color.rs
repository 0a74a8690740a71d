//! `R.color`: named colors from asset catalogs

use super::{
    asset_name, declarations, group_by, merge_declarations, plural, top_level,
    trait_collection_parameter, FolderTree, Generator, LeafOutput,
};
use crate::error::CodegenError;
use resgen_core::{
    sanitize, IdentifierCase, Lookup, Member, RecordMetadata, ResourceSet, TypeReference,
};

/// Named colors need `UIColor(named:in:compatibleWith:)`
const AVAILABILITY: &str = "iOS 11.0, tvOS 11.0";

pub(super) fn build(resources: &ResourceSet) -> Result<LeafOutput, CodegenError> {
    let path = Generator::Color.path();
    let mut warnings = Vec::new();

    let colors = declarations(resources, Generator::Color, |metadata| match metadata {
        RecordMetadata::Color { namespace } => Some(namespace.as_slice()),
        _ => None,
    })?;
    let groups = group_by(colors, |color| {
        (color.data.to_vec(), color.record.raw_name.clone())
    });

    let mut folders = FolderTree::default();
    let mut count = 0;
    for ((namespace, raw_name), group) in groups {
        let Some(merged) =
            merge_declarations(&path, "color", group, |_| (), |_| String::new(), &mut warnings)
        else {
            continue;
        };
        let name = asset_name(&namespace, &raw_name);
        let member = Member::function(
            sanitize(&raw_name, IdentifierCase::Value),
            vec![trait_collection_parameter()],
            TypeReference::uikit("UIColor").optional(),
            Lookup::Color { name: name.clone() },
        )
        .with_record(merged.reference().id)
        .with_availability(AVAILABILITY)
        .with_comment(format!("Color `{}`.", name));

        folders.insert(&namespace, member);
        count += 1;
    }

    let subtree = folders.into_struct(top_level(
        Generator::Color,
        count,
        &plural(count, "color", "colors"),
    ));
    Ok(LeafOutput { subtree, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use resgen_core::ResourceRecord;

    #[test]
    fn test_colors_are_gated_on_availability() {
        let resources = ResourceSet::new(vec![ResourceRecord::new(
            "Brand Primary",
            RecordMetadata::Color {
                namespace: Vec::new(),
            },
        )
        .with_source_extension("xcassets")])
        .unwrap();
        let output = build(&resources).unwrap();
        let color = output.subtree.member("Brand Primary").unwrap();
        assert_eq!(color.identifier.sanitized_name, "brandPrimary");
        assert_eq!(color.availability.as_deref(), Some(AVAILABILITY));
        assert_eq!(color.return_type.to_string(), "UIKit.UIColor?");
    }
}
