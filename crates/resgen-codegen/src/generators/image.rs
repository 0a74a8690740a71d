//! `R.image`: one accessor per image, namespaced asset folders nest

use super::{
    asset_name, declarations, group_by, merge_declarations, plural, top_level,
    trait_collection_parameter, FolderTree, Generator, LeafOutput,
};
use crate::error::CodegenError;
use resgen_core::{
    sanitize, IdentifierCase, Lookup, Member, RecordMetadata, ResourceSet, TypeReference,
};

struct Image<'a> {
    namespace: &'a [String],
    on_demand_tags: &'a [String],
}

pub(super) fn build(resources: &ResourceSet) -> Result<LeafOutput, CodegenError> {
    let path = Generator::Image.path();
    let mut warnings = Vec::new();

    let images = declarations(resources, Generator::Image, |metadata| match metadata {
        RecordMetadata::Image {
            namespace,
            on_demand_tags,
        } => Some(Image {
            namespace,
            on_demand_tags,
        }),
        _ => None,
    })?;
    let groups = group_by(images, |image| {
        (image.data.namespace.to_vec(), image.record.raw_name.clone())
    });

    let mut folders = FolderTree::default();
    let mut count = 0;
    for ((namespace, raw_name), group) in groups {
        let Some(merged) = merge_declarations(
            &path,
            "image",
            group,
            |image| image.on_demand_tags.to_vec(),
            |tags| format!("on-demand tags [{}]", tags.join(", ")),
            &mut warnings,
        ) else {
            continue;
        };
        let reference = merged.reference();
        let name = asset_name(&namespace, &raw_name);

        let mut member = Member::function(
            sanitize(&raw_name, IdentifierCase::Value),
            vec![trait_collection_parameter()],
            TypeReference::uikit("UIImage").optional(),
            Lookup::Image { name: name.clone() },
        )
        .with_record(reference.id)
        .with_comment(format!("Image `{}`.", name));
        if !reference.data.on_demand_tags.is_empty() {
            member = member.with_comment(format!(
                "On-demand resource tags: {}",
                reference.data.on_demand_tags.join(", ")
            ));
        }

        folders.insert(&namespace, member);
        count += 1;
    }

    let subtree = folders.into_struct(top_level(
        Generator::Image,
        count,
        &plural(count, "image", "images"),
    ));
    Ok(LeafOutput { subtree, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use resgen_core::{ResourceRecord, WarningKind};

    fn image(name: &str, namespace: &[&str]) -> ResourceRecord {
        ResourceRecord::new(
            name,
            RecordMetadata::Image {
                namespace: namespace.iter().map(|s| s.to_string()).collect(),
                on_demand_tags: Vec::new(),
            },
        )
    }

    #[test]
    fn test_images_become_functions() {
        let resources = ResourceSet::new(vec![image("app-logo", &[]), image("home", &["Tabs"])]).unwrap();
        let output = build(&resources).unwrap();
        assert!(output.warnings.is_empty());

        let logo = output.subtree.member("app-logo").unwrap();
        assert_eq!(logo.identifier.sanitized_name, "appLogo");
        assert_eq!(logo.return_type.to_string(), "UIKit.UIImage?");

        let home = output.subtree.find(&["Tabs"]).unwrap().member("home").unwrap();
        assert_eq!(
            home.lookup,
            Lookup::Image {
                name: "Tabs/home".to_string()
            }
        );
    }

    #[test]
    fn test_same_image_in_two_catalogs_is_one_member() {
        let resources = ResourceSet::new(vec![image("logo", &[]), image("logo", &[])]).unwrap();
        let output = build(&resources).unwrap();
        assert_eq!(output.subtree.members().len(), 1);
        assert!(!output
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::InconsistentDeclaration));
    }
}
