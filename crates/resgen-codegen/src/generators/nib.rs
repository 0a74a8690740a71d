//! `R.nib`: one struct per nib with typed accessors for its root views

use super::{
    bundle_member, declarations, group_by, merge_declarations, name_member, plural, top_level,
    Generator, LeafOutput,
};
use crate::error::CodegenError;
use resgen_core::record::ClassRef;
use resgen_core::{
    sanitize, Identifier, IdentifierCase, Lookup, Member, Parameter, RecordMetadata,
    ResourceSet, Struct, StructKind, TypeReference,
};

const ORDINALS: [&str; 10] = [
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth", "tenth",
];

/// `firstView`, `secondView`, ... then `view11` past the tenth
fn view_accessor_name(index: usize) -> String {
    match ORDINALS.get(index) {
        Some(ordinal) => format!("{}View", ordinal),
        None => format!("view{}", index + 1),
    }
}

/// `owner ownerOrNil: AnyObject?, options optionsOrNil: [UINib.OptionsKey : Any]? = nil`
fn view_parameters() -> Vec<Parameter> {
    vec![
        Parameter::new(
            Some("owner"),
            "ownerOrNil",
            TypeReference::stdlib("AnyObject").optional(),
        ),
        Parameter::new(
            Some("options"),
            "optionsOrNil",
            TypeReference::stdlib("[UIKit.UINib.OptionsKey : Any]").optional(),
        )
        .with_default("nil"),
    ]
}

pub(super) fn build(resources: &ResourceSet) -> Result<LeafOutput, CodegenError> {
    let path = Generator::Nib.path();
    let mut warnings = Vec::new();

    let nibs = declarations(resources, Generator::Nib, |metadata| match metadata {
        RecordMetadata::ViewHierarchy { root_views, .. } => Some(root_views.as_slice()),
        _ => None,
    })?;
    let groups = group_by(nibs, |nib| nib.record.raw_name.clone());

    let mut children = Vec::new();
    for (raw_name, group) in groups {
        let Some(merged) = merge_declarations(
            &path,
            "nib",
            group,
            |root_views| root_views.to_vec(),
            |root_views: &Vec<ClassRef>| {
                let names: Vec<&str> = root_views.iter().map(|c| c.name.as_str()).collect();
                format!("root views [{}]", names.join(", "))
            },
            &mut warnings,
        ) else {
            continue;
        };
        let reference = merged.reference();

        let mut members = vec![name_member(&raw_name), bundle_member()];
        for (index, class) in reference.data.iter().enumerate() {
            members.push(
                Member::function(
                    Identifier::verbatim(&view_accessor_name(index)),
                    view_parameters(),
                    TypeReference::class(class).optional(),
                    Lookup::NibView {
                        nib: raw_name.clone(),
                        index,
                    },
                )
                .with_record(reference.id),
            );
        }

        children.push(
            Struct::new(sanitize(&raw_name, IdentifierCase::Value), StructKind::Nib)
                .with_comment(format!("Nib `{}`.", raw_name))
                .with_members(members),
        );
    }

    let count = children.len();
    let subtree = top_level(Generator::Nib, count, &plural(count, "nib", "nibs"))
        .with_children(children);
    Ok(LeafOutput { subtree, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use resgen_core::ResourceRecord;

    #[test]
    fn test_view_accessor_names() {
        assert_eq!(view_accessor_name(0), "firstView");
        assert_eq!(view_accessor_name(9), "tenthView");
        assert_eq!(view_accessor_name(10), "view11");
    }

    #[test]
    fn test_nib_root_views() {
        let resources = ResourceSet::new(vec![ResourceRecord::new(
            "ProfileHeader",
            RecordMetadata::ViewHierarchy {
                root_views: vec![ClassRef::new("ProfileHeaderView"), ClassRef::new("UIView")],
                used_images: vec!["avatar-placeholder".to_string()],
                used_colors: Vec::new(),
            },
        )
        .with_source_extension("xib")])
        .unwrap();
        let output = build(&resources).unwrap();
        let nib = output.subtree.find(&["ProfileHeader"]).unwrap();
        assert_eq!(nib.name.sanitized_name, "profileHeader");
        assert_eq!(nib.kind, StructKind::Nib);

        let second = nib.member("secondView").unwrap();
        assert_eq!(second.return_type.to_string(), "UIKit.UIView?");
        assert_eq!(
            second.lookup,
            Lookup::NibView {
                nib: "ProfileHeader".to_string(),
                index: 1
            }
        );
        assert_eq!(second.parameters()[0].label.as_deref(), Some("owner"));
        assert_eq!(second.parameters()[1].default_value.as_deref(), Some("nil"));
    }
}
