//! `R.reuseIdentifier`: typed cell and view reuse identifiers

use super::{declarations, group_by, merge_declarations, plural, top_level, Generator, LeafOutput};
use crate::error::CodegenError;
use resgen_core::{
    sanitize, IdentifierCase, Lookup, Member, RecordMetadata, ResourceSet, TypeReference,
};

pub(super) fn build(resources: &ResourceSet) -> Result<LeafOutput, CodegenError> {
    let path = Generator::ReuseIdentifier.path();
    let mut warnings = Vec::new();

    let identifiers = declarations(resources, Generator::ReuseIdentifier, |metadata| {
        match metadata {
            RecordMetadata::ReuseIdentifier { class } => Some(class),
            _ => None,
        }
    })?;
    let groups = group_by(identifiers, |identifier| identifier.record.raw_name.clone());

    let mut members = Vec::new();
    for (raw_name, group) in groups {
        let Some(merged) = merge_declarations(
            &path,
            "reuse identifier",
            group,
            |class| (*class).clone(),
            |class| format!("class {}", class.name),
            &mut warnings,
        ) else {
            continue;
        };
        let reference = merged.reference();

        members.push(
            Member::property(
                sanitize(&raw_name, IdentifierCase::Value),
                TypeReference::rswift(
                    "ReuseIdentifier",
                    vec![TypeReference::class(reference.data)],
                ),
                Lookup::ReuseIdentifier {
                    identifier: raw_name.clone(),
                },
            )
            .with_record(reference.id)
            .with_comment(format!("Reuse identifier `{}`.", raw_name)),
        );
    }

    let count = members.len();
    let subtree = top_level(
        Generator::ReuseIdentifier,
        count,
        &plural(count, "reuse identifier", "reuse identifiers"),
    )
    .with_members(members);
    Ok(LeafOutput { subtree, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use resgen_core::record::ClassRef;
    use resgen_core::ResourceRecord;

    #[test]
    fn test_reuse_identifier_is_generic_over_cell_class() {
        let resources = ResourceSet::new(vec![ResourceRecord::new(
            "ProfileCell",
            RecordMetadata::ReuseIdentifier {
                class: ClassRef::new("ProfileTableViewCell"),
            },
        )
        .with_source_extension("storyboard")])
        .unwrap();
        let output = build(&resources).unwrap();
        let member = output.subtree.member("ProfileCell").unwrap();
        assert_eq!(member.identifier.sanitized_name, "profileCell");
        assert_eq!(
            member.return_type.to_string(),
            "Rswift.ReuseIdentifier<ProfileTableViewCell>"
        );
        assert!(!member.return_type.is_objc_representable());
    }
}
