//! `R.id`: accessibility identifiers grouped by the storyboard or nib that declares them

use super::{declarations, group_by, merge_declarations, plural, top_level, Generator, LeafOutput};
use crate::error::CodegenError;
use resgen_core::{
    sanitize, IdentifierCase, Lookup, Member, RecordMetadata, ResourceSet, Struct, StructKind,
    TypeReference,
};
use std::collections::BTreeMap;

pub(super) fn build(resources: &ResourceSet) -> Result<LeafOutput, CodegenError> {
    let path = Generator::AccessibilityIdentifier.path();
    let mut warnings = Vec::new();

    let identifiers = declarations(resources, Generator::AccessibilityIdentifier, |metadata| {
        match metadata {
            RecordMetadata::AccessibilityIdentifier { owner } => Some(owner.as_str()),
            _ => None,
        }
    })?;
    let groups = group_by(identifiers, |identifier| {
        (identifier.data.to_string(), identifier.record.raw_name.clone())
    });

    let mut owners: BTreeMap<String, Vec<Member>> = BTreeMap::new();
    for ((owner, raw_name), group) in groups {
        let Some(merged) = merge_declarations(
            &path,
            "accessibility identifier",
            group,
            |_| (),
            |_| String::new(),
            &mut warnings,
        ) else {
            continue;
        };
        owners.entry(owner).or_default().push(
            Member::property(
                sanitize(&raw_name, IdentifierCase::Value),
                TypeReference::string(),
                Lookup::Literal(raw_name.clone()),
            )
            .with_record(merged.reference().id)
            .with_comment(format!("Accessibility identifier `{}`.", raw_name)),
        );
    }

    let count = owners.values().map(Vec::len).sum();
    let children = owners.into_iter().map(|(owner, members)| {
        Struct::new(
            sanitize(&owner, IdentifierCase::Value),
            StructKind::AccessibilityOwner,
        )
        .with_members(members)
    });
    let subtree = top_level(
        Generator::AccessibilityIdentifier,
        count,
        &plural(count, "accessibility identifier", "accessibility identifiers"),
    )
    .with_children(children);
    Ok(LeafOutput { subtree, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use resgen_core::ResourceRecord;

    fn identifier(owner: &str, name: &str) -> ResourceRecord {
        ResourceRecord::new(
            name,
            RecordMetadata::AccessibilityIdentifier {
                owner: owner.to_string(),
            },
        )
    }

    #[test]
    fn test_identifiers_grouped_by_owner() {
        let resources = ResourceSet::new(vec![
            identifier("Login", "login.submit"),
            identifier("Login", "login.password"),
            identifier("ProfileHeader", "profile.avatar"),
        ])
        .unwrap();
        let output = build(&resources).unwrap();
        let login = output.subtree.find(&["Login"]).unwrap();
        assert_eq!(login.name.sanitized_name, "login");
        assert_eq!(login.members().len(), 2);
        let submit = login.member("login.submit").unwrap();
        assert_eq!(submit.identifier.sanitized_name, "loginSubmit");
        assert_eq!(submit.lookup, Lookup::Literal("login.submit".to_string()));
        assert_eq!(output.subtree.member_count(), 3);
    }
}
