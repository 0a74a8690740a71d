//! `R.segue`: segue identifiers grouped by source view controller

use super::{
    declarations, group_by, merge_declarations, plural, top_level, Declaration, Generator,
    LeafOutput,
};
use crate::error::CodegenError;
use resgen_core::record::{ClassRef, Segue};
use resgen_core::{
    sanitize, IdentifierCase, Lookup, Member, RecordMetadata, ResourceSet, Struct, StructKind,
    TypeReference,
};
use std::collections::BTreeMap;

fn segue_type(segue: &Segue) -> TypeReference {
    let segue_class = match &segue.segue_class {
        Some(class) => TypeReference::class(class),
        None => TypeReference::uikit("UIStoryboardSegue"),
    };
    TypeReference::rswift(
        "StoryboardSegueIdentifier",
        vec![
            segue_class,
            TypeReference::class(&segue.source),
            TypeReference::class(&segue.destination),
        ],
    )
}

pub(super) fn build(resources: &ResourceSet) -> Result<LeafOutput, CodegenError> {
    let path = Generator::Segue.path();
    let mut warnings = Vec::new();

    let segues: Vec<Declaration<&Segue>> =
        declarations(resources, Generator::Segue, |metadata| match metadata {
            RecordMetadata::Scene { segues, .. } => Some(segues.as_slice()),
            _ => None,
        })?
        .into_iter()
        .flat_map(|scene| {
            let (id, record) = (scene.id, scene.record);
            scene
                .data
                .iter()
                .map(move |segue| Declaration { id, record, data: segue })
        })
        .collect();
    let groups = group_by(segues, |segue| {
        (segue.data.source.name.clone(), segue.data.identifier.clone())
    });

    let mut sources: BTreeMap<String, Vec<Member>> = BTreeMap::new();
    for ((source, identifier), group) in groups {
        let source_path = format!("{}.{}", path, sanitize(&source, IdentifierCase::Value));
        let Some(merged) = merge_declarations(
            &source_path,
            "segue",
            group,
            |segue| -> (ClassRef, Option<ClassRef>) {
                (segue.destination.clone(), segue.segue_class.clone())
            },
            |(destination, segue_class)| match segue_class {
                Some(segue_class) => {
                    format!("destination {} via {}", destination.name, segue_class.name)
                }
                None => format!("destination {}", destination.name),
            },
            &mut warnings,
        ) else {
            continue;
        };
        let reference = merged.reference();

        sources.entry(source).or_default().push(
            Member::property(
                sanitize(&identifier, IdentifierCase::Value),
                segue_type(reference.data),
                Lookup::SegueIdentifier {
                    identifier: identifier.clone(),
                },
            )
            .with_record(reference.id)
            .with_comment(format!(
                "Segue identifier `{}` to {}.",
                identifier, reference.data.destination.name
            )),
        );
    }

    let count = sources.values().map(Vec::len).sum();
    let children = sources.into_iter().map(|(source, members)| {
        Struct::new(sanitize(&source, IdentifierCase::Value), StructKind::SegueSource)
            .with_members(members)
    });
    let subtree = top_level(Generator::Segue, count, &plural(count, "segue", "segues"))
        .with_children(children);
    Ok(LeafOutput { subtree, warnings })
}
