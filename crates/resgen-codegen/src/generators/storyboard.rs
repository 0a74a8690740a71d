//! `R.storyboard`: one struct per storyboard with its view controllers

use super::{
    avoid_reserved, bundle_member, declarations, group_by, merge_declarations, name_member,
    plural, top_level, Generator, LeafOutput, BUNDLE_MEMBER, NAME_MEMBER,
};
use crate::error::CodegenError;
use resgen_core::record::{ClassRef, ViewController};
use resgen_core::{
    sanitize, Identifier, IdentifierCase, Lookup, Member, RecordMetadata, ResourceSet, Struct,
    StructKind, TypeReference, Warning,
};
use std::collections::BTreeMap;

const INITIAL_MEMBER: &str = "instantiateInitialViewController";

struct Scene<'a> {
    initial_view_controller: Option<&'a ClassRef>,
    view_controllers: &'a [ViewController],
}

/// Identified view controllers, first declaration of an identifier wins
fn identified<'a>(
    path: &str,
    storyboard: &str,
    view_controllers: &'a [ViewController],
    warnings: &mut Vec<Warning>,
) -> BTreeMap<&'a str, &'a ClassRef> {
    let mut identified: BTreeMap<&str, &ClassRef> = BTreeMap::new();
    for view_controller in view_controllers {
        let Some(identifier) = view_controller.storyboard_identifier.as_deref() else {
            continue;
        };
        match identified.get(identifier) {
            None => {
                identified.insert(identifier, &view_controller.class);
            }
            Some(existing) if *existing != &view_controller.class => {
                warnings.push(Warning::inconsistent(
                    path,
                    format!(
                        "Skipping view controller '{}' of class {} in storyboard '{}': the identifier is already used by class {}",
                        identifier, view_controller.class.name, storyboard, existing.name
                    ),
                ));
            }
            Some(_) => {}
        }
    }
    identified
}

type SceneShape = (Option<ClassRef>, Vec<(String, ClassRef)>);

fn shape(scene: &Scene) -> SceneShape {
    let mut view_controllers: Vec<(String, ClassRef)> = scene
        .view_controllers
        .iter()
        .filter_map(|vc| {
            vc.storyboard_identifier
                .clone()
                .map(|identifier| (identifier, vc.class.clone()))
        })
        .collect();
    view_controllers.sort();
    view_controllers.dedup();
    (scene.initial_view_controller.cloned(), view_controllers)
}

fn describe(shape: &SceneShape) -> String {
    let initial = match &shape.0 {
        Some(class) => format!("initial view controller {}", class.name),
        None => "no initial view controller".to_string(),
    };
    format!(
        "{} and {} identified view {}",
        initial,
        shape.1.len(),
        plural(shape.1.len(), "controller", "controllers")
    )
}

pub(super) fn build(resources: &ResourceSet) -> Result<LeafOutput, CodegenError> {
    let path = Generator::Storyboard.path();
    let mut warnings = Vec::new();

    let scenes = declarations(resources, Generator::Storyboard, |metadata| match metadata {
        RecordMetadata::Scene {
            initial_view_controller,
            view_controllers,
            ..
        } => Some(Scene {
            initial_view_controller: initial_view_controller.as_ref(),
            view_controllers,
        }),
        _ => None,
    })?;
    let groups = group_by(scenes, |scene| scene.record.raw_name.clone());

    let mut storyboards = Vec::new();
    for (raw_name, group) in groups {
        let Some(merged) =
            merge_declarations(&path, "storyboard", group, shape, describe, &mut warnings)
        else {
            continue;
        };
        let reference = merged.reference();
        let name = sanitize(&raw_name, IdentifierCase::Value);
        let storyboard_path = format!("{}.{}", path, name);

        let mut members = vec![name_member(&raw_name), bundle_member()];
        if let Some(initial) = reference.data.initial_view_controller {
            members.push(
                Member::function(
                    Identifier::verbatim(INITIAL_MEMBER),
                    Vec::new(),
                    TypeReference::class(initial).optional(),
                    Lookup::InitialViewController {
                        storyboard: raw_name.clone(),
                    },
                )
                .with_record(reference.id),
            );
        }

        let view_controllers = identified(
            &storyboard_path,
            &raw_name,
            reference.data.view_controllers,
            &mut warnings,
        );
        for (identifier, class) in view_controllers {
            members.push(
                Member::function(
                    avoid_reserved(
                        sanitize(identifier, IdentifierCase::Value),
                        &[NAME_MEMBER, BUNDLE_MEMBER, INITIAL_MEMBER],
                    ),
                    Vec::new(),
                    TypeReference::class(class).optional(),
                    Lookup::ViewController {
                        storyboard: raw_name.clone(),
                        identifier: identifier.to_string(),
                    },
                )
                .with_record(reference.id)
                .with_comment(format!("View controller with identifier `{}`.", identifier)),
            );
        }

        storyboards.push(
            Struct::new(name, StructKind::Storyboard)
                .with_comment(format!("Storyboard `{}`.", raw_name))
                .with_members(members),
        );
    }

    let count = storyboards.len();
    let subtree = top_level(
        Generator::Storyboard,
        count,
        &plural(count, "storyboard", "storyboards"),
    )
    .with_children(storyboards);
    Ok(LeafOutput { subtree, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use resgen_core::{Locale, ResourceRecord, WarningKind};

    fn scene(name: &str, view_controllers: Vec<ViewController>) -> ResourceRecord {
        ResourceRecord::new(
            name,
            RecordMetadata::Scene {
                initial_view_controller: Some(ClassRef::new("UINavigationController")),
                view_controllers,
                segues: Vec::new(),
                used_images: Vec::new(),
                used_colors: Vec::new(),
            },
        )
    }

    fn view_controller(identifier: &str, class: &str) -> ViewController {
        ViewController {
            storyboard_identifier: Some(identifier.to_string()),
            class: ClassRef::new(class),
        }
    }

    #[test]
    fn test_storyboard_members() {
        let resources = ResourceSet::new(vec![scene(
            "Main",
            vec![
                view_controller("Profile", "ProfileViewController"),
                ViewController {
                    storyboard_identifier: None,
                    class: ClassRef::new("UnnamedViewController"),
                },
            ],
        )])
        .unwrap();
        let output = build(&resources).unwrap();
        let main = output.subtree.find(&["Main"]).unwrap();

        assert_eq!(main.name.sanitized_name, "main");
        assert_eq!(main.member("name").unwrap().lookup, Lookup::Literal("Main".to_string()));
        assert_eq!(main.member("bundle").unwrap().lookup, Lookup::HostingBundle);
        assert_eq!(
            main.member(INITIAL_MEMBER).unwrap().return_type.to_string(),
            "UIKit.UINavigationController?"
        );
        assert_eq!(
            main.member("Profile").unwrap().return_type.to_string(),
            "ProfileViewController?"
        );
        assert_eq!(main.members().len(), 4);
    }

    #[test]
    fn test_identifier_shadowing_generated_member_is_suffixed() {
        let resources =
            ResourceSet::new(vec![scene("Main", vec![view_controller("name", "NameViewController")])])
                .unwrap();
        let output = build(&resources).unwrap();
        let main = output.subtree.find(&["Main"]).unwrap();
        let shadowing = main
            .members()
            .iter()
            .find(|m| m.lookup != Lookup::Literal("Main".to_string()) && m.raw_name() == "name")
            .unwrap();
        assert_eq!(shadowing.identifier.sanitized_name, "name_");
        assert!(shadowing.identifier.is_explicit);
    }

    #[test]
    fn test_localized_storyboard_with_different_shape_is_dropped() {
        let resources = ResourceSet::new(vec![
            scene("Main", vec![view_controller("Profile", "ProfileViewController")])
                .with_locale(Locale::Base),
            scene("Main", Vec::new()).with_locale(Locale::language("de")),
        ])
        .unwrap();
        let output = build(&resources).unwrap();
        assert_eq!(output.subtree.children().len(), 1);
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.warnings[0].kind, WarningKind::InconsistentDeclaration);
    }
}
