//! `R.font`: custom fonts, looked up by PostScript name

use super::{declarations, group_by, merge_declarations, plural, top_level, Generator, LeafOutput};
use crate::error::CodegenError;
use resgen_core::{
    sanitize, IdentifierCase, Lookup, Member, Module, Parameter, RecordMetadata, ResourceSet,
    TypeReference,
};

struct Font<'a> {
    postscript_name: &'a str,
    family: Option<&'a str>,
}

pub(super) fn build(resources: &ResourceSet) -> Result<LeafOutput, CodegenError> {
    let path = Generator::Font.path();
    let mut warnings = Vec::new();

    let fonts = declarations(resources, Generator::Font, |metadata| match metadata {
        RecordMetadata::Font {
            postscript_name,
            family,
        } => Some(Font {
            postscript_name,
            family: family.as_deref(),
        }),
        _ => None,
    })?;
    let groups = group_by(fonts, |font| font.record.raw_name.clone());

    let mut subtree_members = Vec::new();
    for (raw_name, group) in groups {
        let Some(merged) = merge_declarations(
            &path,
            "font",
            group,
            |font| font.postscript_name.to_string(),
            |name| format!("PostScript name '{}'", name),
            &mut warnings,
        ) else {
            continue;
        };
        let font = &merged.reference().data;

        let mut member = Member::function(
            sanitize(&raw_name, IdentifierCase::Value),
            vec![Parameter::new(
                Some("size"),
                "size",
                TypeReference::new(Module::named("CoreGraphics"), "CGFloat"),
            )],
            TypeReference::uikit("UIFont").optional(),
            Lookup::Font {
                postscript_name: font.postscript_name.to_string(),
            },
        )
        .with_record(merged.reference().id)
        .with_comment(format!("Font `{}`.", font.postscript_name));
        if let Some(family) = font.family {
            member = member.with_comment(format!("Family `{}`.", family));
        }
        subtree_members.push(member);
    }

    let count = subtree_members.len();
    let subtree = top_level(Generator::Font, count, &plural(count, "font", "fonts"))
        .with_members(subtree_members);
    Ok(LeafOutput { subtree, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use resgen_core::{ResourceRecord, WarningKind};

    fn font(name: &str, postscript_name: &str) -> ResourceRecord {
        ResourceRecord::new(
            name,
            RecordMetadata::Font {
                postscript_name: postscript_name.to_string(),
                family: Some("Inter".to_string()),
            },
        )
    }

    #[test]
    fn test_font_accessor_takes_size() {
        let resources = ResourceSet::new(vec![font("Inter-Bold", "Inter-Bold")]).unwrap();
        let output = build(&resources).unwrap();
        let member = output.subtree.member("Inter-Bold").unwrap();
        assert_eq!(member.identifier.sanitized_name, "interBold");
        assert_eq!(member.parameters()[0].ty.to_string(), "CoreGraphics.CGFloat");
    }

    #[test]
    fn test_conflicting_postscript_names_keep_first() {
        let resources =
            ResourceSet::new(vec![font("Inter", "Inter-Regular"), font("Inter", "Inter-Text")])
                .unwrap();
        let output = build(&resources).unwrap();
        assert_eq!(output.subtree.members().len(), 1);
        assert_eq!(output.warnings[0].kind, WarningKind::InconsistentDeclaration);
        assert_eq!(
            output.subtree.member("Inter").unwrap().lookup,
            Lookup::Font {
                postscript_name: "Inter-Regular".to_string()
            }
        );
    }
}
