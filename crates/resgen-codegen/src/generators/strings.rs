//! `R.string`: one struct per strings table, one function per key
//!
//! Placeholders in the reference translation become typed arguments.
//! Translations that disagree with the reference on their placeholders are
//! dropped so every locale can be formatted with the same arguments.

use super::{
    declarations, group_by, merge_declarations, plural, top_level, Declaration, Generator,
    LeafOutput,
};
use crate::error::CodegenError;
use resgen_core::format_specifier::{StringParam, StringParamKind};
use resgen_core::{
    sanitize, IdentifierCase, Locale, Lookup, Member, Parameter, RecordMetadata, ResourceSet,
    Struct, StructKind, TypeReference,
};
use std::collections::BTreeMap;

struct StringEntry<'a> {
    table: &'a str,
    value: Option<&'a str>,
    params: Vec<StringParam>,
}

fn describe_params(kinds: &[StringParamKind]) -> String {
    if kinds.is_empty() {
        return "no placeholders".to_string();
    }
    let types: Vec<&str> = kinds.iter().map(StringParamKind::swift_type).collect();
    format!(
        "{} {} ({})",
        kinds.len(),
        plural(kinds.len(), "placeholder", "placeholders"),
        types.join(", ")
    )
}

fn parameters(params: &[StringParam]) -> Vec<Parameter> {
    params
        .iter()
        .enumerate()
        .map(|(idx, param)| {
            let ty = TypeReference::stdlib(param.kind.swift_type());
            match &param.name {
                Some(name) => {
                    let name = sanitize(name, IdentifierCase::Value).sanitized_name;
                    Parameter::new(Some(&name), &name, ty)
                }
                None => Parameter::new(None, &format!("value{}", idx + 1), ty),
            }
        })
        .collect()
}

fn translation_comment(locale: &Locale, value: &str) -> String {
    match locale {
        Locale::None => format!("Value: {}", value),
        locale => format!("{} translation: {}", locale, value),
    }
}

pub(super) fn build(resources: &ResourceSet) -> Result<LeafOutput, CodegenError> {
    let mut warnings = Vec::new();

    let entries: Vec<Declaration<StringEntry>> =
        declarations(resources, Generator::String, |metadata| match metadata {
            RecordMetadata::StringEntry { table, value, .. } => Some((table.as_str(), value.as_deref())),
            _ => None,
        })?
        .into_iter()
        .map(|declaration| Declaration {
            id: declaration.id,
            record: declaration.record,
            data: StringEntry {
                table: declaration.data.0,
                value: declaration.data.1,
                params: declaration.record.string_params(),
            },
        })
        .collect();
    let groups = group_by(entries, |entry| {
        (entry.data.table.to_string(), entry.record.raw_name.clone())
    });

    let mut tables: BTreeMap<String, Vec<Member>> = BTreeMap::new();
    for ((table, key), group) in groups {
        let table_path = format!(
            "{}.{}",
            Generator::String.path(),
            sanitize(&table, IdentifierCase::Value)
        );
        let Some(merged) = merge_declarations(
            &table_path,
            "string",
            group,
            |entry| entry.params.iter().map(|p| p.kind).collect::<Vec<_>>(),
            |kinds| describe_params(kinds),
            &mut warnings,
        ) else {
            continue;
        };
        let reference = merged.reference();
        let locales = merged.locales();

        let mut member = Member::function(
            sanitize(&key, IdentifierCase::Value),
            parameters(&reference.data.params),
            TypeReference::string(),
            Lookup::LocalizedString {
                table: table.clone(),
                key: key.clone(),
                locales: locales.clone(),
            },
        )
        .with_record(reference.id);
        for declaration in merged.declarations() {
            if let Some(value) = declaration.data.value {
                member = member.with_comment(translation_comment(&declaration.record.locale, value));
            }
        }
        let languages: Vec<String> = locales
            .iter()
            .filter(|locale| matches!(locale, Locale::Language(_)))
            .map(ToString::to_string)
            .collect();
        if !languages.is_empty() {
            member = member.with_comment(format!("Locales: {}", languages.join(", ")));
        }

        tables.entry(table).or_default().push(member);
    }

    let count = tables.len();
    let children = tables.into_iter().map(|(table, members)| {
        Struct::new(sanitize(&table, IdentifierCase::Value), StructKind::StringTable)
            .with_comment(format!(
                "This `{}.{}` struct is generated, and contains static references to {} localization keys.",
                Generator::String.path(),
                sanitize(&table, IdentifierCase::Value),
                members.len()
            ))
            .with_members(members)
    });
    let subtree = top_level(
        Generator::String,
        count,
        &plural(count, "localization table", "localization tables"),
    )
    .with_children(children);
    Ok(LeafOutput { subtree, warnings })
}
