//! `R.file`: bundled files that are not covered by another category

use super::{declarations, group_by, merge_declarations, plural, top_level, Generator, LeafOutput};
use crate::error::CodegenError;
use resgen_core::{
    sanitize, IdentifierCase, Lookup, Member, RecordMetadata, ResourceSet, TypeReference,
};

/// Split `data.json` into the name and extension `Bundle.url(forResource:withExtension:)` wants
fn split_file_name<'a>(raw_name: &'a str, extension: Option<&'a str>) -> (&'a str, Option<&'a str>) {
    if let Some(extension) = extension {
        let suffix = format!(".{}", extension);
        let name = raw_name.strip_suffix(suffix.as_str()).unwrap_or(raw_name);
        return (name, Some(extension));
    }
    match raw_name.rsplit_once('.') {
        Some((name, extension)) if !name.is_empty() && !extension.is_empty() => {
            (name, Some(extension))
        }
        _ => (raw_name, None),
    }
}

pub(super) fn build(resources: &ResourceSet) -> Result<LeafOutput, CodegenError> {
    let path = Generator::File.path();
    let mut warnings = Vec::new();

    let files = declarations(resources, Generator::File, |metadata| match metadata {
        RecordMetadata::MiscFile { extension } => Some(extension.as_deref()),
        _ => None,
    })?;
    let groups = group_by(files, |file| file.record.raw_name.clone());

    let mut members = Vec::new();
    for (raw_name, group) in groups {
        let Some(merged) = merge_declarations(
            &path,
            "file",
            group,
            |extension| extension.map(str::to_string),
            |extension| match extension {
                Some(extension) => format!("extension '{}'", extension),
                None => "no extension".to_string(),
            },
            &mut warnings,
        ) else {
            continue;
        };
        let reference = merged.reference();
        let (name, extension) = split_file_name(&raw_name, reference.data);

        members.push(
            Member::function(
                sanitize(&raw_name, IdentifierCase::Value),
                Vec::new(),
                TypeReference::foundation("URL").optional(),
                Lookup::File {
                    name: name.to_string(),
                    extension: extension.map(str::to_string),
                },
            )
            .with_record(reference.id)
            .with_comment(format!("Resource file `{}`.", raw_name)),
        );
    }

    let count = members.len();
    let subtree =
        top_level(Generator::File, count, &plural(count, "file", "files")).with_members(members);
    Ok(LeafOutput { subtree, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use resgen_core::ResourceRecord;

    #[test]
    fn test_split_file_name() {
        assert_eq!(split_file_name("data.json", None), ("data", Some("json")));
        assert_eq!(split_file_name("archive.tar.gz", Some("tar.gz")), ("archive", Some("tar.gz")));
        assert_eq!(split_file_name("LICENSE", None), ("LICENSE", None));
        assert_eq!(split_file_name(".env", None), (".env", None));
    }

    #[test]
    fn test_file_accessor_returns_url() {
        let resources = ResourceSet::new(vec![ResourceRecord::new(
            "seed-data.json",
            RecordMetadata::MiscFile { extension: None },
        )])
        .unwrap();
        let output = build(&resources).unwrap();
        let member = output.subtree.member("seed-data.json").unwrap();
        assert_eq!(member.identifier.sanitized_name, "seedDataJson");
        assert_eq!(member.return_type.to_string(), "Foundation.URL?");
    }
}
