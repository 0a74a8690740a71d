//! Resources referenced from storyboards and nibs
//!
//! Interface files name the images and colors they use. Images that no
//! interface file names are reported as potentially unused; code may still
//! load them by string, so the report is only a hint. Names are reported as
//! Swift identifiers so the report cannot break out of its comment.

use crate::generators::asset_name;
use resgen_core::{sanitize, IdentifierCase, RecordMetadata, ResourceKind, ResourceSet};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    images: BTreeSet<String>,
    colors: BTreeSet<String>,
}

impl ReferenceSet {
    pub fn collect(resources: &ResourceSet) -> Self {
        let mut references = Self::default();
        for (_, record) in resources.iter() {
            let (images, colors) = match &record.metadata {
                RecordMetadata::Scene {
                    used_images,
                    used_colors,
                    ..
                }
                | RecordMetadata::ViewHierarchy {
                    used_images,
                    used_colors,
                    ..
                } => (used_images, used_colors),
                _ => continue,
            };
            references.images.extend(images.iter().cloned());
            references.colors.extend(colors.iter().cloned());
        }
        references
    }

    pub fn images(&self) -> &BTreeSet<String> {
        &self.images
    }

    pub fn colors(&self) -> &BTreeSet<String> {
        &self.colors
    }

    /// Identifiers of the images no interface file references, sorted and
    /// deduplicated
    pub fn unused_images(&self, resources: &ResourceSet) -> Vec<String> {
        let defined: BTreeSet<String> = resources
            .of_kind(ResourceKind::Image)
            .filter_map(|(_, record)| match &record.metadata {
                RecordMetadata::Image { namespace, .. } => {
                    Some(asset_name(namespace, &record.raw_name))
                }
                _ => None,
            })
            .collect();
        let unused: BTreeSet<String> = defined
            .difference(&self.images)
            .map(|name| sanitize(name, IdentifierCase::Value).sanitized_name)
            .collect();
        unused.into_iter().collect()
    }
}

/// Comment block listing images that look unused
pub fn render_unused_images(names: &[String]) -> String {
    let mut block = String::from("/* Potentially Unused Images\n");
    for name in names {
        block.push_str(name);
        block.push('\n');
    }
    block.push_str("*/\n");
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use resgen_core::ResourceRecord;

    fn image(name: &str) -> ResourceRecord {
        ResourceRecord::new(
            name,
            RecordMetadata::Image {
                namespace: Vec::new(),
                on_demand_tags: Vec::new(),
            },
        )
    }

    #[test]
    fn test_unused_images() {
        let resources = ResourceSet::new(vec![
            image("C"),
            image("A"),
            image("B"),
            ResourceRecord::new(
                "Main",
                RecordMetadata::Scene {
                    initial_view_controller: None,
                    view_controllers: Vec::new(),
                    segues: Vec::new(),
                    used_images: vec!["A".to_string(), "missing".to_string()],
                    used_colors: vec!["Brand".to_string()],
                },
            ),
        ])
        .unwrap();

        let references = ReferenceSet::collect(&resources);
        assert!(references.colors().contains("Brand"));
        let unused = references.unused_images(&resources);
        assert_eq!(unused, vec!["b".to_string(), "c".to_string()]);
        assert_eq!(render_unused_images(&unused), "/* Potentially Unused Images\nb\nc\n*/\n");
    }

    #[test]
    fn test_unused_names_cannot_close_the_comment() {
        let resources = ResourceSet::new(vec![
            image("logo*/bad"),
            image("two\nlines"),
            image("logo-bad"),
        ])
        .unwrap();

        let unused = ReferenceSet::collect(&resources).unused_images(&resources);
        assert_eq!(unused, vec!["logoBad".to_string(), "twoLines".to_string()]);

        let block = render_unused_images(&unused);
        assert_eq!(block.matches("*/").count(), 1);
        assert!(block.ends_with("*/\n"));
        assert_eq!(block.lines().count(), 4);
    }
}
