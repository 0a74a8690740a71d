//! Normalized resource records
//!
//! Records are produced by the resource-format parsers (outside this crate)
//! and are immutable from here on. The namespace tree refers back to them by
//! [`RecordId`], an index into the owning [`ResourceSet`].

use crate::error::CoreError;
use crate::format_specifier::{excessive_position, parse_format_specifiers, StringParam, MAX_POSITION};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of resource a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Image,
    Color,
    Font,
    Scene,
    ViewHierarchy,
    StringEntry,
    ReuseIdentifier,
    AccessibilityIdentifier,
    MiscFile,
}

impl ResourceKind {
    /// Source file extensions a record of this kind may originate from.
    ///
    /// `None` means any extension is accepted.
    pub fn supported_extensions(&self) -> Option<&'static [&'static str]> {
        match self {
            ResourceKind::Image => Some(&["xcassets", "png", "jpg", "jpeg", "gif", "pdf", "heic"]),
            ResourceKind::Color => Some(&["xcassets"]),
            ResourceKind::Font => Some(&["ttf", "otf", "ttc"]),
            ResourceKind::Scene => Some(&["storyboard"]),
            ResourceKind::ViewHierarchy => Some(&["xib", "nib"]),
            ResourceKind::StringEntry => Some(&["strings", "stringsdict"]),
            ResourceKind::ReuseIdentifier | ResourceKind::AccessibilityIdentifier => {
                Some(&["storyboard", "xib", "nib"])
            }
            ResourceKind::MiscFile => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Image => "image",
            ResourceKind::Color => "color",
            ResourceKind::Font => "font",
            ResourceKind::Scene => "scene",
            ResourceKind::ViewHierarchy => "view hierarchy",
            ResourceKind::StringEntry => "string",
            ResourceKind::ReuseIdentifier => "reuse identifier",
            ResourceKind::AccessibilityIdentifier => "accessibility identifier",
            ResourceKind::MiscFile => "file",
        };
        write!(f, "{}", name)
    }
}

/// Localization qualifier of a record.
///
/// Ordering puts unlocalized and base declarations before languages, so the
/// first declaration of a sorted group is always the reference one.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    None,
    Base,
    Language(String),
}

impl Locale {
    pub fn language(code: &str) -> Self {
        Locale::Language(code.to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::None => write!(f, "unlocalized"),
            Locale::Base => write!(f, "Base"),
            Locale::Language(code) => write!(f, "{}", code),
        }
    }
}

/// A class named by a scene or view hierarchy
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClassRef {
    #[serde(default)]
    pub module: Option<String>,
    pub name: String,
}

impl ClassRef {
    pub fn new(name: &str) -> Self {
        Self {
            module: None,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewController {
    #[serde(default)]
    pub storyboard_identifier: Option<String>,
    pub class: ClassRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segue {
    pub identifier: String,
    pub source: ClassRef,
    pub destination: ClassRef,
    #[serde(default)]
    pub segue_class: Option<ClassRef>,
}

/// Kind specific payload of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordMetadata {
    Image {
        /// Asset folders that provide a namespace, outermost first
        #[serde(default)]
        namespace: Vec<String>,
        #[serde(default)]
        on_demand_tags: Vec<String>,
    },
    Color {
        #[serde(default)]
        namespace: Vec<String>,
    },
    Font {
        postscript_name: String,
        #[serde(default)]
        family: Option<String>,
    },
    Scene {
        #[serde(default)]
        initial_view_controller: Option<ClassRef>,
        #[serde(default)]
        view_controllers: Vec<ViewController>,
        #[serde(default)]
        segues: Vec<Segue>,
        #[serde(default)]
        used_images: Vec<String>,
        #[serde(default)]
        used_colors: Vec<String>,
    },
    ViewHierarchy {
        #[serde(default)]
        root_views: Vec<ClassRef>,
        #[serde(default)]
        used_images: Vec<String>,
        #[serde(default)]
        used_colors: Vec<String>,
    },
    StringEntry {
        table: String,
        #[serde(default)]
        value: Option<String>,
        /// Explicit placeholders; derived from `value` when absent
        #[serde(default)]
        params: Option<Vec<StringParam>>,
    },
    ReuseIdentifier {
        class: ClassRef,
    },
    AccessibilityIdentifier {
        owner: String,
    },
    MiscFile {
        #[serde(default)]
        extension: Option<String>,
    },
}

impl RecordMetadata {
    pub fn kind(&self) -> ResourceKind {
        match self {
            RecordMetadata::Image { .. } => ResourceKind::Image,
            RecordMetadata::Color { .. } => ResourceKind::Color,
            RecordMetadata::Font { .. } => ResourceKind::Font,
            RecordMetadata::Scene { .. } => ResourceKind::Scene,
            RecordMetadata::ViewHierarchy { .. } => ResourceKind::ViewHierarchy,
            RecordMetadata::StringEntry { .. } => ResourceKind::StringEntry,
            RecordMetadata::ReuseIdentifier { .. } => ResourceKind::ReuseIdentifier,
            RecordMetadata::AccessibilityIdentifier { .. } => ResourceKind::AccessibilityIdentifier,
            RecordMetadata::MiscFile { .. } => ResourceKind::MiscFile,
        }
    }
}

/// One normalized resource declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub kind: ResourceKind,
    pub raw_name: String,
    #[serde(default)]
    pub locale: Locale,
    /// Extension of the file the record was extracted from
    #[serde(default)]
    pub source_extension: Option<String>,
    pub metadata: RecordMetadata,
}

impl ResourceRecord {
    pub fn new(raw_name: &str, metadata: RecordMetadata) -> Self {
        Self {
            kind: metadata.kind(),
            raw_name: raw_name.to_string(),
            locale: Locale::None,
            source_extension: None,
            metadata,
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_source_extension(mut self, extension: &str) -> Self {
        self.source_extension = Some(extension.to_string());
        self
    }

    /// Placeholders of a string entry, explicit ones taking precedence
    pub fn string_params(&self) -> Vec<StringParam> {
        match &self.metadata {
            RecordMetadata::StringEntry {
                params: Some(params),
                ..
            } => params.clone(),
            RecordMetadata::StringEntry {
                value: Some(value), ..
            } => parse_format_specifiers(value),
            _ => Vec::new(),
        }
    }

    fn check(&self) -> Result<(), CoreError> {
        if self.raw_name.trim().is_empty() {
            return Err(CoreError::malformed(self.kind, &self.raw_name, "empty name"));
        }

        let declared = self.metadata.kind();
        if declared != self.kind {
            return Err(CoreError::malformed(
                self.kind,
                &self.raw_name,
                format!("metadata describes a {} record", declared),
            ));
        }

        if let RecordMetadata::StringEntry {
            value: Some(value),
            params: None,
            ..
        } = &self.metadata
        {
            if let Some(position) = excessive_position(value) {
                return Err(CoreError::malformed(
                    self.kind,
                    &self.raw_name,
                    format!(
                        "format argument position {} exceeds the maximum of {}",
                        position, MAX_POSITION
                    ),
                ));
            }
        }

        if let (Some(extension), Some(supported)) =
            (&self.source_extension, self.kind.supported_extensions())
        {
            let lowered = extension.trim_start_matches('.').to_ascii_lowercase();
            if !supported.contains(&lowered.as_str()) {
                return Err(CoreError::UnsupportedExtension {
                    extension: extension.clone(),
                    supported: supported.join(", "),
                });
            }
        }

        Ok(())
    }
}

/// Non-owning back reference from the namespace tree into a [`ResourceSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub usize);

/// All records of one run, in input order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceSet {
    records: Vec<ResourceRecord>,
}

impl ResourceSet {
    /// Take ownership of the records, rejecting any that cannot be interpreted
    pub fn new(records: Vec<ResourceRecord>) -> Result<Self, CoreError> {
        for record in &records {
            record.check()?;
        }
        Ok(Self { records })
    }

    pub fn get(&self, id: RecordId) -> Option<&ResourceRecord> {
        self.records.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &ResourceRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(idx, record)| (RecordId(idx), record))
    }

    /// Records of one kind, in input order
    pub fn of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = (RecordId, &ResourceRecord)> {
        self.iter().filter(move |(_, record)| record.kind == kind)
    }
}
