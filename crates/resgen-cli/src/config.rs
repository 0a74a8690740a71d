//! Generator configuration
//!
//! Settings come from an optional TOML file and are then overridden by
//! command line flags. A missing `resgen.toml` in the working directory is
//! not an error; an explicitly named file that cannot be read is.

use anyhow::{Context, Result};
use resgen_codegen::GenerateOptions;
use resgen_core::{AccessLevel, BundleSource};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "resgen.toml";
pub const DEFAULT_OUTPUT: &str = "R.generated.swift";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub access_level: AccessLevel,
    /// Class name prefix of the Objective-C compatibility layer
    pub prefix: String,
    pub output: Option<PathBuf>,
    /// Where to write the accessibility identifier file for UI tests
    pub ui_test_output: Option<PathBuf>,
    pub objc_compat: bool,
    pub unused_images: bool,
    /// Load resources from the bundle with this identifier instead of the main bundle
    pub bundle_identifier: Option<String>,
    pub product_module_name: Option<String>,
    /// Extra modules to import in the generated file
    pub imports: Vec<String>,
    pub parallel: bool,
    /// Write the full internal tree as JSON to this path
    pub dump_internal: Option<PathBuf>,
}

/// Values given on the command line, each replacing the configured one when set
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub access_level: Option<AccessLevel>,
    pub prefix: Option<String>,
    pub output: Option<PathBuf>,
    pub ui_test_output: Option<PathBuf>,
    pub objc_compat: bool,
    pub unused_images: bool,
    pub bundle_identifier: Option<String>,
    pub product_module_name: Option<String>,
    pub imports: Vec<String>,
    pub parallel: bool,
    pub dump_internal: Option<PathBuf>,
}

impl GeneratorConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load the explicit config file, or `resgen.toml` from `dir` when present
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let default_path = dir.join(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            debug!(path = %default_path.display(), "using default config file");
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(access_level) = overrides.access_level {
            self.access_level = access_level;
        }
        if let Some(prefix) = overrides.prefix {
            self.prefix = prefix;
        }
        if overrides.output.is_some() {
            self.output = overrides.output;
        }
        if overrides.ui_test_output.is_some() {
            self.ui_test_output = overrides.ui_test_output;
        }
        if overrides.bundle_identifier.is_some() {
            self.bundle_identifier = overrides.bundle_identifier;
        }
        if overrides.product_module_name.is_some() {
            self.product_module_name = overrides.product_module_name;
        }
        if overrides.dump_internal.is_some() {
            self.dump_internal = overrides.dump_internal;
        }
        self.objc_compat |= overrides.objc_compat;
        self.unused_images |= overrides.unused_images;
        self.parallel |= overrides.parallel;
        for import in overrides.imports {
            if !self.imports.contains(&import) {
                self.imports.push(import);
            }
        }
        self
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            access_level: self.access_level,
            prefix: self.prefix.clone(),
            objc_compat: self.objc_compat,
            unused_images: self.unused_images,
            bundle: match &self.bundle_identifier {
                Some(identifier) => BundleSource::Identifier(identifier.clone()),
                None => BundleSource::Main,
            },
            product_module_name: self.product_module_name.clone(),
            imports: self.imports.clone(),
            ui_test: self.ui_test_output.is_some(),
            parallel: self.parallel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_toml() {
        let config: GeneratorConfig = toml::from_str(
            r#"
access_level = "public"
prefix = "SA"
output = "Generated/R.generated.swift"
objc_compat = true
bundle_identifier = "com.example.SampleApp"
imports = ["Combine"]
"#,
        )
        .unwrap();

        assert_eq!(config.access_level, AccessLevel::Public);
        assert_eq!(config.output_path(), PathBuf::from("Generated/R.generated.swift"));
        let options = config.generate_options();
        assert!(options.objc_compat);
        assert!(!options.ui_test);
        assert_eq!(
            options.bundle,
            BundleSource::Identifier("com.example.SampleApp".to_string())
        );
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<GeneratorConfig>("acces_level = \"public\"").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let config = GeneratorConfig {
            access_level: AccessLevel::Public,
            imports: vec!["Combine".to_string()],
            ..GeneratorConfig::default()
        }
        .with_overrides(ConfigOverrides {
            access_level: Some(AccessLevel::Internal),
            unused_images: true,
            imports: vec!["Combine".to_string(), "SwiftUI".to_string()],
            ..ConfigOverrides::default()
        });

        assert_eq!(config.access_level, AccessLevel::Internal);
        assert!(config.unused_images);
        assert_eq!(config.imports, vec!["Combine".to_string(), "SwiftUI".to_string()]);
        assert_eq!(config.output_path(), PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::load(None, dir.path()).unwrap();
        assert_eq!(config, GeneratorConfig::default());

        let missing = dir.path().join("missing.toml");
        assert!(GeneratorConfig::load(Some(&missing), dir.path()).is_err());
    }
}
