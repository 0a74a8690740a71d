//! The generation pipeline
//!
//! records → leaf builders → aggregate → validate → inject → emit
//!
//! Each stage hands a new tree to the next. Warnings from the builders and
//! the validator are collected and returned with the artifacts; only errors
//! abort the run.

use crate::aggregate::aggregate_outputs;
use crate::generators::{build_all, Generator};
use crate::import_tracker::ImportTracker;
use crate::objc::{ObjcCodegen, ObjcCodegenConfig};
use crate::properties::inject_internal_properties;
use crate::references::{render_unused_images, ReferenceSet};
use crate::swift::{header, SwiftCodegen, SwiftCodegenConfig};
use crate::validation::validate;
use crate::{Codegen, CodegenError};
use resgen_core::types::FOUNDATION;
use resgen_core::{AccessLevel, BundleSource, ResourceSet, Struct, Warning};
use tracing::{debug, info, instrument};

/// Target of an emission pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Swift,
    /// `@objcMembers` classes forwarding to the Swift accessors
    ObjcCompat,
}

/// Render a tree in one target language
pub fn emit(
    tree: &Struct,
    language: Language,
    access_level: AccessLevel,
    prefix: &str,
) -> Result<String, CodegenError> {
    match language {
        Language::Swift => SwiftCodegen::new()
            .with_config(SwiftCodegenConfig {
                access_level,
                include_docs: true,
            })
            .generate(tree),
        Language::ObjcCompat => ObjcCodegen::new()
            .with_config(ObjcCodegenConfig {
                access_level,
                class_prefix: prefix.to_string(),
            })
            .generate(tree),
    }
}

/// Options for one generation run
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub access_level: AccessLevel,
    /// Class name prefix of the Objective-C compatibility layer
    pub prefix: String,
    pub objc_compat: bool,
    pub unused_images: bool,
    pub bundle: BundleSource,
    /// Module the generated file is compiled into, never imported
    pub product_module_name: Option<String>,
    /// Modules to import in addition to the ones the tree uses
    pub imports: Vec<String>,
    /// Also render the accessibility identifier file for UI tests
    pub ui_test: bool,
    pub parallel: bool,
}

/// Everything one run produces
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub primary: String,
    pub ui_test: Option<String>,
    pub warnings: Vec<Warning>,
    /// Full-fidelity tree, demoted entries included
    pub internal: Struct,
}

#[instrument(skip_all, fields(records = resources.len()))]
pub fn generate(
    resources: &ResourceSet,
    options: &GenerateOptions,
) -> Result<Artifacts, CodegenError> {
    let outputs = build_all(&Generator::ALL, resources, options.parallel)?;
    let (aggregated, mut warnings) = aggregate_outputs(outputs);

    let validation = validate(&aggregated);
    warnings.extend(validation.warnings);
    let external = inject_internal_properties(&validation.external, &options.bundle);

    let primary = render_primary(&external, resources, options)?;
    let ui_test = if options.ui_test {
        Some(render_ui_test(resources, options)?)
    } else {
        None
    };

    info!(
        members = external.member_count(),
        warnings = warnings.len(),
        "generated resource namespace"
    );
    Ok(Artifacts {
        primary,
        ui_test,
        warnings,
        internal: validation.internal,
    })
}

fn import_tracker(options: &GenerateOptions) -> ImportTracker {
    match &options.product_module_name {
        Some(module) => ImportTracker::new().excluding(module),
        None => ImportTracker::new(),
    }
}

fn render_primary(
    tree: &Struct,
    resources: &ResourceSet,
    options: &GenerateOptions,
) -> Result<String, CodegenError> {
    let mut imports = import_tracker(options);
    imports.add_tree(tree);
    for module in &options.imports {
        imports.add_module(module);
    }
    if options.objc_compat {
        imports.add_module(FOUNDATION);
    }

    let mut output = with_preamble(&imports, emit(tree, Language::Swift, options.access_level, &options.prefix)?);

    if options.objc_compat {
        output.push_str(&emit(
            tree,
            Language::ObjcCompat,
            options.access_level,
            &options.prefix,
        )?);
    }

    if options.unused_images {
        let unused = ReferenceSet::collect(resources).unused_images(resources);
        debug!(count = unused.len(), "potentially unused images");
        output.push('\n');
        output.push_str(&render_unused_images(&unused));
    }

    Ok(output)
}

/// Second artifact: only the accessibility identifiers, for UI test targets.
///
/// Its warnings repeat the ones of the main run and are dropped.
fn render_ui_test(
    resources: &ResourceSet,
    options: &GenerateOptions,
) -> Result<String, CodegenError> {
    let outputs = build_all(&[Generator::AccessibilityIdentifier], resources, false)?;
    let (aggregated, _) = aggregate_outputs(outputs);
    let tree = validate(&aggregated).external;

    let mut imports = import_tracker(options);
    imports.add_tree(&tree);
    Ok(with_preamble(
        &imports,
        emit(&tree, Language::Swift, options.access_level, &options.prefix)?,
    ))
}

fn with_preamble(imports: &ImportTracker, body: String) -> String {
    let mut output = header();
    let statements = imports.generate_import_statements();
    if !statements.is_empty() {
        output.push('\n');
        output.push_str(&statements);
    }
    output.push('\n');
    output.push_str(&body);
    output
}
