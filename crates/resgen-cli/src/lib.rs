//! Command line driver for resgen
//!
//! Loads a record manifest and a configuration, runs the generation pipeline
//! and writes the artifacts through the incremental write guard.

pub mod config;
pub mod input;
pub mod writer;

use anyhow::{Context, Result};
use resgen_codegen::generate;
use resgen_core::Warning;
use std::path::Path;
use tracing::{info, warn};

pub use config::{ConfigOverrides, GeneratorConfig};
pub use input::{load_resources, RecordManifest};
pub use writer::{write_if_changed, WriteOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Generate and write every configured artifact
    Generate,
    /// Generate in memory and only report warnings
    Check,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub warnings: Vec<Warning>,
    pub primary: Option<WriteOutcome>,
    pub ui_test: Option<WriteOutcome>,
}

pub fn run(manifest: &Path, config: &GeneratorConfig, mode: RunMode) -> Result<RunReport> {
    let resources = load_resources(manifest)?;
    let artifacts = generate(&resources, &config.generate_options())
        .with_context(|| format!("Failed to generate resources from {}", manifest.display()))?;

    let mut report = RunReport {
        warnings: artifacts.warnings,
        ..RunReport::default()
    };
    if mode == RunMode::Check {
        return Ok(report);
    }

    report.primary = Some(write_if_changed(&config.output_path(), &artifacts.primary)?);

    if let (Some(path), Some(contents)) = (&config.ui_test_output, &artifacts.ui_test) {
        report.ui_test = Some(write_if_changed(path, contents)?);
    }

    if let Some(path) = &config.dump_internal {
        let json = serde_json::to_string_pretty(&artifacts.internal)
            .context("Failed to serialize internal tree")?;
        write_if_changed(path, &json)?;
        info!(path = %path.display(), "dumped internal tree");
    }

    Ok(report)
}

pub fn report_warnings(warnings: &[Warning]) {
    for warning in warnings {
        warn!("{}", warning);
    }
}
