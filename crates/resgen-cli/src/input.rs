//! Loading the normalized record manifest
//!
//! Resource discovery and file parsing happen upstream; this tool receives
//! their result as a JSON document `{ "records": [ ... ] }`.

use anyhow::{Context, Result};
use resgen_core::{ResourceRecord, ResourceSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RecordManifest {
    pub records: Vec<ResourceRecord>,
}

impl RecordManifest {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read record manifest: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse record manifest: {}", path.display()))
    }
}

/// Read a manifest and check every record in it
pub fn load_resources(path: &Path) -> Result<ResourceSet> {
    let manifest = RecordManifest::from_file(path)?;
    debug!(records = manifest.records.len(), "loaded record manifest");
    ResourceSet::new(manifest.records)
        .with_context(|| format!("Invalid record in manifest: {}", path.display()))
}
