use crate::config::OutputLayout;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use universe_data::CatalogSchema;

/// File name of the manifest inside the output directory
pub const MANIFEST_FILE: &str = "export_manifest.json";

/// Row and record counts of one export
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportCounts {
    pub catalog_rows: usize,
    pub candidates: usize,
    pub predictions_matched: usize,
    pub star_records: usize,
    pub planet_records: usize,
    pub orbits: usize,
    pub tour_steps: usize,
}

/// Export manifest - what was generated and from what
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportManifest {
    pub version: u32,
    pub schema: CatalogSchema,
    pub catalog: PathBuf,
    pub predictions: Option<PathBuf>,
    pub seed: Option<u64>,
    pub layout: OutputLayout,
    pub counts: ExportCounts,
}

impl ExportManifest {
    pub fn new(schema: CatalogSchema, layout: OutputLayout) -> Self {
        Self {
            version: 1,
            schema,
            catalog: PathBuf::new(),
            predictions: None,
            seed: None,
            layout,
            counts: ExportCounts::default(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write manifest: {}", path.display()))?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }
}
