//! Export configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use universe_data::CatalogSchema;

/// Default install location of the visualization tool's add-ons
pub const DEFAULT_DEPLOY_DIR: &str = "/usr/share/celestia/extras";

/// Artifact file names, relative to the output directory
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLayout {
    pub star_file: String,
    pub planet_file: String,
    /// Sub-directory holding the tour script
    pub tour_dir: String,
    pub tour_file: String,
}

impl OutputLayout {
    pub fn for_schema(schema: CatalogSchema) -> Self {
        let prefix = schema.file_prefix();
        Self {
            star_file: format!("{}_hosts.stc", prefix),
            planet_file: format!("{}_candidates.ssc", prefix),
            tour_dir: "scripts".to_string(),
            tour_file: format!("{}_tour.cel", prefix),
        }
    }

    pub fn star_path(&self, root: &Path) -> PathBuf {
        root.join(&self.star_file)
    }

    pub fn planet_path(&self, root: &Path) -> PathBuf {
        root.join(&self.planet_file)
    }

    pub fn tour_dir_path(&self, root: &Path) -> PathBuf {
        root.join(&self.tour_dir)
    }

    pub fn tour_path(&self, root: &Path) -> PathBuf {
        self.tour_dir_path(root).join(&self.tour_file)
    }
}

/// Where and how artifacts are installed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    pub target_dir: PathBuf,
    /// Copy through `sudo` (the default install location is root-owned)
    pub privileged: bool,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from(DEFAULT_DEPLOY_DIR),
            privileged: true,
        }
    }
}

/// Everything one export run needs
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub schema: CatalogSchema,
    pub catalog: PathBuf,
    /// Classifier output; without it every row is "unknown"
    pub predictions: Option<PathBuf>,
    pub output_dir: PathBuf,
    /// Overrides the schema's default file names
    pub layout: Option<OutputLayout>,
    /// Seed for texture and star-id randomness
    pub seed: Option<u64>,
    /// Use one texture for every planet instead of the palette
    pub texture: Option<String>,
    pub progress: bool,
    pub deploy: Option<DeployConfig>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            schema: CatalogSchema::Kepler,
            catalog: PathBuf::from("cumulative.csv"),
            predictions: None,
            output_dir: PathBuf::from("."),
            layout: None,
            seed: None,
            texture: None,
            progress: true,
            deploy: None,
        }
    }
}

impl ExportConfig {
    pub fn layout(&self) -> OutputLayout {
        self.layout
            .clone()
            .unwrap_or_else(|| OutputLayout::for_schema(self.schema))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
