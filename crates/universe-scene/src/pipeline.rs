//! Export pipeline: catalog -> candidates -> derived quantities -> predictions -> artifacts

use crate::config::{DeployConfig, ExportConfig};
use crate::deploy::{DeployReport, Deployer};
use crate::entities::Choreography;
use crate::generator::ArtifactGenerator;
use crate::manifest::{ExportCounts, ExportManifest, MANIFEST_FILE};
use crate::planets::{PlanetGenerator, TextureChoice};
use crate::stars::StarGenerator;
use crate::tour::TourGenerator;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use std::path::{Path, PathBuf};
use universe_data::{enrich, merge_predictions, MergedRow, PredictionTable};

/// Generated artifact text, before it is written
#[derive(Clone, Debug, Default)]
pub struct SceneArtifacts {
    pub stars: String,
    pub planets: String,
    pub tour: String,
    pub star_records: usize,
    pub planet_records: usize,
    pub orbits: usize,
    pub tour_steps: usize,
}

/// Result of a full run
#[derive(Debug)]
pub struct ExportSummary {
    pub output_dir: PathBuf,
    pub manifest: ExportManifest,
    pub deploy: Option<DeployReport>,
}

/// Main export pipeline
pub struct ExportPipeline {
    config: ExportConfig,
    choreography: Choreography,
}

impl ExportPipeline {
    pub fn new(config: ExportConfig) -> Self {
        Self { config, choreography: Choreography::default() }
    }

    /// Seeded when configured, otherwise fresh per run
    pub fn rng(&self) -> ChaChaRng {
        ChaChaRng::seed_from_u64(self.config.seed.unwrap_or_else(rand::random))
    }

    fn textures(&self) -> TextureChoice {
        match &self.config.texture {
            Some(texture) => TextureChoice::Fixed(texture.clone()),
            None => TextureChoice::default(),
        }
    }

    fn progress_bar(&self, len: usize) -> Result<ProgressBar> {
        if !self.config.progress {
            return Ok(ProgressBar::hidden());
        }
        let pb = ProgressBar::new(len as u64);
        pb.set_style(ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40}] {pos}/{len} rows",
        )?);
        Ok(pb)
    }

    /// Load candidates, derive missing quantities and join predictions
    pub fn load_rows(&self, rng: &mut ChaChaRng) -> Result<(Vec<MergedRow>, ExportCounts)> {
        let schema = self.config.schema;
        let load = schema.load_candidates(&self.config.catalog, rng)?;

        let predictions = match &self.config.predictions {
            Some(path) => PredictionTable::load_csv(path, schema)?,
            None => {
                tracing::info!("No prediction table, every row is unknown");
                PredictionTable::new()
            }
        };

        let counts = ExportCounts {
            catalog_rows: load.total,
            candidates: load.rows.len(),
            ..Default::default()
        };
        let rows = merge_predictions(enrich(load.rows), &predictions);
        Ok((rows, counts))
    }

    /// Run the three generators over the merged rows
    pub fn generate(&self, rows: &[MergedRow], rng: &mut ChaChaRng) -> Result<SceneArtifacts> {
        let pb = self.progress_bar(rows.len())?;

        let mut stars = StarGenerator::new();
        let mut planets = PlanetGenerator::new(rng, self.textures());
        let mut tour = TourGenerator::new(self.choreography);

        for row in rows {
            stars.push(row);
            planets.push(row);
            tour.push(row);
            pb.inc(1);
        }
        pb.finish_and_clear();

        let (star_records, planet_records, orbits, tour_steps) =
            (stars.records(), planets.records(), planets.orbits(), tour.records());

        tracing::info!(
            "Generated {} stars, {} planets ({} with orbits), {} tour steps",
            star_records, planet_records, orbits, tour_steps
        );

        Ok(SceneArtifacts {
            stars: stars.finish(),
            planets: planets.finish(),
            tour: tour.finish(),
            star_records,
            planet_records,
            orbits,
            tour_steps,
        })
    }

    /// Write artifacts into the output directory
    pub fn write(&self, artifacts: &SceneArtifacts) -> Result<()> {
        let root = &self.config.output_dir;
        let layout = self.config.layout();

        std::fs::create_dir_all(layout.tour_dir_path(root))
            .with_context(|| format!("Failed to create output directory: {}", root.display()))?;

        for (path, text) in [
            (layout.star_path(root), &artifacts.stars),
            (layout.planet_path(root), &artifacts.planets),
            (layout.tour_path(root), &artifacts.tour),
        ] {
            std::fs::write(&path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {:?}", path);
        }
        Ok(())
    }

    pub fn run(&self) -> Result<ExportSummary> {
        let mut rng = self.rng();
        let (rows, mut counts) = self.load_rows(&mut rng)?;
        let artifacts = self.generate(&rows, &mut rng)?;
        self.write(&artifacts)?;

        counts.predictions_matched = rows.iter().filter(|r| r.matched).count();
        counts.star_records = artifacts.star_records;
        counts.planet_records = artifacts.planet_records;
        counts.orbits = artifacts.orbits;
        counts.tour_steps = artifacts.tour_steps;

        let layout = self.config.layout();
        let output_dir = self.config.output_dir.clone();
        let manifest = ExportManifest {
            catalog: self.config.catalog.clone(),
            predictions: self.config.predictions.clone(),
            seed: self.config.seed,
            counts,
            ..ExportManifest::new(self.config.schema, layout.clone())
        };
        manifest.save(&output_dir.join(MANIFEST_FILE))?;

        let deploy = self
            .config
            .deploy
            .clone()
            .map(|config| Deployer::new(config).deploy(&output_dir, &layout));

        Ok(ExportSummary { output_dir, manifest, deploy })
    }
}

/// Deploy a previous export using its manifest
pub fn deploy_output(output_dir: &Path, config: DeployConfig) -> Result<DeployReport> {
    let manifest = ExportManifest::load(&output_dir.join(MANIFEST_FILE))?;
    Ok(Deployer::new(config).deploy(output_dir, &manifest.layout))
}
