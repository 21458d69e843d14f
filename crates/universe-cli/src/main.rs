use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use universe_core::constants::FALLBACK_DISTANCE_LY;
use universe_core::{try_estimate_distance, try_estimate_semimajor_axis};
use universe_data::CatalogSchema;
use universe_scene::config::DEFAULT_DEPLOY_DIR;
use universe_scene::{deploy_output, DeployConfig, DeployReport, ExportConfig, ExportPipeline};

#[derive(Parser)]
#[command(name = "universe")]
#[command(about = "Exoplanet candidate catalogs -> visualization scene files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate star, planet and tour artifacts from a catalog
    Export {
        /// JSON config file; flags below override its fields
        #[arg(long)]
        config: Option<PathBuf>,
        /// Catalog schema: kepler, tess
        #[arg(long)]
        schema: Option<String>,
        /// Catalog CSV
        #[arg(short, long)]
        catalog: Option<PathBuf>,
        /// Prediction CSV from the classifier
        #[arg(short, long)]
        predictions: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Seed for reproducible textures and star ids
        #[arg(long)]
        seed: Option<u64>,
        /// Use this texture for every planet
        #[arg(long)]
        texture: Option<String>,
        /// Install the artifacts after generating them
        #[arg(long, default_value = "false")]
        deploy: bool,
        #[arg(long)]
        deploy_dir: Option<PathBuf>,
        /// Copy without sudo
        #[arg(long, default_value = "false")]
        no_sudo: bool,
        #[arg(long, default_value = "false")]
        no_progress: bool,
    },

    /// Install a previous export
    Deploy {
        /// Export output directory (contains export_manifest.json)
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
        #[arg(long, default_value = DEFAULT_DEPLOY_DIR)]
        target: PathBuf,
        #[arg(long, default_value = "false")]
        no_sudo: bool,
    },

    /// Estimate distance and semi-major axis from stellar parameters
    Estimate {
        /// Stellar radius (solar radii)
        #[arg(long)]
        radius: Option<f64>,
        /// Effective temperature (K)
        #[arg(long)]
        teff: Option<f64>,
        /// Apparent magnitude
        #[arg(long, allow_hyphen_values = true)]
        mag: Option<f64>,
        /// Surface gravity, log10(cm/s²)
        #[arg(long)]
        logg: Option<f64>,
        /// Orbital period (days)
        #[arg(long)]
        period: Option<f64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            config, schema, catalog, predictions, output, seed, texture,
            deploy, deploy_dir, no_sudo, no_progress,
        } => {
            let mut cfg = match config {
                Some(path) => ExportConfig::load(&path)?,
                None => ExportConfig::default(),
            };
            if let Some(schema) = schema {
                cfg.schema = schema.parse::<CatalogSchema>()?;
            }
            if let Some(catalog) = catalog {
                cfg.catalog = catalog;
            }
            if predictions.is_some() {
                cfg.predictions = predictions;
            }
            if let Some(output) = output {
                cfg.output_dir = output;
            }
            if seed.is_some() {
                cfg.seed = seed;
            }
            if texture.is_some() {
                cfg.texture = texture;
            }
            if no_progress {
                cfg.progress = false;
            }
            if deploy || deploy_dir.is_some() {
                let mut d = cfg.deploy.take().unwrap_or_default();
                if let Some(dir) = deploy_dir {
                    d.target_dir = dir;
                }
                if no_sudo {
                    d.privileged = false;
                }
                cfg.deploy = Some(d);
            }

            let summary = ExportPipeline::new(cfg).run()?;
            let counts = &summary.manifest.counts;

            println!("Export complete -> {}", summary.output_dir.display());
            println!("  Catalog rows:   {}", counts.catalog_rows);
            println!("  Candidates:     {}", counts.candidates);
            println!("  Predictions:    {} matched", counts.predictions_matched);
            println!("  Stars:          {}", counts.star_records);
            println!("  Planets:        {} ({} with orbits)", counts.planet_records, counts.orbits);
            println!("  Tour steps:     {}", counts.tour_steps);

            if let Some(report) = &summary.deploy {
                print_deploy(report);
            }
        }

        Commands::Deploy { output, target, no_sudo } => {
            let report = deploy_output(&output, DeployConfig { target_dir: target, privileged: !no_sudo })?;
            print_deploy(&report);
        }

        Commands::Estimate { radius, teff, mag, logg, period } => {
            match try_estimate_distance(radius, teff, mag) {
                Ok(d) => println!("Distance:       {:.2} ly", d),
                Err(e) => println!("Distance:       {:.2} ly (fallback: {})", FALLBACK_DISTANCE_LY, e),
            }
            match try_estimate_semimajor_axis(radius, logg, period) {
                Ok(a) => println!("Semi-major axis: {:.6} AU", a),
                Err(e) => println!("Semi-major axis: undefined ({})", e),
            }
        }
    }

    Ok(())
}

fn print_deploy(report: &DeployReport) {
    if report.target_missing {
        println!("Deploy target not found at {}, skipped", report.target.display());
        return;
    }
    println!("Copied {} files to {}", report.copied.len(), report.target.display());
    for (source, err) in &report.failures {
        println!("  Error copying {}: {}", source.display(), err);
    }
}
