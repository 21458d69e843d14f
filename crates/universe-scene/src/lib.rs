//! Scene artifacts for the visualization tool: host stars (`.stc`), planets
//! (`.ssc`) and a guided tour script (`.cel`), plus their deployment.

pub mod config;
pub mod deploy;
pub mod entities;
pub mod generator;
pub mod manifest;
pub mod pipeline;
pub mod planets;
pub mod stars;
pub mod tour;

pub use config::{DeployConfig, ExportConfig, OutputLayout};
pub use deploy::{DeployError, DeployReport, Deployer};
pub use entities::{Choreography, Orbit, Planet, Star, TourStep};
pub use generator::{generate, ArtifactGenerator};
pub use manifest::{ExportCounts, ExportManifest};
pub use pipeline::{deploy_output, ExportPipeline, ExportSummary, SceneArtifacts};
pub use planets::{PlanetGenerator, TextureChoice};
pub use stars::StarGenerator;
pub use tour::TourGenerator;

#[cfg(test)]
mod test_support {
    use universe_data::{
        CatalogId, CatalogRow, DerivedQuantities, Disposition, MergedRow, Prediction,
    };

    /// Candidate row with full stellar and orbital data
    pub fn merged(designation: &str) -> MergedRow {
        MergedRow {
            row: CatalogRow {
                id: CatalogId::Kepler { kepid: 1, kepoi_name: designation.to_string() },
                star_id: 1,
                designation: designation.to_string(),
                ra: 291.93423,
                dec: 48.141651,
                stellar_radius: Some(0.927),
                effective_temp: Some(5455.0),
                log_g: Some(4.467),
                apparent_mag: Some(15.347),
                distance_pc: None,
                planet_radius: Some(2.26),
                period: Some(9.488036),
                semimajor_axis: Some(0.0853),
                eccentricity: Some(0.0),
                inclination: Some(89.66),
                disposition: Disposition::Candidate,
            },
            derived: DerivedQuantities { distance_ly: 2500.0, semimajor_axis_au: Some(0.0853) },
            prediction: Prediction::unknown(),
            matched: false,
        }
    }
}
