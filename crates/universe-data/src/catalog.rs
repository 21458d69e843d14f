//! Canonical catalog row shared by every schema adapter

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use universe_core::constants::FALLBACK_DISTANCE_LY;
use universe_core::units::parsecs_to_light_years;
use universe_core::{try_estimate_distance, try_estimate_semimajor_axis, DerivationResult};

/// Supported survey schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSchema {
    /// Kepler Objects of Interest (cumulative KOI table)
    Kepler,
    /// TESS Objects of Interest
    Tess,
}

impl CatalogSchema {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Kepler => "kepler",
            Self::Tess => "tess",
        }
    }

    /// Short prefix used for default artifact file names
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::Kepler => "koi",
            Self::Tess => "toi",
        }
    }

    /// Columns of the prediction table forming the join key, in key order
    pub fn prediction_key_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Kepler => &["kepid", "kepoi_name"],
            Self::Tess => &["toi"],
        }
    }

    pub fn prediction_label_column(&self) -> &'static str {
        match self {
            Self::Kepler => "koi_disposition_pred",
            Self::Tess => "tfopwg_disp_pred",
        }
    }

    pub fn prediction_value_column(&self) -> &'static str {
        match self {
            Self::Kepler => "koi_disposition_pred_value",
            Self::Tess => "tfopwg_disp_pred_value",
        }
    }
}

impl fmt::Display for CatalogSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CatalogSchema {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kepler" | "koi" => Ok(Self::Kepler),
            "tess" | "toi" => Ok(Self::Tess),
            other => anyhow::bail!("Unknown catalog schema '{}'. Use: kepler, tess", other),
        }
    }
}

/// Catalog-specific primary key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogId {
    /// Kepler host-star id plus KOI designation
    Kepler { kepid: u64, kepoi_name: String },
    /// TOI designation as written in the catalog
    Tess { toi: String },
}

impl CatalogId {
    /// Key used to join against the prediction table
    pub fn join_key(&self) -> String {
        match self {
            Self::Kepler { kepid, kepoi_name } => {
                join_key_parts(&[kepid.to_string().as_str(), kepoi_name.as_str()])
            }
            Self::Tess { toi } => join_key_parts(&[toi.as_str()]),
        }
    }
}

/// Build a join key from its column values
pub fn join_key_parts(parts: &[&str]) -> String {
    parts.iter().map(|p| p.trim()).collect::<Vec<_>>().join(":")
}

/// Catalog disposition status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disposition {
    Candidate,
    Confirmed,
    FalsePositive,
    Other,
}

/// One candidate row in canonical units
#[derive(Debug, Clone)]
pub struct CatalogRow {
    pub id: CatalogId,
    /// Numeric host-star id (catalog-native or synthesized)
    pub star_id: u64,
    /// Planet designation, e.g. `K00752.01` or `TOI-1000.01`
    pub designation: String,
    /// Right ascension in degrees
    pub ra: f64,
    /// Declination in degrees
    pub dec: f64,
    /// Stellar radius in solar radii
    pub stellar_radius: Option<f64>,
    /// Effective temperature in kelvin
    pub effective_temp: Option<f64>,
    /// Surface gravity, log10(cm s⁻²)
    pub log_g: Option<f64>,
    pub apparent_mag: Option<f64>,
    /// Catalog distance in parsecs
    pub distance_pc: Option<f64>,
    /// Planet radius in Earth radii
    pub planet_radius: Option<f64>,
    /// Orbital period in days
    pub period: Option<f64>,
    /// Catalog semi-major axis in AU
    pub semimajor_axis: Option<f64>,
    pub eccentricity: Option<f64>,
    /// Inclination in degrees
    pub inclination: Option<f64>,
    pub disposition: Disposition,
}

/// Quantities the exporter derives when the catalog does not carry them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedQuantities {
    pub distance_ly: f64,
    /// `None` suppresses the orbit block
    pub semimajor_axis_au: Option<f64>,
}

impl CatalogRow {
    /// Catalog distance converted to light-years, otherwise the photometric estimate.
    pub fn try_distance_ly(&self) -> DerivationResult<f64> {
        match finite(self.distance_pc) {
            Some(pc) if pc > 0.0 => Ok(parsecs_to_light_years(pc)),
            _ => try_estimate_distance(self.stellar_radius, self.effective_temp, self.apparent_mag),
        }
    }

    /// Catalog semi-major axis, otherwise the Kepler's-law estimate.
    pub fn try_semimajor_axis_au(&self) -> DerivationResult<f64> {
        match finite(self.semimajor_axis) {
            Some(a) if a > 0.0 => Ok(a),
            _ => try_estimate_semimajor_axis(self.stellar_radius, self.log_g, self.period),
        }
    }

    pub fn derive(&self) -> DerivedQuantities {
        let distance_ly = self.try_distance_ly().unwrap_or_else(|err| {
            tracing::debug!("{}: distance fallback ({})", self.designation, err);
            FALLBACK_DISTANCE_LY
        });

        let semimajor_axis_au = match self.try_semimajor_axis_au() {
            Ok(a) => Some(a),
            Err(err) => {
                tracing::debug!("{}: no semi-major axis ({})", self.designation, err);
                None
            }
        };

        DerivedQuantities { distance_ly, semimajor_axis_au }
    }

    /// Orbital period if defined and finite
    pub fn period_days(&self) -> Option<f64> {
        finite(self.period)
    }

    /// Planet radius if defined and finite
    pub fn planet_radius_earth(&self) -> Option<f64> {
        finite(self.planet_radius)
    }
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

/// Row with its derived quantities attached
#[derive(Debug, Clone)]
pub struct EnrichedRow {
    pub row: CatalogRow,
    pub derived: DerivedQuantities,
}

impl From<CatalogRow> for EnrichedRow {
    fn from(row: CatalogRow) -> Self {
        let derived = row.derive();
        Self { row, derived }
    }
}

/// Attach derived quantities to every row
pub fn enrich(rows: Vec<CatalogRow>) -> Vec<EnrichedRow> {
    rows.into_iter().map(EnrichedRow::from).collect()
}

#[cfg(test)]
pub(crate) fn test_row(designation: &str) -> CatalogRow {
    CatalogRow {
        id: CatalogId::Kepler { kepid: 1, kepoi_name: designation.to_string() },
        star_id: 1,
        designation: designation.to_string(),
        ra: 291.934230,
        dec: 48.141651,
        stellar_radius: Some(0.927),
        effective_temp: Some(5455.0),
        log_g: Some(4.467),
        apparent_mag: Some(15.347),
        distance_pc: None,
        planet_radius: Some(2.26),
        period: Some(9.488036),
        semimajor_axis: Some(0.0853),
        eccentricity: None,
        inclination: Some(89.66),
        disposition: Disposition::Candidate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_keys() {
        let kepler = CatalogId::Kepler { kepid: 10797460, kepoi_name: "K00752.01".into() };
        assert_eq!(kepler.join_key(), "10797460:K00752.01");

        let tess = CatalogId::Tess { toi: " 1000.01 ".into() };
        assert_eq!(tess.join_key(), "1000.01");
    }

    #[test]
    fn test_schema_from_str() {
        assert_eq!("Kepler".parse::<CatalogSchema>().unwrap(), CatalogSchema::Kepler);
        assert_eq!("toi".parse::<CatalogSchema>().unwrap(), CatalogSchema::Tess);
        assert!("gaia".parse::<CatalogSchema>().is_err());
    }

    #[test]
    fn test_catalog_distance_preferred() {
        let mut row = test_row("K00001.01");
        row.distance_pc = Some(10.0);
        let derived = row.derive();
        assert!((derived.distance_ly - 32.6156).abs() < 1e-9);
    }

    #[test]
    fn test_distance_estimated_without_catalog_value() {
        let row = test_row("K00001.01");
        let derived = row.derive();
        assert!(derived.distance_ly.is_finite());
        assert_ne!(derived.distance_ly, FALLBACK_DISTANCE_LY);
    }

    #[test]
    fn test_distance_fallback() {
        let mut row = test_row("K00001.01");
        row.effective_temp = None;
        assert_eq!(row.derive().distance_ly, FALLBACK_DISTANCE_LY);
    }

    #[test]
    fn test_semimajor_axis_sources() {
        let mut row = test_row("K00001.01");
        assert_eq!(row.derive().semimajor_axis_au, Some(0.0853));

        row.semimajor_axis = None;
        let estimated = row.derive().semimajor_axis_au.unwrap();
        assert!(estimated > 0.0 && estimated < 1.0);

        row.period = None;
        assert_eq!(row.derive().semimajor_axis_au, None);
    }

    #[test]
    fn test_non_positive_catalog_axis_estimated() {
        for bad in [0.0, -0.05] {
            let mut row = test_row("K00001.01");
            row.semimajor_axis = Some(bad);
            let a = row.derive().semimajor_axis_au.unwrap();
            assert!(a > 0.0 && a < 1.0, "a = {}", a);
        }

        let mut row = test_row("K00001.01");
        row.semimajor_axis = Some(0.0);
        row.log_g = None;
        assert_eq!(row.derive().semimajor_axis_au, None);
    }
}
