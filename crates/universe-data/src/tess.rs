//! TESS TOI table

use crate::adapter::CatalogAdapter;
use crate::catalog::{CatalogId, CatalogRow, CatalogSchema, Disposition};
use rand::Rng;
use serde::Deserialize;
use std::ops::Range;

/// Range for star ids synthesized when a TOI record has no TIC id
pub const SYNTHETIC_STAR_ID_RANGE: Range<u64> = 100_000_000..1_000_000_000;

/// TOI CSV record (NASA Exoplanet Archive column names)
#[derive(Debug, Deserialize)]
pub struct ToiRecord {
    pub toi: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub tid: Option<u64>,
    pub tfopwg_disp: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub ra: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub dec: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub st_rad: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub st_teff: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub st_logg: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub st_tmag: Option<f64>,
    /// Distance in parsecs
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub st_dist: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub pl_rade: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub pl_orbper: Option<f64>,
}

pub struct TessAdapter;

impl TessAdapter {
    /// TFOPWG disposition codes
    pub fn parse_disposition(s: &str) -> Disposition {
        match s.trim() {
            "PC" => Disposition::Candidate,
            "CP" | "KP" => Disposition::Confirmed,
            "FP" | "FA" => Disposition::FalsePositive,
            _ => Disposition::Other,
        }
    }
}

impl CatalogAdapter for TessAdapter {
    type Record = ToiRecord;

    const SCHEMA: CatalogSchema = CatalogSchema::Tess;

    fn disposition(record: &ToiRecord) -> Disposition {
        Self::parse_disposition(&record.tfopwg_disp)
    }

    fn to_row<R: Rng + ?Sized>(record: ToiRecord, rng: &mut R) -> Option<CatalogRow> {
        let ra = record.ra?;
        let dec = record.dec?;
        let star_id = record
            .tid
            .unwrap_or_else(|| rng.random_range(SYNTHETIC_STAR_ID_RANGE));

        Some(CatalogRow {
            star_id,
            designation: format!("TOI-{}", record.toi),
            ra,
            dec,
            stellar_radius: record.st_rad,
            effective_temp: record.st_teff,
            log_g: record.st_logg,
            apparent_mag: record.st_tmag,
            distance_pc: record.st_dist,
            planet_radius: record.pl_rade,
            period: record.pl_orbper,
            semimajor_axis: None,
            eccentricity: None,
            inclination: None,
            disposition: Self::disposition(&record),
            id: CatalogId::Tess { toi: record.toi },
        })
    }
}
