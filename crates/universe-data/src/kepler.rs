//! Kepler KOI cumulative table

use crate::adapter::CatalogAdapter;
use crate::catalog::{CatalogId, CatalogRow, CatalogSchema, Disposition};
use rand::Rng;
use serde::Deserialize;

/// KOI CSV record (NASA Exoplanet Archive column names)
#[derive(Debug, Deserialize)]
pub struct KoiRecord {
    pub kepid: u64,
    pub kepoi_name: String,
    pub koi_disposition: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub ra: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub dec: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub koi_srad: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub koi_steff: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub koi_slogg: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub koi_kepmag: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub koi_prad: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub koi_period: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub koi_sma: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub koi_eccen: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub koi_incl: Option<f64>,
}

pub struct KeplerAdapter;

impl KeplerAdapter {
    pub fn parse_disposition(s: &str) -> Disposition {
        match s.trim() {
            "CANDIDATE" => Disposition::Candidate,
            "CONFIRMED" => Disposition::Confirmed,
            "FALSE POSITIVE" => Disposition::FalsePositive,
            _ => Disposition::Other,
        }
    }
}

impl CatalogAdapter for KeplerAdapter {
    type Record = KoiRecord;

    const SCHEMA: CatalogSchema = CatalogSchema::Kepler;

    fn disposition(record: &KoiRecord) -> Disposition {
        Self::parse_disposition(&record.koi_disposition)
    }

    fn to_row<R: Rng + ?Sized>(record: KoiRecord, _rng: &mut R) -> Option<CatalogRow> {
        Some(CatalogRow {
            star_id: record.kepid,
            designation: record.kepoi_name.clone(),
            ra: record.ra?,
            dec: record.dec?,
            stellar_radius: record.koi_srad,
            effective_temp: record.koi_steff,
            log_g: record.koi_slogg,
            apparent_mag: record.koi_kepmag,
            distance_pc: None,
            planet_radius: record.koi_prad,
            period: record.koi_period,
            semimajor_axis: record.koi_sma,
            eccentricity: record.koi_eccen,
            inclination: record.koi_incl,
            disposition: Self::disposition(&record),
            id: CatalogId::Kepler { kepid: record.kepid, kepoi_name: record.kepoi_name },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    const KOI_CSV: &str = "\
# This file was produced by the NASA Exoplanet Archive
# COLUMN kepid: KepID
kepid,kepoi_name,koi_disposition,ra,dec,koi_srad,koi_steff,koi_slogg,koi_kepmag,koi_prad,koi_period,koi_sma,koi_eccen,koi_incl
10797460,K00752.01,CONFIRMED,291.934230,48.141651,0.927,5455,4.467,15.347,2.26,9.488036,0.0853,0,89.66
10811496,K00753.01,CANDIDATE,297.004820,48.134129,0.868,5853,4.544,15.436,14.60,19.899140,,,
10848459,K00754.01,FALSE POSITIVE,285.534610,48.285210,0.791,5805,4.564,15.597,33.46,1.736952,0.0267,0,67.09
10854555,K00755.01,CANDIDATE,288.754880,48.226200,1.046,6031,4.438,15.509,2.75,2.525592,0.0374,0,85.31
";

    #[test]
    fn test_candidates_only() {
        let mut rng = ChaChaRng::seed_from_u64(42);
        let load = CatalogSchema::Kepler.read_candidates(KOI_CSV.as_bytes(), &mut rng).unwrap();

        assert_eq!(load.total, 4);
        assert_eq!(load.rows.len(), 2);
        assert_eq!(load.rows[0].designation, "K00753.01");
        assert_eq!(load.rows[1].designation, "K00755.01");
        assert!(load.rows.iter().all(|r| r.disposition == Disposition::Candidate));
    }

    #[test]
    fn test_column_mapping() {
        let mut rng = ChaChaRng::seed_from_u64(42);
        let load = CatalogSchema::Kepler.read_candidates(KOI_CSV.as_bytes(), &mut rng).unwrap();

        let row = &load.rows[1];
        assert_eq!(row.star_id, 10854555);
        assert_eq!(row.id.join_key(), "10854555:K00755.01");
        assert!((row.ra - 288.75488).abs() < 1e-9);
        assert_eq!(row.stellar_radius, Some(1.046));
        assert_eq!(row.apparent_mag, Some(15.509));
        assert_eq!(row.semimajor_axis, Some(0.0374));
        assert_eq!(row.inclination, Some(85.31));
        assert_eq!(row.distance_pc, None);

        // Empty cells become missing values
        let sparse = &load.rows[0];
        assert_eq!(sparse.semimajor_axis, None);
        assert_eq!(sparse.eccentricity, None);
        assert_eq!(sparse.inclination, None);
    }

    #[test]
    fn test_unparseable_number_is_missing() {
        let csv = "kepid,kepoi_name,koi_disposition,ra,dec,koi_prad\n\
                   1,K00001.01,CANDIDATE,10.0,20.0,n/a\n";
        let mut rng = ChaChaRng::seed_from_u64(1);
        let load = CatalogSchema::Kepler.read_candidates(csv.as_bytes(), &mut rng).unwrap();
        assert_eq!(load.rows.len(), 1);
        assert_eq!(load.rows[0].planet_radius, None);
        assert_eq!(load.rows[0].stellar_radius, None);
    }

    #[test]
    fn test_missing_position_skipped() {
        let csv = "kepid,kepoi_name,koi_disposition,ra,dec\n\
                   1,K00001.01,CANDIDATE,,20.0\n\
                   2,K00002.01,CANDIDATE,11.0,21.0\n";
        let mut rng = ChaChaRng::seed_from_u64(1);
        let load = CatalogSchema::Kepler.read_candidates(csv.as_bytes(), &mut rng).unwrap();
        assert_eq!(load.total, 2);
        assert_eq!(load.rows.len(), 1);
        assert_eq!(load.rows[0].designation, "K00002.01");
    }
}
