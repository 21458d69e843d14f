//! Schema adapters: candidate selection and column mapping

use crate::catalog::{CatalogRow, CatalogSchema, Disposition};
use crate::kepler::KeplerAdapter;
use crate::tess::TessAdapter;

use anyhow::{Context, Result};
use rand::Rng;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Maps one survey's CSV export onto [`CatalogRow`]
pub trait CatalogAdapter {
    /// Raw CSV record
    type Record: DeserializeOwned;

    const SCHEMA: CatalogSchema;

    fn disposition(record: &Self::Record) -> Disposition;

    /// Convert a raw record; `None` if the record has no usable sky position.
    /// `rng` supplies star ids for schemas that carry none.
    fn to_row<R: Rng + ?Sized>(record: Self::Record, rng: &mut R) -> Option<CatalogRow>;
}

/// Candidate rows from one catalog read
#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub rows: Vec<CatalogRow>,
    /// Records read, before candidate filtering
    pub total: usize,
}

/// Build a CSV reader that skips `#` comment lines
pub fn csv_reader<Rd: Read>(reader: Rd) -> csv::Reader<Rd> {
    csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Read candidate rows for adapter `A` from any CSV source
pub fn read_candidates<A, Rd, R>(reader: Rd, rng: &mut R) -> Result<CatalogLoad>
where
    A: CatalogAdapter,
    Rd: Read,
    R: Rng + ?Sized,
{
    let mut csv = csv_reader(reader);
    let mut rows = Vec::new();
    let mut total = 0;

    for (line, result) in csv.deserialize::<A::Record>().enumerate() {
        let record = result
            .with_context(|| format!("Malformed {} record #{}", A::SCHEMA, line + 1))?;
        total += 1;

        if A::disposition(&record) != Disposition::Candidate {
            continue;
        }

        match A::to_row(record, rng) {
            Some(row) => rows.push(row),
            None => tracing::warn!("Skipping {} record #{}: no RA/Dec", A::SCHEMA, line + 1),
        }
    }

    tracing::info!("{}: {} candidates out of {} records", A::SCHEMA, rows.len(), total);
    Ok(CatalogLoad { rows, total })
}

impl CatalogSchema {
    /// Load candidate rows from a catalog CSV on disk
    pub fn load_candidates<R: Rng + ?Sized>(&self, path: &Path, rng: &mut R) -> Result<CatalogLoad> {
        tracing::info!("Loading {} catalog from {:?}", self, path);
        let file = File::open(path)
            .with_context(|| format!("Failed to open catalog: {}", path.display()))?;
        self.read_candidates(file, rng)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))
    }

    pub fn read_candidates<Rd: Read, R: Rng + ?Sized>(&self, reader: Rd, rng: &mut R) -> Result<CatalogLoad> {
        match self {
            Self::Kepler => read_candidates::<KeplerAdapter, _, _>(reader, rng),
            Self::Tess => read_candidates::<TessAdapter, _, _>(reader, rng),
        }
    }
}
