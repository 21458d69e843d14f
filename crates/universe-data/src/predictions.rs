//! External classifier output and the left join onto catalog rows

use crate::adapter::csv_reader;
use crate::catalog::{join_key_parts, CatalogRow, CatalogSchema, DerivedQuantities, EnrichedRow};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Disposition predicted by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PredictionLabel {
    Confirmed,
    FalsePositive,
    #[default]
    Unknown,
}

impl PredictionLabel {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "CONFIRMED" => Self::Confirmed,
            "FALSE POSITIVE" => Self::FalsePositive,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::FalsePositive => "FALSE POSITIVE",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label plus the classifier's output value in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Prediction {
    pub label: PredictionLabel,
    /// Raw classifier score (probability of "confirmed"); `None` when undefined
    pub confidence: Option<f64>,
}

impl Prediction {
    pub fn new(label: PredictionLabel, confidence: Option<f64>) -> Self {
        Self { label, confidence: normalize_confidence(confidence) }
    }

    pub fn unknown() -> Self {
        Self::default()
    }
}

fn normalize_confidence(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite()).map(|v| v.clamp(0.0, 1.0))
}

/// Prediction table keyed by catalog join key
#[derive(Debug, Clone, Default)]
pub struct PredictionTable {
    records: HashMap<String, Prediction>,
}

impl PredictionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a prediction; an existing key is kept (first occurrence wins).
    pub fn insert(&mut self, key: impl Into<String>, prediction: Prediction) -> bool {
        let key = key.into();
        if self.records.contains_key(&key) {
            tracing::debug!("Duplicate prediction for {}, keeping first", key);
            return false;
        }
        self.records.insert(key, prediction);
        true
    }

    pub fn get(&self, key: &str) -> Option<&Prediction> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load the classifier's CSV output for `schema`
    pub fn load_csv(path: &Path, schema: CatalogSchema) -> Result<Self> {
        tracing::info!("Loading predictions from {:?}", path);
        let file = File::open(path)
            .with_context(|| format!("Failed to open predictions: {}", path.display()))?;
        Self::read_csv(file, schema)
            .with_context(|| format!("Failed to parse predictions: {}", path.display()))
    }

    pub fn read_csv<Rd: Read>(reader: Rd, schema: CatalogSchema) -> Result<Self> {
        let mut csv = csv_reader(reader);
        let headers = csv.headers()?.clone();
        let column = |name: &str| headers.iter().position(|h| h == name);

        let key_columns = schema
            .prediction_key_columns()
            .iter()
            .map(|&name| column(name).with_context(|| format!("Missing key column '{}'", name)))
            .collect::<Result<Vec<_>>>()?;
        let label_column = column(schema.prediction_label_column())
            .with_context(|| format!("Missing label column '{}'", schema.prediction_label_column()))?;
        let value_column = column(schema.prediction_value_column());
        if value_column.is_none() {
            tracing::warn!(
                "No '{}' column, all confidences undefined",
                schema.prediction_value_column()
            );
        }

        let mut table = Self::new();
        for result in csv.records() {
            let record = result?;
            let parts: Vec<&str> = key_columns.iter().map(|&i| record.get(i).unwrap_or("")).collect();
            let label = PredictionLabel::parse(record.get(label_column).unwrap_or(""));
            let confidence = value_column
                .and_then(|i| record.get(i))
                .and_then(|v| v.parse::<f64>().ok());

            table.insert(join_key_parts(&parts), Prediction::new(label, confidence));
        }

        tracing::info!("Loaded {} predictions", table.len());
        Ok(table)
    }
}

/// Catalog row with derived quantities and its prediction
#[derive(Debug, Clone)]
pub struct MergedRow {
    pub row: CatalogRow,
    pub derived: DerivedQuantities,
    pub prediction: Prediction,
    /// Whether the prediction came from the table
    pub matched: bool,
}

/// Left join: every row is kept, unmatched rows get [`Prediction::unknown`].
pub fn merge_predictions(rows: Vec<EnrichedRow>, table: &PredictionTable) -> Vec<MergedRow> {
    let merged: Vec<MergedRow> = rows
        .into_iter()
        .map(|EnrichedRow { row, derived }| {
            let found = table.get(&row.id.join_key()).copied();
            MergedRow {
                row,
                derived,
                prediction: found.unwrap_or_default(),
                matched: found.is_some(),
            }
        })
        .collect();

    let matched = merged.iter().filter(|r| r.matched).count();
    tracing::info!("Matched {} of {} rows against predictions", matched, merged.len());
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{enrich, test_row, CatalogId};

    #[test]
    fn test_label_parsing() {
        assert_eq!(PredictionLabel::parse("CONFIRMED"), PredictionLabel::Confirmed);
        assert_eq!(PredictionLabel::parse(" false positive "), PredictionLabel::FalsePositive);
        assert_eq!(PredictionLabel::parse("CANDIDATE"), PredictionLabel::Unknown);
        assert_eq!(PredictionLabel::parse(""), PredictionLabel::Unknown);
    }

    #[test]
    fn test_confidence_normalized() {
        assert_eq!(Prediction::new(PredictionLabel::Confirmed, Some(1.7)).confidence, Some(1.0));
        assert_eq!(Prediction::new(PredictionLabel::Confirmed, Some(-0.2)).confidence, Some(0.0));
        assert_eq!(Prediction::new(PredictionLabel::Confirmed, Some(f64::NAN)).confidence, None);
    }

    #[test]
    fn test_read_tess_predictions() {
        let csv = "toi,tfopwg_disp_pred,tfopwg_disp_pred_value\n\
                   1001.01,CONFIRMED,0.87\n\
                   1002.01,FALSE POSITIVE,0.3\n\
                   1001.01,FALSE POSITIVE,0.1\n\
                   1003.01,CONFIRMED,oops\n";
        let table = PredictionTable::read_csv(csv.as_bytes(), CatalogSchema::Tess).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(
            table.get("1001.01"),
            Some(&Prediction::new(PredictionLabel::Confirmed, Some(0.87)))
        );
        assert_eq!(table.get("1002.01").unwrap().label, PredictionLabel::FalsePositive);
        assert_eq!(table.get("1003.01").unwrap().confidence, None);
    }

    #[test]
    fn test_read_kepler_compound_key() {
        let csv = "kepid,kepoi_name,koi_disposition_pred,koi_disposition_pred_value\n\
                   10797460,K00752.01,CONFIRMED,0.9\n";
        let table = PredictionTable::read_csv(csv.as_bytes(), CatalogSchema::Kepler).unwrap();
        assert!(table.get("10797460:K00752.01").is_some());
    }

    #[test]
    fn test_missing_label_column_is_error() {
        let csv = "toi,something\n1001.01,x\n";
        assert!(PredictionTable::read_csv(csv.as_bytes(), CatalogSchema::Tess).is_err());
    }

    #[test]
    fn test_missing_value_column_leaves_confidence_undefined() {
        let csv = "toi,tfopwg_disp_pred\n1001.01,CONFIRMED\n";
        let table = PredictionTable::read_csv(csv.as_bytes(), CatalogSchema::Tess).unwrap();
        let p = table.get("1001.01").unwrap();
        assert_eq!(p.label, PredictionLabel::Confirmed);
        assert_eq!(p.confidence, None);
    }

    #[test]
    fn test_left_join_keeps_unmatched() {
        let mut a = test_row("K00001.01");
        a.id = CatalogId::Kepler { kepid: 1, kepoi_name: "K00001.01".into() };
        let mut b = test_row("K00002.01");
        b.id = CatalogId::Kepler { kepid: 2, kepoi_name: "K00002.01".into() };

        let mut table = PredictionTable::new();
        table.insert("1:K00001.01", Prediction::new(PredictionLabel::Confirmed, Some(0.87)));

        let merged = merge_predictions(enrich(vec![a, b]), &table);
        assert_eq!(merged.len(), 2);
        assert!(merged[0].matched);
        assert_eq!(merged[0].prediction.label, PredictionLabel::Confirmed);
        assert!(!merged[1].matched);
        assert_eq!(merged[1].prediction, Prediction::unknown());
    }
}
