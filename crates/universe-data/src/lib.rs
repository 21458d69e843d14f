//! Exoplanet catalog ingestion: schema adapters, derived quantities and the
//! prediction merge

pub mod adapter;
pub mod catalog;
pub mod kepler;
pub mod predictions;
pub mod tess;

pub use adapter::{read_candidates, CatalogAdapter, CatalogLoad};
pub use catalog::{
    enrich, CatalogId, CatalogRow, CatalogSchema, DerivedQuantities, Disposition, EnrichedRow,
};
pub use kepler::KeplerAdapter;
pub use predictions::{merge_predictions, MergedRow, Prediction, PredictionLabel, PredictionTable};
pub use tess::TessAdapter;
