//! Shared physics for the exoplanet scene exporter

pub mod constants;
pub mod error;
pub mod estimators;
pub mod units;

pub use error::{DerivationError, DerivationResult};
pub use estimators::{
    estimate_distance, estimate_semimajor_axis, try_estimate_distance,
    try_estimate_semimajor_axis,
};
