//! Closed-form estimators for quantities the catalogs leave out
//!
//! Each estimator comes in two flavours: `try_*` returns the reason a value
//! could not be derived, the plain form collapses failures into the fallback
//! the exporter writes (100 ly for distance, `None` for semi-major axis).

use crate::constants::*;
use crate::error::{DerivationError, DerivationResult};
use crate::units::*;
use std::f64::consts::PI;

fn require(name: &'static str, value: Option<f64>) -> DerivationResult<f64> {
    let v = value.ok_or(DerivationError::MissingInput(name))?;
    finite(name, v)
}

fn require_positive(name: &'static str, value: Option<f64>) -> DerivationResult<f64> {
    let v = require(name, value)?;
    positive(name, v)
}

fn finite(name: &'static str, v: f64) -> DerivationResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(DerivationError::NonFinite(name))
    }
}

fn positive(name: &'static str, v: f64) -> DerivationResult<f64> {
    if v > 0.0 {
        Ok(v)
    } else {
        Err(DerivationError::NonPositive(name, v))
    }
}

/// Stellar luminosity in watts: L = 4π R² σ T⁴
pub fn luminosity(radius_solar: f64, temp_k: f64) -> f64 {
    let r = solar_radii_to_m(radius_solar);
    4.0 * PI * r * r * SIGMA_SB * temp_k.powi(4)
}

/// Absolute bolometric magnitude from luminosity in watts
pub fn absolute_magnitude(luminosity_w: f64) -> f64 {
    M_BOL_SUN - 2.5 * (luminosity_w / L_SUN).log10()
}

/// Stellar mass in kg from surface gravity and radius: M = g R² / G
pub fn stellar_mass_kg(radius_solar: f64, log_g_cgs: f64) -> f64 {
    let g = log_g_cgs_to_si(log_g_cgs);
    let r = solar_radii_to_m(radius_solar);
    g * r * r / G
}

/// Distance in light-years from the distance modulus of a blackbody star.
pub fn try_estimate_distance(
    radius_solar: Option<f64>,
    temp_k: Option<f64>,
    apparent_mag: Option<f64>,
) -> DerivationResult<f64> {
    let r = require_positive("stellar radius", radius_solar)?;
    let t = require_positive("effective temperature", temp_k)?;
    let m = require("apparent magnitude", apparent_mag)?;

    let l = positive("luminosity", finite("luminosity", luminosity(r, t))?)?;
    let abs_mag = finite("absolute magnitude", absolute_magnitude(l))?;

    let d_pc = 10.0_f64.powf((m - abs_mag + 5.0) / 5.0);
    let d_pc = positive("distance", finite("distance", d_pc)?)?;

    finite("distance", parsecs_to_light_years(d_pc))
}

/// Distance in light-years, or [`FALLBACK_DISTANCE_LY`] when it cannot be derived
pub fn estimate_distance(
    radius_solar: Option<f64>,
    temp_k: Option<f64>,
    apparent_mag: Option<f64>,
) -> f64 {
    try_estimate_distance(radius_solar, temp_k, apparent_mag).unwrap_or(FALLBACK_DISTANCE_LY)
}

/// Semi-major axis in AU via Kepler's third law, with the stellar mass taken
/// from surface gravity and radius.
pub fn try_estimate_semimajor_axis(
    radius_solar: Option<f64>,
    log_g_cgs: Option<f64>,
    period_days: Option<f64>,
) -> DerivationResult<f64> {
    let r = require_positive("stellar radius", radius_solar)?;
    let log_g = require("surface gravity", log_g_cgs)?;
    let p = require_positive("orbital period", period_days)?;

    let mass = positive("stellar mass", finite("stellar mass", stellar_mass_kg(r, log_g))?)?;
    let p_s = days_to_seconds(p);

    // a³ = G M P² / 4π²
    let a_m = (G * mass * p_s * p_s / (4.0 * PI * PI)).cbrt();
    let a_au = meters_to_au(a_m);

    positive("semi-major axis", finite("semi-major axis", a_au)?)
}

/// Semi-major axis in AU, `None` when it cannot be derived
pub fn estimate_semimajor_axis(
    radius_solar: Option<f64>,
    log_g_cgs: Option<f64>,
    period_days: Option<f64>,
) -> Option<f64> {
    try_estimate_semimajor_axis(radius_solar, log_g_cgs, period_days).ok()
}
