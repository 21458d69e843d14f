//! Fixed-factor unit conversions

use crate::constants::*;

/// Earth radii -> kilometers
pub fn earth_radii_to_km(r: f64) -> f64 {
    r * EARTH_RADIUS_KM
}

/// Solar radii -> meters
pub fn solar_radii_to_m(r: f64) -> f64 {
    r * R_SUN
}

/// Parsecs -> light-years
pub fn parsecs_to_light_years(pc: f64) -> f64 {
    pc * LY_PER_PARSEC
}

pub fn days_to_seconds(days: f64) -> f64 {
    days * SECONDS_PER_DAY
}

pub fn meters_to_au(m: f64) -> f64 {
    m / AU
}

/// Surface gravity: log10(g / cm s⁻²) -> m s⁻²
pub fn log_g_cgs_to_si(log_g: f64) -> f64 {
    10.0_f64.powf(log_g) / 100.0
}
