/// Nominal solar radius in meters
pub const R_SUN: f64 = 6.957e8;

/// Nominal solar luminosity in watts
pub const L_SUN: f64 = 3.828e26;

/// Absolute bolometric magnitude of the Sun
pub const M_BOL_SUN: f64 = 4.74;

/// Stefan-Boltzmann constant (W m⁻² K⁻⁴)
pub const SIGMA_SB: f64 = 5.670374419e-8;

/// Newtonian gravitational constant (m³ kg⁻¹ s⁻²)
pub const G: f64 = 6.674e-11;

/// Astronomical unit in meters, as used for catalog conversions
pub const AU: f64 = 1.496e11;

/// Light-years per parsec
pub const LY_PER_PARSEC: f64 = 3.26156;

/// Equatorial Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6378.0;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Distance reported when a star's distance cannot be derived (light-years)
pub const FALLBACK_DISTANCE_LY: f64 = 100.0;
