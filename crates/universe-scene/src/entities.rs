//! Scene entities built from merged catalog rows

use std::fmt;
use universe_core::units::earth_radii_to_km;
use universe_data::{MergedRow, PredictionLabel};

/// Apparent magnitude written when the catalog has none
pub const DEFAULT_APP_MAG: f64 = 12.0;

/// No spectral classification is performed
pub const PLACEHOLDER_SPECTRAL_TYPE: &str = "G0";

/// Quote a name for the scene file formats
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\\\""))
}

/// Host star record
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub id: u64,
    pub name: String,
    pub ra: f64,
    pub dec: f64,
    pub distance_ly: f64,
    pub app_mag: f64,
    pub spectral_type: &'static str,
}

impl Star {
    /// Display name for the host of `designation`
    pub fn display_name(designation: &str) -> String {
        format!("Star-{}", designation)
    }

    pub fn from_row(merged: &MergedRow) -> Self {
        let row = &merged.row;
        Self {
            id: row.star_id,
            name: Self::display_name(&row.designation),
            ra: row.ra,
            dec: row.dec,
            distance_ly: merged.derived.distance_ly,
            app_mag: row.apparent_mag.filter(|m| m.is_finite()).unwrap_or(DEFAULT_APP_MAG),
            spectral_type: PLACEHOLDER_SPECTRAL_TYPE,
        }
    }
}

impl fmt::Display for Star {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} {{", self.id, quoted(&self.name))?;
        writeln!(f, "    RA {:.6}", self.ra)?;
        writeln!(f, "    Dec {:.6}", self.dec)?;
        writeln!(f, "    Distance {:.2}", self.distance_ly)?;
        writeln!(f, "    SpectralType {}", quoted(self.spectral_type))?;
        writeln!(f, "    AppMag {:.2}", self.app_mag)?;
        write!(f, "}}")
    }
}

/// Keplerian orbit block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Days
    pub period: f64,
    /// AU
    pub semimajor_axis: f64,
    pub eccentricity: f64,
    /// Degrees
    pub inclination: f64,
}

impl Orbit {
    /// Present only when both period and semi-major axis are defined
    pub fn from_row(merged: &MergedRow) -> Option<Self> {
        let row = &merged.row;
        let period = row.period_days()?;
        let semimajor_axis = merged.derived.semimajor_axis_au.filter(|a| a.is_finite())?;

        Some(Self {
            period,
            semimajor_axis,
            eccentricity: row.eccentricity.filter(|e| e.is_finite()).unwrap_or(0.0),
            inclination: row.inclination.filter(|i| i.is_finite()).unwrap_or(0.0),
        })
    }
}

/// Planet record; the parent is referenced by star name
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub name: String,
    pub star: String,
    pub radius_km: f64,
    pub texture: String,
    pub orbit: Option<Orbit>,
}

impl Planet {
    /// `None` when the row has no planet radius
    pub fn from_row(merged: &MergedRow, texture: String) -> Option<Self> {
        let radius = merged.row.planet_radius_earth()?;
        Some(Self {
            name: merged.row.designation.clone(),
            star: Star::display_name(&merged.row.designation),
            radius_km: earth_radii_to_km(radius),
            texture,
            orbit: Orbit::from_row(merged),
        })
    }

    /// Object path the tour script selects, `<star>/<planet>`
    pub fn object_path(&self) -> String {
        format!("{}/{}", self.star, self.name)
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", quoted(&self.name), quoted(&self.star))?;
        writeln!(f, "{{")?;
        writeln!(f, "    Class \"Planet\"")?;
        writeln!(f, "    Radius {:.2}", self.radius_km)?;
        writeln!(f, "    Texture {}", quoted(&self.texture))?;

        if let Some(orbit) = &self.orbit {
            writeln!(f, "    EllipticalOrbit")?;
            writeln!(f, "    {{")?;
            writeln!(f, "        Period {:.6}", orbit.period)?;
            writeln!(f, "        SemiMajorAxis {:.6}", orbit.semimajor_axis)?;
            writeln!(f, "        Eccentricity {:.6}", orbit.eccentricity)?;
            writeln!(f, "        Inclination {:.6}", orbit.inclination)?;
            writeln!(f, "    }}")?;
        }

        write!(f, "}}")
    }
}

/// Camera choreography shared by every tour step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Choreography {
    /// Seconds spent travelling to the planet
    pub goto_time: f64,
    /// Final distance in planet radii
    pub goto_distance: f64,
    pub wait: f64,
    pub caption_duration: f64,
    /// Degrees per second
    pub orbit_rate: f64,
    pub orbit_duration: f64,
}

impl Default for Choreography {
    fn default() -> Self {
        Self {
            goto_time: 5.0,
            goto_distance: 6.0,
            wait: 5.0,
            caption_duration: 10.0,
            orbit_rate: 20.0,
            orbit_duration: 10.0,
        }
    }
}

/// One tour stop: fly to a planet, caption it, orbit it
#[derive(Debug, Clone, PartialEq)]
pub struct TourStep {
    pub star: String,
    pub planet: String,
    pub caption: String,
    pub choreography: Choreography,
}

impl TourStep {
    pub fn new(planet: &Planet, merged: &MergedRow, choreography: Choreography) -> Self {
        Self {
            star: planet.star.clone(),
            planet: planet.object_path(),
            caption: caption(&planet.name, &planet.star, merged),
            choreography,
        }
    }
}

/// Prediction sentence for a tour caption
pub fn prediction_text(label: PredictionLabel, confidence: Option<f64>) -> String {
    match (label, confidence) {
        (PredictionLabel::Confirmed, Some(v)) => {
            format!("real exoplanet (confidence {}%)", percent(v))
        }
        (PredictionLabel::Confirmed, None) => "real exoplanet".to_string(),
        (PredictionLabel::FalsePositive, Some(v)) => {
            format!("false positive (confidence {}%)", percent(1.0 - v))
        }
        (PredictionLabel::FalsePositive, None) => "false positive".to_string(),
        (PredictionLabel::Unknown, _) => "unknown".to_string(),
    }
}

/// Whole percent, halves to even
fn percent(v: f64) -> i64 {
    (v * 100.0).round_ties_even() as i64
}

fn caption(planet: &str, star: &str, merged: &MergedRow) -> String {
    format!(
        "{} orbiting {}\\nDistance: {:.2} light-years\\nPrediction: {}",
        planet,
        star,
        merged.derived.distance_ly,
        prediction_text(merged.prediction.label, merged.prediction.confidence),
    )
}

impl fmt::Display for TourStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.choreography;
        writeln!(f, "    select {{ object {} }}", quoted(&self.star))?;
        writeln!(f, "    select {{ object {} }}", quoted(&self.planet))?;
        writeln!(f, "    goto {{ time {} distance {} }}", c.goto_time, c.goto_distance)?;
        writeln!(f, "    wait {{ duration {} }}", c.wait)?;
        writeln!(
            f,
            "    print {{ text {} row -3 column 1 duration {} }}",
            quoted(&self.caption),
            c.caption_duration
        )?;
        write!(
            f,
            "    orbit {{ axis [0 1 0] rate {} duration {} }}",
            c.orbit_rate, c.orbit_duration
        )
    }
}
