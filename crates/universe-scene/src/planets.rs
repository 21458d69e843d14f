//! Planet artifact

use crate::entities::Planet;
use crate::generator::ArtifactGenerator;
use rand::Rng;
use std::collections::HashSet;
use universe_data::MergedRow;

/// Cosmetic textures a planet may be drawn with
pub const DEFAULT_TEXTURES: &[&str] = &[
    "neptune.jpg",
    "uranus.jpg",
    "jupiter.jpg",
    "saturn.jpg",
    "venus.jpg",
    "mars.jpg",
    "moon.jpg",
    "io.jpg",
];

/// How planet textures are picked
#[derive(Debug, Clone, PartialEq)]
pub enum TextureChoice {
    /// Same texture for every planet
    Fixed(String),
    /// Uniform pick per planet
    Palette(Vec<String>),
}

impl Default for TextureChoice {
    fn default() -> Self {
        Self::Palette(DEFAULT_TEXTURES.iter().map(|t| t.to_string()).collect())
    }
}

impl TextureChoice {
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self {
            Self::Fixed(texture) => texture.clone(),
            Self::Palette(palette) if palette.is_empty() => DEFAULT_TEXTURES[0].to_string(),
            Self::Palette(palette) => palette[rng.random_range(0..palette.len())].clone(),
        }
    }
}

/// Emits one record per row with a planet radius, skipping repeated designations.
pub struct PlanetGenerator<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
    textures: TextureChoice,
    written: HashSet<String>,
    buffer: String,
    count: usize,
    orbits: usize,
}

impl<'a, R: Rng + ?Sized> PlanetGenerator<'a, R> {
    pub fn new(rng: &'a mut R, textures: TextureChoice) -> Self {
        Self {
            rng,
            textures,
            written: HashSet::new(),
            buffer: String::new(),
            count: 0,
            orbits: 0,
        }
    }

    /// Records that carry an orbit block
    pub fn orbits(&self) -> usize {
        self.orbits
    }
}

impl<R: Rng + ?Sized> ArtifactGenerator for PlanetGenerator<'_, R> {
    fn push(&mut self, row: &MergedRow) -> bool {
        let designation = &row.row.designation;
        if row.row.planet_radius_earth().is_none() {
            tracing::debug!("{}: no planet radius, skipping", designation);
            return false;
        }
        if self.written.contains(designation) {
            tracing::debug!("Duplicate planet {}, keeping first", designation);
            return false;
        }

        let texture = self.textures.pick(&mut *self.rng);
        let Some(planet) = Planet::from_row(row, texture) else {
            return false;
        };

        if planet.orbit.is_some() {
            self.orbits += 1;
        }
        self.written.insert(designation.clone());
        self.buffer.push_str(&planet.to_string());
        self.buffer.push_str("\n\n");
        self.count += 1;
        true
    }

    fn records(&self) -> usize {
        self.count
    }

    fn finish(self) -> String {
        self.buffer
    }
}
