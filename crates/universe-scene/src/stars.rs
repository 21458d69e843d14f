//! Host star artifact

use crate::entities::Star;
use crate::generator::ArtifactGenerator;
use std::collections::HashSet;
use universe_data::MergedRow;

/// Emits one record per distinct star name; the first occurrence wins.
#[derive(Debug, Default)]
pub struct StarGenerator {
    written: HashSet<String>,
    buffer: String,
    count: usize,
}

impl StarGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactGenerator for StarGenerator {
    fn push(&mut self, row: &MergedRow) -> bool {
        let star = Star::from_row(row);
        if !self.written.insert(star.name.clone()) {
            tracing::debug!("Duplicate star {}, keeping first", star.name);
            return false;
        }

        self.buffer.push_str(&star.to_string());
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::test_support::merged;

    #[test]
    fn test_star_record_format() {
        let mut row = merged("K00752.01");
        row.row.star_id = 10797460;
        row.row.ra = 291.93423;
        row.row.dec = 48.141651;
        row.row.apparent_mag = Some(15.347);
        row.derived.distance_ly = 1234.5678;

        let (text, count) = generate(StarGenerator::new(), &[row]);
        assert_eq!(count, 1);
        assert_eq!(
            text,
            "10797460 \"Star-K00752.01\" {\n\
             \x20   RA 291.934230\n\
             \x20   Dec 48.141651\n\
             \x20   Distance 1234.57\n\
             \x20   SpectralType \"G0\"\n\
             \x20   AppMag 15.35\n\
             }\n\n"
        );
    }

    #[test]
    fn test_default_magnitude() {
        let mut row = merged("K00001.01");
        row.row.apparent_mag = None;
        let (text, _) = generate(StarGenerator::new(), &[row]);
        assert!(text.contains("AppMag 12.00\n"));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let mut first = merged("K00001.01");
        first.row.ra = 10.0;
        let mut second = merged("K00001.01");
        second.row.ra = 20.0;
        let other = merged("K00002.01");

        let (text, count) = generate(StarGenerator::new(), &[first, second, other]);
        assert_eq!(count, 2);
        assert_eq!(text.matches("\"Star-K00001.01\"").count(), 1);
        assert!(text.contains("RA 10.000000"));
        assert!(!text.contains("RA 20.000000"));
    }

    #[test]
    fn test_star_emitted_without_planet_radius() {
        let mut row = merged("K00003.01");
        row.row.planet_radius = None;
        let (_, count) = generate(StarGenerator::new(), &[row]);
        assert_eq!(count, 1);
    }
}
