//! Guided tour script

use crate::entities::{Choreography, Planet, TourStep};
use crate::generator::ArtifactGenerator;
use std::collections::HashSet;
use universe_data::MergedRow;

/// Emits one step per planet the planet artifact defines, in row order.
#[derive(Debug, Default)]
pub struct TourGenerator {
    choreography: Choreography,
    written: HashSet<String>,
    steps: Vec<TourStep>,
}

impl TourGenerator {
    pub fn new(choreography: Choreography) -> Self {
        Self { choreography, ..Default::default() }
    }

    pub fn steps(&self) -> &[TourStep] {
        &self.steps
    }
}

impl ArtifactGenerator for TourGenerator {
    fn push(&mut self, row: &MergedRow) -> bool {
        let designation = &row.row.designation;
        if self.written.contains(designation) {
            return false;
        }
        // Texture is irrelevant to the tour
        let Some(planet) = Planet::from_row(row, String::new()) else {
            return false;
        };

        self.written.insert(designation.clone());
        self.steps.push(TourStep::new(&planet, row, self.choreography));
        true
    }

    fn records(&self) -> usize {
        self.steps.len()
    }

    fn finish(self) -> String {
        let mut script = String::from("{\n");
        for step in &self.steps {
            script.push_str(&step.to_string());
            script.push_str("\n\n");
        }
        script.push_str("}\n");
        script
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::prediction_text;
    use crate::generator::generate;
    use crate::test_support::merged;
    use universe_data::{Prediction, PredictionLabel};

    fn caption_for(label: PredictionLabel, confidence: Option<f64>) -> String {
        let mut row = merged("K00001.01");
        row.derived.distance_ly = 1234.5678;
        row.prediction = Prediction::new(label, confidence);
        let mut generator = TourGenerator::default();
        assert!(generator.push(&row));
        generator.steps()[0].caption.clone()
    }

    #[test]
    fn test_confirmed_caption() {
        let caption = caption_for(PredictionLabel::Confirmed, Some(0.87));
        assert!(caption.contains("real exoplanet (confidence 87%)"), "{}", caption);
        assert!(caption.contains("Distance: 1234.57 light-years"));
    }

    #[test]
    fn test_false_positive_caption() {
        let caption = caption_for(PredictionLabel::FalsePositive, Some(0.30));
        assert!(caption.contains("false positive (confidence 70%)"), "{}", caption);
    }

    #[test]
    fn test_percent_halves_round_to_even() {
        assert_eq!(prediction_text(PredictionLabel::Confirmed, Some(0.125)), "real exoplanet (confidence 12%)");
        assert_eq!(prediction_text(PredictionLabel::Confirmed, Some(0.375)), "real exoplanet (confidence 38%)");
        assert_eq!(prediction_text(PredictionLabel::FalsePositive, Some(0.875)), "false positive (confidence 12%)");
    }

    #[test]
    fn test_unknown_caption_has_no_confidence() {
        for (label, confidence) in [
            (PredictionLabel::Unknown, None),
            (PredictionLabel::Unknown, Some(0.99)),
        ] {
            let caption = caption_for(label, confidence);
            assert!(caption.ends_with("Prediction: unknown"), "{}", caption);
            assert!(!caption.contains('%'));
        }
    }

    #[test]
    fn test_step_shape() {
        let (script, count) = generate(TourGenerator::default(), &[merged("K00752.01")]);
        assert_eq!(count, 1);
        assert!(script.starts_with("{\n"));
        assert!(script.ends_with("}\n"));

        let commands: Vec<&str> = script
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && *l != "{" && *l != "}")
            .map(|l| l.split_whitespace().next().unwrap_or(""))
            .collect();
        assert_eq!(commands, ["select", "select", "goto", "wait", "print", "orbit"]);

        assert!(script.contains("select { object \"Star-K00752.01\" }"));
        assert!(script.contains("select { object \"Star-K00752.01/K00752.01\" }"));
    }

    #[test]
    fn test_missing_radius_and_duplicates_skipped() {
        let mut no_radius = merged("K00002.01");
        no_radius.row.planet_radius = None;
        let rows = [merged("K00001.01"), no_radius, merged("K00001.01"), merged("K00003.01")];

        let (script, count) = generate(TourGenerator::default(), &rows);
        assert_eq!(count, 2);
        assert_eq!(script.matches("print {").count(), 2);
        assert!(script.find("K00001.01").unwrap() < script.find("K00003.01").unwrap());
        assert!(!script.contains("K00002.01"));
    }

    #[test]
    fn test_empty_script() {
        assert_eq!(generate(TourGenerator::default(), &[]).0, "{\n}\n");
    }
}
