//! Common shape of the artifact generators

use universe_data::MergedRow;

/// Append-only fold over merged rows producing one text artifact
pub trait ArtifactGenerator {
    /// Feed one row; returns whether a record was emitted
    fn push(&mut self, row: &MergedRow) -> bool;

    /// Records emitted so far
    fn records(&self) -> usize;

    /// Final artifact text
    fn finish(self) -> String
    where
        Self: Sized;
}

/// Run a generator over every row
pub fn generate<G: ArtifactGenerator>(mut generator: G, rows: &[MergedRow]) -> (String, usize) {
    for row in rows {
        generator.push(row);
    }
    let count = generator.records();
    (generator.finish(), count)
}
