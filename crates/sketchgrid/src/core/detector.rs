//! Core detector trait for diagram type identification

use super::DiagramKind;

/// Core trait for diagram type detectors
///
/// Detection is purely textual and runs before any parser is invoked. A
/// detector only recognizes the header line that decides its own kind;
/// [`first_header`] weighs several detectors against each other.
///
/// # Example
/// ```
/// use sketchgrid::core::{first_header, Detector, DiagramKind};
/// use sketchgrid::plugins::flowchart::FlowchartDetector;
/// use sketchgrid::plugins::sequence::SequenceDetector;
///
/// let detectors: [&dyn Detector; 2] = [&SequenceDetector, &FlowchartDetector];
/// assert_eq!(
///     first_header(&detectors, "sequenceDiagram\nA->>B: Hi"),
///     Some(DiagramKind::Sequence)
/// );
/// assert_eq!(first_header(&detectors, "A->>B: Hi"), None);
/// ```
pub trait Detector: Send + Sync {
    /// The diagram kind this detector recognizes
    fn kind(&self) -> DiagramKind;

    /// Returns true if the trimmed line is this kind's deciding header
    fn is_header(&self, line: &str) -> bool;
}

/// Kind of the first line, top to bottom, that some detector claims
pub fn first_header(detectors: &[&dyn Detector], input: &str) -> Option<DiagramKind> {
    input.lines().map(str::trim).find_map(|line| {
        detectors
            .iter()
            .find(|detector| detector.is_header(line))
            .map(|detector| detector.kind())
    })
}
