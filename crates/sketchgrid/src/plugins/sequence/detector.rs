//! Sequence diagram detector

use super::syntax;
use crate::core::{Detector, DiagramKind};

/// Detector for the `sequenceDiagram` header
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceDetector;

impl SequenceDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for SequenceDetector {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Sequence
    }

    fn is_header(&self, line: &str) -> bool {
        syntax::is_header(line)
    }
}
