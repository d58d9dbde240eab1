//! Plugin implementations for the supported diagram types
//!
//! Each plugin implements the core traits for its diagram type; the
//! dispatcher picks one from the input text.

pub mod dispatcher;
pub mod flowchart;
pub mod sequence;

pub use dispatcher::*;
pub use flowchart::*;
pub use sequence::{
    Message, MessageRow, Participant, ParticipantColumn, SequenceDatabase, SequenceDetector,
    SequenceLayoutAlgorithm, SequenceLayoutConfig, SequenceLayoutResult, SequenceParser,
    SequenceRenderer,
};
