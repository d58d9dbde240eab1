//! Sequence diagram plugin
//!
//! Participants become columns with lifelines; messages become horizontal
//! arrows stacked in declaration order.
//!
//! Syntax examples:
//! ```text
//! sequenceDiagram
//!     participant A as Alice
//!     A->>Bob: Hello
//!     Bob-->>A: Hi there
//! ```

mod database;
mod detector;
mod layout;
mod parser;
mod renderer;
pub mod syntax;

pub use database::{Message, Participant, SequenceDatabase};
pub use detector::SequenceDetector;
pub use layout::{
    MessageRow, ParticipantColumn, SequenceLayoutAlgorithm, SequenceLayoutConfig,
    SequenceLayoutResult,
};
pub use parser::SequenceParser;
pub use renderer::SequenceRenderer;
