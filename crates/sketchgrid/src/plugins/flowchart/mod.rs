//! Flowchart diagram plugin
//!
//! Node/edge diagrams introduced by `graph` or `flowchart`, laid out in
//! layers and drawn as boxes joined by straight or elbowed connectors.

mod database;
mod detector;
mod layout;
mod parser;
mod renderer;
pub mod syntax;

pub use database::*;
pub use detector::*;
pub use layout::*;
pub use parser::*;
pub use renderer::*;
