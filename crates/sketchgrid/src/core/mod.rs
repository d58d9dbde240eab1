//! Core abstractions for diagram processing
//!
//! Pipeline traits shared by every diagram type, plus the canvas, glyph
//! tables and small helpers the renderers draw with.

mod canvas;
pub mod chumsky_utils;
mod database;
mod detector;
mod error;
mod glyphs;
mod layout;
pub mod logging;
mod parser;
mod renderer;
mod text;
mod types;

pub use canvas::*;
pub use database::*;
pub use detector::*;
pub use error::*;
pub use glyphs::*;
pub use layout::*;
pub use logging::{init_logging, LogFormat};
pub use parser::*;
pub use renderer::*;
pub use text::*;
pub use types::*;
