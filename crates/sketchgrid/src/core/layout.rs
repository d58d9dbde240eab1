//! Core layout trait for diagram positioning

use anyhow::Result;

use super::Database;

/// Core trait for layout algorithms
///
/// A layout turns a filled database into integer grid geometry. It never
/// mutates the database; the positioned result is a separate value.
pub trait LayoutAlgorithm<D: Database>: Send + Sync {
    /// The output type of this layout algorithm
    type Output;

    /// Arrange elements in the database using this layout algorithm
    fn layout(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this layout algorithm
    fn name(&self) -> &'static str;

    /// Get the version of this layout algorithm
    fn version(&self) -> &'static str;
}
