//! Core extraction engine: grid access, fuzzy label resolution, the three
//! per-sheet recipes, and the batch driver.

pub mod assumptions;
pub mod batch;
pub mod cash_flow;
pub mod fields;
pub mod grid;
pub mod key_metrics;
pub mod resolver;
pub mod similarity;

pub use batch::process_batch;
pub use grid::Grid;
pub use resolver::LabelIndex;
