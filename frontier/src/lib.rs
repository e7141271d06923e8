/// Defaults for an expansion run, and the command line arguments that override them.
pub mod config;
/// Breadth-wise expansion of the position tree, one ply per round.
pub mod frontier;
/// Console output of a run.
pub mod report;

pub use config::*;
pub use frontier::*;
pub use report::*;
