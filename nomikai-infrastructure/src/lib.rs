#![warn(clippy::uninlined_format_args)]

pub mod loader;
pub mod planner;

pub use loader::{LoadError, load_event, load_multipliers, parse_event, parse_multipliers};
pub use planner::GreedyTransferPlanner;
