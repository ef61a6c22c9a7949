pub mod allocation_engine;
pub mod event_validator;
pub mod multiplier_resolver;
pub mod summary_aggregator;

pub use allocation_engine::AllocationEngine;
pub use event_validator::EventValidator;
pub use multiplier_resolver::{DEFAULT_MULTIPLIER, MultiplierResolver, resolve};
pub use summary_aggregator::SummaryAggregator;
