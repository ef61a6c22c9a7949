#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod ports;
pub mod settlement_processor;

pub use model::SettlementReport;
pub use nomikai_domain::SettlementError;
pub use ports::TransferPlanner;
pub use settlement_processor::SettlementProcessor;
