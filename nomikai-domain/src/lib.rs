#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod services;

pub use error::SettlementError;
pub use model::{
    AllocationBreakdown, AllocationFactors, Attendance, Balance, Event, Gender, Money,
    MultiplierConfig, MultiplierKey, OutstandingBalance, Participant, ParticipantAllocation,
    ParticipantId, Role, Settlement, Transfer, Venue, VenueId, apply_transfers,
};
pub use services::{AllocationEngine, EventValidator, MultiplierResolver, SummaryAggregator};
