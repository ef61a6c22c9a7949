use crate::model::{Money, MultiplierKey, ParticipantId, VenueId};
use thiserror::Error;

/// Why a settlement request was rejected. Nothing is produced when any of these occurs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettlementError {
    #[error("venue {venue} has no attendees to share its cost")]
    NoAttendeesForVenue { venue: VenueId },
    #[error("participant {participant} has attendance {value} in slot {slot}, expected 0..=1")]
    InvalidAttendance {
        participant: ParticipantId,
        slot: usize,
        value: f64,
    },
    #[error("venue {venue} has negative total cost {cost}")]
    InvalidCost { venue: VenueId, cost: Money },
    #[error("venue {venue} is paid by unknown participant {payer}")]
    UnmatchedPayer { venue: VenueId, payer: ParticipantId },
    #[error("participant {participant} appears more than once")]
    DuplicateParticipant { participant: ParticipantId },
    #[error("participant {participant} reuses a nickname already taken in this event")]
    DuplicateNickname { participant: ParticipantId },
    #[error("venue order {order} appears more than once")]
    DuplicateVenueOrder { order: u32 },
    #[error("venue {venue} has order {order}, only orders 1..=3 carry attendance")]
    UnsupportedVenueOrder { venue: VenueId, order: u32 },
    #[error("multiplier {key} is {value}, expected a positive finite number")]
    InvalidMultiplier { key: MultiplierKey, value: f64 },
    #[error("computed amount does not fit in a whole currency amount")]
    AmountOutOfRange,
}
