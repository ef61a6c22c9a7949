use crate::{
    error::SettlementError,
    model::{ATTENDANCE_SLOTS, Event, MultiplierConfig, MultiplierKey, ParticipantId},
};
use fxhash::FxHashSet;

/// Checks an event and its multiplier configuration before any allocation runs.
///
/// The first violation wins: multipliers, then participants in input order,
/// then venues in input order.
pub struct EventValidator;

impl EventValidator {
    pub fn validate(event: &Event, config: &MultiplierConfig) -> Result<(), SettlementError> {
        Self::validate_multipliers(config)?;

        let mut participant_ids: FxHashSet<ParticipantId> = FxHashSet::default();
        let mut nicknames: FxHashSet<&str> = FxHashSet::default();
        for participant in &event.participants {
            if !participant_ids.insert(participant.id) {
                return Err(SettlementError::DuplicateParticipant {
                    participant: participant.id,
                });
            }
            // Transfers are addressed by nickname.
            if !nicknames.insert(participant.nickname.as_str()) {
                return Err(SettlementError::DuplicateNickname {
                    participant: participant.id,
                });
            }
            for (idx, &value) in participant.attendance.slots().iter().enumerate() {
                if !(0.0..=1.0).contains(&value) {
                    return Err(SettlementError::InvalidAttendance {
                        participant: participant.id,
                        slot: idx + 1,
                        value,
                    });
                }
            }
        }

        let mut orders = FxHashSet::default();
        for venue in &event.venues {
            if venue.total_cost.is_negative() {
                return Err(SettlementError::InvalidCost {
                    venue: venue.id,
                    cost: venue.total_cost,
                });
            }
            let tracked = usize::try_from(venue.order)
                .is_ok_and(|order| (1..=ATTENDANCE_SLOTS).contains(&order));
            if !tracked {
                return Err(SettlementError::UnsupportedVenueOrder {
                    venue: venue.id,
                    order: venue.order,
                });
            }
            if !orders.insert(venue.order) {
                return Err(SettlementError::DuplicateVenueOrder { order: venue.order });
            }
            if !participant_ids.contains(&venue.payer) {
                return Err(SettlementError::UnmatchedPayer {
                    venue: venue.id,
                    payer: venue.payer,
                });
            }
        }

        Ok(())
    }

    fn validate_multipliers(config: &MultiplierConfig) -> Result<(), SettlementError> {
        let gender = config
            .gender
            .iter()
            .map(|(gender, value)| (MultiplierKey::Gender(*gender), *value));
        let role = config
            .role
            .iter()
            .map(|(role, value)| (MultiplierKey::Role(*role), *value));

        // Table iteration order is unspecified; report the smallest offending key.
        let mut invalid: Vec<(MultiplierKey, f64)> = gender
            .chain(role)
            .filter(|(_, value)| !value.is_finite() || *value <= 0.0)
            .collect();
        invalid.sort_by_key(|(key, _)| key.to_string());

        match invalid.first() {
            Some(&(key, value)) => Err(SettlementError::InvalidMultiplier { key, value }),
            None => Ok(()),
        }
    }
}
