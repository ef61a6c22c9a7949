use crate::{
    error::SettlementError,
    model::{
        AllocationBreakdown, AllocationFactors, Event, Money, MultiplierConfig, MultiplierKey,
        ParticipantAllocation, Venue,
    },
    services::MultiplierResolver,
};
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};

/// Weighted proportional cost sharing.
///
/// For each venue, an attendee's weight is `attendance * gender * role`.
/// Their share is `cost * attendance / total_weight * gender * role`, so the
/// shares of one venue always add back up to its cost before rounding.
///
/// Breakdown amounts are rounded half-up for display. The per-participant
/// total accumulates unrounded shares and is rounded once at the end.
pub struct AllocationEngine;

struct Weighting {
    gender: f64,
    role: f64,
    multiplier: Decimal,
}

impl AllocationEngine {
    /// Allocates every venue of `event`. The result follows participant input order;
    /// each breakdown follows venue order.
    ///
    /// Fails with [`SettlementError::NoAttendeesForVenue`] if any venue has zero total weight.
    pub fn allocate<'a>(
        &self,
        event: &'a Event,
        config: &MultiplierConfig,
    ) -> Result<Vec<ParticipantAllocation<'a>>, SettlementError> {
        let resolver = MultiplierResolver::new(config);
        let weightings = event
            .participants
            .iter()
            .map(|participant| {
                let gender = resolver.gender(participant.gender);
                let role = resolver.role(participant.role);
                let gender_dec = to_multiplier(MultiplierKey::Gender(participant.gender), gender)?;
                let role_dec = to_multiplier(MultiplierKey::Role(participant.role), role)?;
                let multiplier = gender_dec
                    .checked_mul(role_dec)
                    .ok_or(SettlementError::AmountOutOfRange)?;
                Ok(Weighting {
                    gender,
                    role,
                    multiplier,
                })
            })
            .collect::<Result<Vec<_>, SettlementError>>()?;

        let present: Vec<usize> = event
            .participants
            .iter()
            .enumerate()
            .filter(|(_, participant)| !participant.attendance.is_absent_everywhere())
            .map(|(idx, _)| idx)
            .collect();

        let mut venues: Vec<&Venue> = event.venues.iter().collect();
        venues.sort_by_key(|venue| venue.order);

        let mut breakdowns: Vec<Vec<AllocationBreakdown>> = vec![Vec::new(); weightings.len()];
        let mut unrounded_totals = vec![Decimal::ZERO; weightings.len()];

        for venue in venues {
            let slot = usize::try_from(venue.order).unwrap_or(usize::MAX);
            let mut attendees: Vec<(usize, f64, Decimal)> = Vec::new();
            for &idx in &present {
                let participant = &event.participants[idx];
                let rate = participant.attendance.for_order(venue.order).unwrap_or(0.0);
                if rate == 0.0 {
                    continue;
                }
                let rate_dec = Decimal::from_f64(rate).ok_or(SettlementError::InvalidAttendance {
                    participant: participant.id,
                    slot,
                    value: rate,
                })?;
                attendees.push((idx, rate, rate_dec));
            }

            let total_weight = attendees.iter().try_fold(Decimal::ZERO, |acc, (idx, _, rate)| {
                rate.checked_mul(weightings[*idx].multiplier)
                    .and_then(|weight| acc.checked_add(weight))
                    .ok_or(SettlementError::AmountOutOfRange)
            })?;
            if total_weight.is_zero() {
                return Err(SettlementError::NoAttendeesForVenue { venue: venue.id });
            }

            tracing::trace!(
                venue = %venue.id,
                order = venue.order,
                attendee_count = attendees.len(),
                total_weight = %total_weight,
                "Allocating venue cost"
            );

            let cost = Decimal::from(venue.total_cost.amount());
            for (idx, rate, rate_dec) in attendees {
                let weighting = &weightings[idx];
                let base = cost
                    .checked_mul(rate_dec)
                    .and_then(|value| value.checked_div(total_weight))
                    .ok_or(SettlementError::AmountOutOfRange)?;
                let adjusted = base
                    .checked_mul(weighting.multiplier)
                    .ok_or(SettlementError::AmountOutOfRange)?;

                breakdowns[idx].push(AllocationBreakdown {
                    venue: venue.id,
                    venue_order: venue.order,
                    base_amount: round_to_money(base)?,
                    adjusted_amount: round_to_money(adjusted)?,
                    factors: AllocationFactors {
                        attendance: rate,
                        gender_multiplier: weighting.gender,
                        role_multiplier: weighting.role,
                    },
                });
                unrounded_totals[idx] = unrounded_totals[idx]
                    .checked_add(adjusted)
                    .ok_or(SettlementError::AmountOutOfRange)?;
            }
        }

        event
            .participants
            .iter()
            .zip(breakdowns)
            .zip(unrounded_totals)
            .map(|((participant, breakdown), total)| {
                Ok(ParticipantAllocation {
                    participant: participant.id,
                    nickname: participant.nickname.as_str(),
                    breakdown,
                    total_owed: round_to_money(total)?,
                })
            })
            .collect()
    }
}

fn to_multiplier(key: MultiplierKey, value: f64) -> Result<Decimal, SettlementError> {
    Decimal::from_f64(value).ok_or(SettlementError::InvalidMultiplier { key, value })
}

/// Rounds half-up to whole currency units.
fn round_to_money(value: Decimal) -> Result<Money, SettlementError> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .map(Money::from_i64)
        .ok_or(SettlementError::AmountOutOfRange)
}
