use crate::{
    error::SettlementError,
    model::{Balance, Event, Money, ParticipantAllocation, ParticipantId},
};
use fxhash::FxHashMap;

/// Combines allocations with who fronted each venue into paid/owed/balance rows.
pub struct SummaryAggregator;

impl SummaryAggregator {
    /// One row per allocation, in the same order.
    ///
    /// `total_paid` sums the full cost of every venue the participant paid for.
    /// `total_owed` is taken as-is from the allocation; no further rounding.
    pub fn summarize<'a>(
        &self,
        event: &'a Event,
        allocations: &[ParticipantAllocation<'a>],
    ) -> Result<Vec<Balance<'a>>, SettlementError> {
        let mut paid: FxHashMap<ParticipantId, Money> = allocations
            .iter()
            .map(|allocation| (allocation.participant, Money::ZERO))
            .collect();

        for venue in &event.venues {
            let Some(total) = paid.get_mut(&venue.payer) else {
                return Err(SettlementError::UnmatchedPayer {
                    venue: venue.id,
                    payer: venue.payer,
                });
            };
            *total = total
                .checked_add(venue.total_cost)
                .ok_or(SettlementError::AmountOutOfRange)?;
        }

        allocations
            .iter()
            .map(|allocation| {
                let total_paid = paid
                    .get(&allocation.participant)
                    .copied()
                    .unwrap_or(Money::ZERO);
                let balance = total_paid
                    .checked_sub(allocation.total_owed)
                    .ok_or(SettlementError::AmountOutOfRange)?;
                Ok(Balance {
                    participant: allocation.participant,
                    nickname: allocation.nickname,
                    total_paid,
                    total_owed: allocation.total_owed,
                    balance,
                })
            })
            .collect()
    }
}
