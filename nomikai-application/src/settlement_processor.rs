use crate::{model::SettlementReport, ports::TransferPlanner};
use nomikai_domain::{
    AllocationEngine, Event, EventValidator, Money, MultiplierConfig, Settlement, SettlementError,
    SummaryAggregator,
};

/// Runs validation, allocation, summary and transfer planning for one event.
///
/// Holds no state between calls; concurrent use with different inputs is fine.
#[derive(Clone, Copy)]
pub struct SettlementProcessor<'a> {
    planner: &'a dyn TransferPlanner,
}

impl<'a> SettlementProcessor<'a> {
    pub fn new(planner: &'a dyn TransferPlanner) -> Self {
        Self { planner }
    }

    /// Either a complete report or the first validation error; never partial output.
    pub fn process<'b>(
        &self,
        event: &'b Event,
        config: &MultiplierConfig,
    ) -> Result<SettlementReport<'b>, SettlementError> {
        tracing::debug!(
            participant_count = event.participants.len(),
            venue_count = event.venues.len(),
            "Settlement computation started"
        );

        let summary = EventValidator::validate(event, config)
            .and_then(|()| AllocationEngine.allocate(event, config))
            .and_then(|allocations| {
                let balances = SummaryAggregator.summarize(event, &allocations)?;
                let total_cost = event.total_cost()?;
                let total_owed =
                    Money::try_sum(balances.iter().map(|balance| balance.total_owed))?;
                let drift = total_owed
                    .checked_sub(total_cost)
                    .ok_or(SettlementError::AmountOutOfRange)?;
                Ok((allocations, balances, total_cost, total_owed, drift))
            });
        let (allocations, balances, total_cost, total_owed, drift) =
            summary.inspect_err(|err| {
                tracing::warn!(error = %err, "Settlement request rejected");
            })?;

        let Settlement {
            new_balances,
            transfers,
        } = self.planner.plan(&balances);

        if !drift.is_zero() {
            tracing::debug!(
                total_cost = %total_cost,
                total_owed = %total_owed,
                drift = %drift,
                "Owed total differs from venue costs after rounding"
            );
        }

        tracing::debug!(
            transfer_count = transfers.len(),
            "Settlement computation finished"
        );

        Ok(SettlementReport {
            allocations,
            balances,
            transfers,
            outstanding: new_balances,
            total_cost,
            total_owed,
            drift,
        })
    }
}
