use nomikai_domain::{Balance, Money, OutstandingBalance, ParticipantAllocation, Transfer};
use serde::Serialize;

/// Everything derived for one event.
///
/// `drift` is `total_owed - total_cost`: the accepted error from rounding each
/// participant's total independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementReport<'a> {
    pub allocations: Vec<ParticipantAllocation<'a>>,
    pub balances: Vec<Balance<'a>>,
    pub transfers: Vec<Transfer<'a>>,
    pub outstanding: Vec<OutstandingBalance<'a>>,
    pub total_cost: Money,
    pub total_owed: Money,
    pub drift: Money,
}
