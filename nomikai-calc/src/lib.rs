#![warn(clippy::uninlined_format_args)]

mod model;

pub use model::{Payment, PersonBalance};

/// Remaining balances whose magnitude is below this many units are treated as settled.
pub const SETTLED_TOLERANCE: i64 = 1;

/// Outcome of netting: the payments to execute and what is left over afterwards.
///
/// `residual` keeps the input order. It is all zeros when the input balances
/// sum to zero; otherwise the imbalance stays with the last unmatched people.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Netting<'a> {
    pub payments: Vec<Payment<'a>>,
    pub residual: Vec<PersonBalance<'a>>,
}

/// Greedy largest-first netting.
///
/// Debtors are visited from the most negative balance upwards, creditors from
/// the largest balance downwards. Each step moves `min(|debt|, credit)` from the
/// current debtor to the current creditor and advances whichever side became
/// settled. Ties keep the input order, so the result is deterministic.
///
/// The total is not required to be zero: rounding drift is left in `residual`.
pub fn net_balances<'a>(people: impl IntoIterator<Item = PersonBalance<'a>>) -> Netting<'a> {
    let mut residual: Vec<PersonBalance<'a>> = people.into_iter().collect();

    let mut debtors: Vec<usize> = Vec::new();
    let mut creditors: Vec<usize> = Vec::new();
    for (idx, person) in residual.iter().enumerate() {
        if person.balance < 0 {
            debtors.push(idx);
        } else if person.balance > 0 {
            creditors.push(idx);
        }
    }

    // Stable sorts: equal balances stay in input order.
    debtors.sort_by_key(|&idx| residual[idx].balance);
    creditors.sort_by_key(|&idx| std::cmp::Reverse(residual[idx].balance));

    let mut payments = Vec::with_capacity(debtors.len().max(creditors.len()));
    let (mut debtor_cursor, mut creditor_cursor) = (0usize, 0usize);

    while let (Some(&debtor), Some(&creditor)) =
        (debtors.get(debtor_cursor), creditors.get(creditor_cursor))
    {
        let owed = residual[debtor].balance.saturating_neg();
        let amount = owed.min(residual[creditor].balance);
        if amount <= 0 {
            break;
        }

        payments.push(Payment {
            from: residual[debtor].name,
            to: residual[creditor].name,
            amount,
        });
        residual[creditor].balance -= amount;
        residual[debtor].balance += amount;

        if residual[debtor].balance.abs() < SETTLED_TOLERANCE {
            debtor_cursor += 1;
        }
        if residual[creditor].balance.abs() < SETTLED_TOLERANCE {
            creditor_cursor += 1;
        }
    }

    Netting { payments, residual }
}
