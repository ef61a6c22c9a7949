use nomikai_application::TransferPlanner;
use nomikai_calc::{Netting, PersonBalance as CalcBalance, net_balances};
use nomikai_domain::{Balance, Money, OutstandingBalance, Settlement, Transfer};

/// Largest-debtor-to-largest-creditor netting.
#[derive(Default)]
pub struct GreedyTransferPlanner;

impl TransferPlanner for GreedyTransferPlanner {
    fn plan<'a>(&self, balances: &[Balance<'a>]) -> Settlement<'a> {
        let calc_balances = balances.iter().map(|balance| CalcBalance {
            name: balance.nickname,
            balance: balance.balance.amount(),
        });

        let Netting { payments, residual } = net_balances(calc_balances);

        let transfers = payments
            .into_iter()
            .map(|payment| Transfer {
                from: payment.from,
                to: payment.to,
                amount: Money::from_i64(payment.amount),
            })
            .collect();
        let new_balances: Vec<OutstandingBalance<'a>> = residual
            .into_iter()
            .map(|person| OutstandingBalance {
                nickname: person.name,
                amount: Money::from_i64(person.balance),
            })
            .collect();

        let unsettled = new_balances
            .iter()
            .filter(|balance| !balance.amount.is_zero())
            .count();
        if unsettled > 0 {
            tracing::debug!(unsettled, "Rounding drift left after netting");
        }

        Settlement {
            new_balances,
            transfers,
        }
    }
}
