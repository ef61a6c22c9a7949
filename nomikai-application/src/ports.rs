use nomikai_domain::{Balance, Settlement};

/// Turns signed balances into transfers that settle them.
pub trait TransferPlanner: Send + Sync {
    fn plan<'a>(&self, balances: &[Balance<'a>]) -> Settlement<'a>;
}
