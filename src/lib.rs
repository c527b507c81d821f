pub mod api;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::balance::{BalanceMap, compute_balances};
pub use crate::core::errors::LedgerError;
pub use crate::core::money::{Currency, Money};
pub use crate::core::optimizer::optimize_transactions;
pub use crate::core::services::LedgerService;

#[cfg(test)]
mod tests; // Include integration tests
