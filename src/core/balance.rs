use crate::core::models::{Expense, Member, MemberId, Settlement};
use crate::core::money::{Currency, Money};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Net signed position per member. Absent members read as zero.
///
/// Positive means the group owes the member; negative means the member owes
/// the group. Iteration follows the order in which members were first
/// touched, which the optimizer relies on for deterministic tie-breaks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceMap {
    balances: IndexMap<MemberId, Money>,
}

impl BalanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, member_id: &str) -> Money {
        self.balances.get(member_id).copied().unwrap_or(Money::ZERO)
    }

    pub fn credit(&mut self, member_id: &str, amount: Money) {
        *self.entry(member_id) += amount;
    }

    pub fn debit(&mut self, member_id: &str, amount: Money) {
        *self.entry(member_id) -= amount;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MemberId, Money)> + '_ {
        self.balances.iter().map(|(id, amount)| (id, *amount))
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    pub fn total(&self) -> Money {
        self.balances.values().sum()
    }

    fn entry(&mut self, member_id: &str) -> &mut Money {
        self.balances.entry(member_id.to_string()).or_insert(Money::ZERO)
    }
}

impl FromIterator<(MemberId, Money)> for BalanceMap {
    fn from_iter<I: IntoIterator<Item = (MemberId, Money)>>(iter: I) -> Self {
        let mut map = BalanceMap::new();
        for (id, amount) in iter {
            map.credit(&id, amount);
        }
        map
    }
}

/// Folds expenses and confirmed settlements into one net balance per member.
///
/// The payer of an expense is credited with the full amount and every split
/// member (the payer included, if listed) is debited their share. A confirmed
/// settlement credits its payer and debits its receiver. Pending settlements
/// are ignored. Split totals are not checked against expense totals.
pub fn compute_balances(expenses: &[Expense], settlements: &[Settlement]) -> BalanceMap {
    let mut balances = BalanceMap::new();

    for expense in expenses {
        balances.credit(&expense.paid_by_id, expense.amount);
        for split in &expense.splits {
            balances.debit(&split.user_id, split.amount);
        }
    }

    for settlement in settlements.iter().filter(|s| s.is_confirmed()) {
        balances.credit(&settlement.payer_id, settlement.amount);
        balances.debit(&settlement.receiver_id, settlement.amount);
    }

    debug!(
        "Computed {} balances from {} expenses and {} settlements",
        balances.len(),
        expenses.len(),
        settlements.len()
    );
    balances
}

/// Same as [`compute_balances`], but keeps each currency label in its own map.
pub fn compute_balances_by_currency(
    expenses: &[Expense],
    settlements: &[Settlement],
) -> BTreeMap<Currency, BalanceMap> {
    let mut expenses_by_currency: BTreeMap<Currency, Vec<Expense>> = BTreeMap::new();
    for expense in expenses {
        expenses_by_currency
            .entry(expense.currency.clone())
            .or_default()
            .push(expense.clone());
    }

    let mut settlements_by_currency: BTreeMap<Currency, Vec<Settlement>> = BTreeMap::new();
    for settlement in settlements {
        settlements_by_currency
            .entry(settlement.currency.clone())
            .or_default()
            .push(settlement.clone());
    }

    let mut currencies: Vec<Currency> = expenses_by_currency.keys().cloned().collect();
    currencies.extend(settlements_by_currency.keys().cloned());
    currencies.sort();
    currencies.dedup();

    currencies
        .into_iter()
        .map(|currency| {
            let expenses = expenses_by_currency.remove(&currency).unwrap_or_default();
            let settlements = settlements_by_currency.remove(&currency).unwrap_or_default();
            let balances = compute_balances(&expenses, &settlements);
            (currency, balances)
        })
        .collect()
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MemberBalance {
    pub user: Member,
    #[schema(value_type = f64)]
    pub balance: Money,
}

/// One entry per roster member, in roster order, zero for members without activity.
pub fn member_balances(balances: &BalanceMap, roster: &[Member]) -> Vec<MemberBalance> {
    roster
        .iter()
        .map(|member| MemberBalance {
            user: member.clone(),
            balance: balances.get(&member.id),
        })
        .collect()
}

/// A member's position summed over several groups.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceTotals {
    /// What others owe the member.
    #[schema(value_type = f64)]
    pub total_owed: Money,
    /// What the member owes others.
    #[schema(value_type = f64)]
    pub total_owes: Money,
}

impl BalanceTotals {
    pub fn for_member<'a>(member_id: &str, group_balances: impl IntoIterator<Item = &'a BalanceMap>) -> Self {
        let mut totals = BalanceTotals::default();
        for balances in group_balances {
            let balance = balances.get(member_id);
            if balance.is_positive() {
                totals.total_owed += balance;
            } else if balance.is_negative() {
                totals.total_owes += balance.abs();
            }
        }
        totals
    }
}
