use crate::constants::DEAD_ZONE;
use crate::core::balance::BalanceMap;
use crate::core::models::{Member, SuggestedTransaction};
use crate::core::money::Money;
use log::{debug, warn};
use std::collections::HashMap;

/// Working copy of one side of the walk.
struct Party<'a> {
    id: &'a str,
    remaining: Money,
}

/// Turns net balances into payer -> payee transfers that clear them.
///
/// Greedy: the largest debtor pays the largest creditor, then whichever side
/// is exhausted is skipped. Both lists are sorted once up front (stable, so
/// equal amounts keep balance-map order) and never re-sorted. Balances within
/// one cent of zero are treated as settled, and no transfer of a cent or less
/// is emitted. Ids missing from `roster` come back as nameless members.
pub fn optimize_transactions(balances: &BalanceMap, roster: &[Member]) -> Vec<SuggestedTransaction> {
    let members: HashMap<&str, &Member> = roster.iter().map(|m| (m.id.as_str(), m)).collect();
    let lookup = |id: &str| {
        members
            .get(id)
            .map(|m| (*m).clone())
            .unwrap_or_else(|| Member::placeholder(id))
    };

    let mut debtors: Vec<Party> = Vec::new();
    let mut creditors: Vec<Party> = Vec::new();
    for (id, balance) in balances.iter() {
        if balance < -DEAD_ZONE {
            debtors.push(Party {
                id,
                remaining: balance.abs(),
            });
        } else if balance > DEAD_ZONE {
            creditors.push(Party { id, remaining: balance });
        }
    }

    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let owed: Money = debtors.iter().map(|d| d.remaining).sum();
    let due: Money = creditors.iter().map(|c| c.remaining).sum();
    if owed != due {
        warn!("Debtor total {} does not match creditor total {}; residual left unsettled", owed, due);
    }

    let mut transactions = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < debtors.len() && j < creditors.len() {
        let amount = debtors[i].remaining.min(creditors[j].remaining);

        if amount > DEAD_ZONE {
            transactions.push(SuggestedTransaction {
                from: lookup(debtors[i].id),
                to: lookup(creditors[j].id),
                amount,
            });
        }

        debtors[i].remaining -= amount;
        creditors[j].remaining -= amount;

        if debtors[i].remaining < DEAD_ZONE {
            i += 1;
        }
        if creditors[j].remaining < DEAD_ZONE {
            j += 1;
        }
    }

    debug!(
        "Optimized {} balances into {} transactions",
        balances.len(),
        transactions.len()
    );
    transactions
}
