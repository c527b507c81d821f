use super::{expense, expense_in, member, roster, settlement};
use crate::core::balance::{BalanceMap, BalanceTotals, compute_balances, compute_balances_by_currency, member_balances};
use crate::core::models::SettlementStatus;
use crate::core::money::{Currency, Money};
use env_logger;

fn cents(amount: f64) -> Money {
    Money::from_major(amount)
}

#[test]
fn test_expense_credits_payer_and_debits_splits() {
    let _ = env_logger::try_init();
    let expenses = vec![expense("A", 300.0, &[("A", 100.0), ("B", 100.0), ("C", 100.0)])];

    let balances = compute_balances(&expenses, &[]);

    assert_eq!(balances.get("A"), cents(200.0));
    assert_eq!(balances.get("B"), cents(-100.0));
    assert_eq!(balances.get("C"), cents(-100.0));
    assert_eq!(balances.total(), Money::ZERO);
}

#[test]
fn test_confirmed_settlement_moves_balances() {
    let _ = env_logger::try_init();
    let expenses = vec![expense("A", 300.0, &[("A", 100.0), ("B", 100.0), ("C", 100.0)])];
    let settlements = vec![settlement("B", "A", 100.0, SettlementStatus::Confirmed)];

    let balances = compute_balances(&expenses, &settlements);

    assert_eq!(balances.get("A"), cents(100.0));
    assert!(balances.get("B").is_zero());
    assert_eq!(balances.get("C"), cents(-100.0));
}

#[test]
fn test_pending_settlement_is_ignored() {
    let _ = env_logger::try_init();
    let expenses = vec![expense("A", 300.0, &[("A", 100.0), ("B", 100.0), ("C", 100.0)])];
    let settlements = vec![settlement("B", "A", 100.0, SettlementStatus::Pending)];

    assert_eq!(
        compute_balances(&expenses, &settlements),
        compute_balances(&expenses, &[])
    );
}

#[test]
fn test_empty_input_gives_empty_map() {
    let balances = compute_balances(&[], &[]);
    assert!(balances.is_empty());
    assert_eq!(balances.get("nobody"), Money::ZERO);
}

#[test]
fn test_payer_outside_splits_is_only_credited() {
    let expenses = vec![expense("A", 50.0, &[("B", 25.0), ("C", 25.0)])];

    let balances = compute_balances(&expenses, &[]);

    assert_eq!(balances.get("A"), cents(50.0));
    assert_eq!(balances.get("B"), cents(-25.0));
    assert_eq!(balances.get("C"), cents(-25.0));
}

#[test]
fn test_split_mismatch_is_not_corrected() {
    // Rounded equal shares leave a cent on the payer.
    let expenses = vec![expense("A", 100.0, &[("A", 33.33), ("B", 33.33), ("C", 33.33)])];

    let balances = compute_balances(&expenses, &[]);

    assert_eq!(balances.get("A"), cents(66.67));
    assert_eq!(balances.total(), Money::from_cents(1));
}

#[test]
fn test_iteration_follows_first_touch_order() {
    let expenses = vec![
        expense("C", 10.0, &[("B", 10.0)]),
        expense("A", 10.0, &[("C", 10.0)]),
    ];

    let balances = compute_balances(&expenses, &[]);
    let order: Vec<&str> = balances.iter().map(|(id, _)| id.as_str()).collect();

    assert_eq!(order, vec!["C", "B", "A"]);
}

#[test]
fn test_balances_are_kept_per_currency() {
    let expenses = vec![
        expense_in("A", 100.0, &[("B", 100.0)], "EUR"),
        expense_in("B", 100.0, &[("A", 100.0)], "RSD"),
    ];

    let by_currency = compute_balances_by_currency(&expenses, &[]);

    assert_eq!(by_currency.len(), 2);
    let eur = &by_currency[&Currency::new("EUR")];
    let rsd = &by_currency[&Currency::new("RSD")];
    assert_eq!(eur.get("A"), cents(100.0));
    assert_eq!(rsd.get("A"), cents(-100.0));
}

#[test]
fn test_member_balances_cover_whole_roster() {
    let expenses = vec![expense("A", 20.0, &[("B", 20.0)])];
    let balances = compute_balances(&expenses, &[]);

    let rows = member_balances(&balances, &roster(&["B", "A", "D"]));

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].user, member("B"));
    assert_eq!(rows[0].balance, cents(-20.0));
    assert_eq!(rows[1].balance, cents(20.0));
    assert_eq!(rows[2].user.id, "D");
    assert!(rows[2].balance.is_zero());
}

#[test]
fn test_totals_split_owed_and_owes() {
    let first: BalanceMap = vec![("A".to_string(), cents(40.0)), ("B".to_string(), cents(-40.0))]
        .into_iter()
        .collect();
    let second: BalanceMap = vec![("A".to_string(), cents(-15.5)), ("C".to_string(), cents(15.5))]
        .into_iter()
        .collect();

    let totals = BalanceTotals::for_member("A", [&first, &second]);

    assert_eq!(totals.total_owed, cents(40.0));
    assert_eq!(totals.total_owes, cents(15.5));
    assert_eq!(BalanceTotals::for_member("Z", [&first]), BalanceTotals::default());
}
