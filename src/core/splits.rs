use crate::constants::SPLIT_TOLERANCE;
use crate::core::errors::LedgerError;
use crate::core::models::{MemberId, Split};
use crate::core::money::Money;

/// Every member gets the same rounded share; rounding drift stays with the payer.
pub fn equal_splits(amount: Money, member_ids: &[MemberId]) -> Result<Vec<Split>, LedgerError> {
    if member_ids.is_empty() {
        return Err(LedgerError::InvalidSplit);
    }
    let share = amount.divide_rounded(member_ids.len());
    Ok(member_ids
        .iter()
        .map(|user_id| Split {
            user_id: user_id.clone(),
            amount: share,
        })
        .collect())
}

/// Accepts caller-chosen shares as long as they add up to `amount`.
pub fn unequal_splits(amount: Money, splits: Vec<Split>) -> Result<Vec<Split>, LedgerError> {
    if splits.is_empty() || splits.iter().any(|s| s.amount.is_negative()) {
        return Err(LedgerError::InvalidSplit);
    }
    let total: Money = splits.iter().map(|s| s.amount).sum();
    if (total - amount).abs() > SPLIT_TOLERANCE {
        return Err(LedgerError::InvalidSplit);
    }
    Ok(splits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<MemberId> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn equal_split_shares_rounded_amount() {
        let splits = equal_splits(Money::from_major(100.0), &ids(&["a", "b", "c"])).unwrap();
        assert_eq!(splits.len(), 3);
        assert!(splits.iter().all(|s| s.amount == Money::from_cents(3333)));
        assert_eq!(splits[1].user_id, "b");
    }

    #[test]
    fn equal_split_requires_members() {
        let result = equal_splits(Money::from_major(10.0), &[]);
        assert!(matches!(result, Err(LedgerError::InvalidSplit)));
    }

    #[test]
    fn unequal_split_must_sum_to_amount() {
        let splits = vec![
            Split {
                user_id: "a".to_string(),
                amount: Money::from_major(70.0),
            },
            Split {
                user_id: "b".to_string(),
                amount: Money::from_major(20.0),
            },
        ];
        let result = unequal_splits(Money::from_major(100.0), splits.clone());
        assert!(matches!(result, Err(LedgerError::InvalidSplit)));

        let accepted = unequal_splits(Money::from_major(90.01), splits).unwrap();
        assert_eq!(accepted.len(), 2);
    }
}
