mod balance_tests;

use crate::core::models::{Category, Expense, Member, Settlement, SettlementStatus, Split, SplitType, User};
use crate::core::money::{Currency, Money};
use crate::core::services::LedgerService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use chrono::Utc;

pub fn create_test_service() -> LedgerService<InMemoryLogging, InMemoryStorage> {
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    LedgerService::new(storage, logging)
}

pub fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        name: Some(format!("User {}", id)),
        email: format!("{}@example.com", id.to_lowercase()),
    }
}

pub fn member(id: &str) -> Member {
    Member {
        id: id.to_string(),
        name: Some(format!("User {}", id)),
    }
}

pub fn roster(ids: &[&str]) -> Vec<Member> {
    ids.iter().map(|id| member(id)).collect()
}

pub fn expense(paid_by: &str, amount: f64, splits: &[(&str, f64)]) -> Expense {
    expense_in(paid_by, amount, splits, "RSD")
}

pub fn expense_in(paid_by: &str, amount: f64, splits: &[(&str, f64)], currency: &str) -> Expense {
    let now = Utc::now();
    Expense {
        id: uuid::Uuid::new_v4().to_string(),
        group_id: "group".to_string(),
        title: "Expense".to_string(),
        description: None,
        paid_by_id: paid_by.to_string(),
        amount: Money::from_major(amount),
        currency: Currency::new(currency),
        category: Category::Other,
        split_type: SplitType::Unequal,
        splits: splits
            .iter()
            .map(|(user_id, share)| Split {
                user_id: user_id.to_string(),
                amount: Money::from_major(*share),
            })
            .collect(),
        date: now,
        created_at: now,
    }
}

pub fn settlement(payer: &str, receiver: &str, amount: f64, status: SettlementStatus) -> Settlement {
    Settlement {
        id: uuid::Uuid::new_v4().to_string(),
        group_id: "group".to_string(),
        payer_id: payer.to_string(),
        receiver_id: receiver.to_string(),
        amount: Money::from_major(amount),
        currency: Currency::new("RSD"),
        status,
        created_at: Utc::now(),
        confirmed_at: None,
    }
}
