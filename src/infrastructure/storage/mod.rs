use crate::core::errors::LedgerError;
use crate::core::models::{Expense, Group, GroupAudit, Settlement, User};
use async_trait::async_trait;

/// Record store the service reads snapshots from. The balance engine never touches it.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn create_user(&self, user: User) -> Result<User, LedgerError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, LedgerError>;
    async fn save_group(&self, group: Group) -> Result<(), LedgerError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError>;
    async fn get_user_groups(&self, user_id: &str) -> Result<Vec<Group>, LedgerError>;
    async fn save_expense(&self, expense: Expense) -> Result<(), LedgerError>;
    async fn get_expenses(&self, group_id: &str) -> Result<Vec<Expense>, LedgerError>;
    async fn save_settlement(&self, settlement: Settlement) -> Result<(), LedgerError>;
    async fn get_settlement(&self, settlement_id: &str) -> Result<Option<Settlement>, LedgerError>;
    async fn get_settlements(&self, group_id: &str) -> Result<Vec<Settlement>, LedgerError>;
    async fn save_group_audit(&self, audit: GroupAudit) -> Result<(), LedgerError>;
    async fn get_group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, LedgerError>;
}

pub mod in_memory;
