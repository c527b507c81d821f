use crate::core::errors::LedgerError;
use crate::core::models::{Expense, Group, GroupAudit, Settlement, User};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Expenses and settlements are kept per group in insertion order.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    users: Arc<RwLock<HashMap<String, User>>>,
    users_by_email: Arc<RwLock<HashMap<String, String>>>,
    groups: Arc<RwLock<HashMap<String, Group>>>,
    expenses: Arc<RwLock<HashMap<String, Vec<Expense>>>>,
    settlements: Arc<RwLock<HashMap<String, Settlement>>>,
    settlement_order: Arc<RwLock<Vec<String>>>,
    group_audits: Arc<RwLock<HashMap<String, Vec<GroupAudit>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_user(&self, user: User) -> Result<User, LedgerError> {
        let mut users = self.users.write().await;
        let mut users_by_email = self.users_by_email.write().await;
        if users.contains_key(&user.id) {
            return Err(LedgerError::UserAlreadyExists(user.id));
        }
        if users_by_email.contains_key(&user.email) {
            return Err(LedgerError::EmailAlreadyRegistered(user.email));
        }
        users_by_email.insert(user.email.clone(), user.id.clone());
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, LedgerError> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn save_group(&self, group: Group) -> Result<(), LedgerError> {
        self.groups.write().await.insert(group.id.clone(), group);
        Ok(())
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError> {
        Ok(self.groups.read().await.get(group_id).cloned())
    }

    async fn get_user_groups(&self, user_id: &str) -> Result<Vec<Group>, LedgerError> {
        let mut groups: Vec<Group> = self
            .groups
            .read()
            .await
            .values()
            .filter(|g| g.is_member(user_id))
            .cloned()
            .collect();
        groups.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(groups)
    }

    async fn save_expense(&self, expense: Expense) -> Result<(), LedgerError> {
        self.expenses
            .write()
            .await
            .entry(expense.group_id.clone())
            .or_default()
            .push(expense);
        Ok(())
    }

    async fn get_expenses(&self, group_id: &str) -> Result<Vec<Expense>, LedgerError> {
        Ok(self.expenses.read().await.get(group_id).cloned().unwrap_or_default())
    }

    async fn save_settlement(&self, settlement: Settlement) -> Result<(), LedgerError> {
        let mut settlements = self.settlements.write().await;
        if !settlements.contains_key(&settlement.id) {
            self.settlement_order.write().await.push(settlement.id.clone());
        }
        settlements.insert(settlement.id.clone(), settlement);
        Ok(())
    }

    async fn get_settlement(&self, settlement_id: &str) -> Result<Option<Settlement>, LedgerError> {
        Ok(self.settlements.read().await.get(settlement_id).cloned())
    }

    async fn get_settlements(&self, group_id: &str) -> Result<Vec<Settlement>, LedgerError> {
        let settlements = self.settlements.read().await;
        let order = self.settlement_order.read().await;
        Ok(order
            .iter()
            .filter_map(|id| settlements.get(id))
            .filter(|s| s.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn save_group_audit(&self, audit: GroupAudit) -> Result<(), LedgerError> {
        self.group_audits
            .write()
            .await
            .entry(audit.group_id.clone())
            .or_default()
            .push(audit);
        Ok(())
    }

    async fn get_group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, LedgerError> {
        Ok(self.group_audits.read().await.get(group_id).cloned().unwrap_or_default())
    }
}
