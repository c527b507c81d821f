use crate::constants::{
    BALANCE_QUERIED, DASHBOARD_QUERIED, EXPENSE_ADDED, EXPENSES_QUERIED, GROUP_CREATED, MAX_AMOUNT,
    MAX_CURRENCY_LENGTH, MAX_TITLE_LENGTH, MEMBER_ADDED, RECENT_EXPENSES_LIMIT, SETTLEMENT_CONFIRMED, SETTLEMENT_CREATED,
    SETTLEMENTS_QUERIED, USER_ADDED,
};
use crate::core::balance::{
    BalanceTotals, MemberBalance, compute_balances, compute_balances_by_currency, member_balances,
};
use crate::core::errors::LedgerError;
use crate::core::models::{
    AppLog, Category, Expense, Group, GroupAudit, GroupKind, GroupMember, Role, Settlement, SettlementStatus, Split,
    SplitType, SuggestedTransaction, User,
};
use crate::core::money::{Currency, Money};
use crate::core::optimizer::optimize_transactions;
use crate::core::splits::{equal_splits, unequal_splits};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Caller-chosen share, checked before it becomes [`Split`].
#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewSplit {
    pub user_id: String,
    pub amount: f64,
}

/// Expense as submitted, before splits are resolved.
#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub title: String,
    pub description: Option<String>,
    pub amount: f64,
    #[schema(value_type = Option<String>)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub category: Category,
    pub split_type: SplitType,
    /// Only read for `UNEQUAL` splits.
    #[serde(default)]
    pub splits: Vec<NewSplit>,
    #[schema(value_type = Option<String>)]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyBalances {
    #[schema(value_type = String)]
    pub currency: Currency,
    pub member_balances: Vec<MemberBalance>,
    pub optimized_debts: Vec<SuggestedTransaction>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupBalances {
    pub group_id: String,
    pub currencies: Vec<CurrencyBalances>,
}

impl GroupBalances {
    pub fn for_currency(&self, currency: &Currency) -> Option<&CurrencyBalances> {
        self.currencies.iter().find(|c| &c.currency == currency)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub id: String,
    pub name: String,
    pub member_count: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentExpense {
    pub id: String,
    pub title: String,
    #[schema(value_type = f64)]
    pub amount: Money,
    #[schema(value_type = String)]
    pub currency: Currency,
    pub group_name: String,
    #[schema(value_type = String)]
    pub date: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    #[serde(flatten)]
    pub totals: BalanceTotals,
    pub groups: Vec<GroupSummary>,
    pub recent_expenses: Vec<RecentExpense>,
}

pub struct LedgerService<L: LoggingService, S: Storage> {
    storage: S,
    logging: L,
}

impl<L: LoggingService, S: Storage> LedgerService<L, S> {
    pub fn new(storage: S, logging: L) -> Self {
        LedgerService { storage, logging }
    }

    async fn load_group(&self, group_id: &str) -> Result<Group, LedgerError> {
        self.storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))
    }

    async fn validate_group_membership(&self, group_id: &str, user_id: &str) -> Result<Group, LedgerError> {
        let group = self.load_group(group_id).await?;
        if !group.is_member(user_id) {
            warn!("User {} is not a member of group {}", user_id, group_id);
            return Err(LedgerError::NotGroupMember(user_id.to_string()));
        }
        Ok(group)
    }

    async fn log_and_audit(
        &self,
        group_id: Option<&str>,
        action: &str,
        details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), LedgerError> {
        self.logging.log_action(action, details.clone(), user_id).await?;
        if let Some(gid) = group_id {
            self.storage
                .save_group_audit(GroupAudit {
                    id: Uuid::new_v4().to_string(),
                    group_id: gid.to_string(),
                    action: action.to_string(),
                    user_id: user_id.map(String::from),
                    details,
                    timestamp: Utc::now(),
                })
                .await?;
        }
        Ok(())
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), LedgerError> {
        if value.trim().is_empty() {
            return Err(LedgerError::invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} cannot be empty", field),
            ));
        }
        if value.chars().count() > max_length {
            return Err(LedgerError::invalid_input(
                field,
                format!("{} Too Long", field),
                format!("{} cannot exceed {} characters", field, max_length),
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: f64) -> Result<Money, LedgerError> {
        if amount.is_finite() && amount <= 0.0 {
            return Err(LedgerError::invalid_input(
                field,
                "Invalid Amount",
                "Amount must be greater than 0",
            ));
        }
        self.validate_share_input(field, amount)
    }

    /// Like [`Self::validate_amount_input`], but zero is allowed.
    fn validate_share_input(&self, field: &str, amount: f64) -> Result<Money, LedgerError> {
        if !amount.is_finite() {
            return Err(LedgerError::invalid_input(
                field,
                "Invalid Amount",
                "Amount must be a finite number",
            ));
        }
        if amount < 0.0 {
            return Err(LedgerError::invalid_input(
                field,
                "Invalid Amount",
                "Amount cannot be negative",
            ));
        }
        if amount > MAX_AMOUNT {
            return Err(LedgerError::invalid_input(
                field,
                "Amount Too Large",
                "Amount cannot exceed 1,000,000",
            ));
        }
        let scaled = amount * 100.0;
        if (scaled - scaled.round()).abs() > 1e-6 {
            return Err(LedgerError::invalid_input(
                field,
                "Invalid Amount",
                "Amount cannot have more than 2 decimal places",
            ));
        }
        Ok(Money::from_major(amount))
    }

    fn validate_currency_input(&self, currency: Option<Currency>, fallback: &Currency) -> Result<Currency, LedgerError> {
        match currency {
            Some(currency) => {
                self.validate_string_input("currency", currency.code(), MAX_CURRENCY_LENGTH)?;
                Ok(currency)
            }
            None => Ok(fallback.clone()),
        }
    }

    // USERS

    pub async fn add_user(&self, user: User) -> Result<User, LedgerError> {
        if user.email.trim().is_empty() {
            return Err(LedgerError::MissingEmail);
        }
        if !user.email.contains('@') {
            return Err(LedgerError::InvalidEmail(user.email));
        }
        let created = self.storage.create_user(user).await?;
        info!("Added user {}", created.id);
        self.log_and_audit(None, USER_ADDED, json!({ "user_id": created.id }), Some(created.id.as_str()))
            .await?;
        Ok(created)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, LedgerError> {
        self.storage.get_user(user_id).await
    }

    // GROUPS

    pub async fn create_group(
        &self,
        name: String,
        description: Option<String>,
        kind: GroupKind,
        currency: Currency,
        members: Vec<User>,
        created_by: &User,
    ) -> Result<Group, LedgerError> {
        self.validate_string_input("name", &name, MAX_TITLE_LENGTH)?;
        self.validate_string_input("currency", currency.code(), MAX_CURRENCY_LENGTH)?;

        let mut group_members = vec![GroupMember {
            user: created_by.clone(),
            role: Role::Owner,
        }];
        for user in members {
            if group_members.iter().any(|m| m.user.id == user.id) {
                continue;
            }
            group_members.push(GroupMember {
                user,
                role: Role::Member,
            });
        }

        let group = Group {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            kind,
            currency,
            members: group_members,
            created_at: Utc::now(),
        };
        self.storage.save_group(group.clone()).await?;
        info!("Created group {} with {} members", group.id, group.members.len());

        self.log_and_audit(
            Some(&group.id),
            GROUP_CREATED,
            json!({ "group_id": group.id, "name": group.name, "member_count": group.members.len() }),
            Some(created_by.id.as_str()),
        )
        .await?;
        Ok(group)
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError> {
        self.storage.get_group(group_id).await
    }

    pub async fn add_member(&self, group_id: &str, user_id: &str, added_by: &User) -> Result<Group, LedgerError> {
        let mut group = self.validate_group_membership(group_id, &added_by.id).await?;
        let user = self
            .storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| LedgerError::UserNotFound(user_id.to_string()))?;
        if group.is_member(&user.id) {
            return Err(LedgerError::AlreadyGroupMember(user.id));
        }

        group.members.push(GroupMember {
            user,
            role: Role::Member,
        });
        self.storage.save_group(group.clone()).await?;
        debug!("User {} added to group {}", user_id, group_id);

        self.log_and_audit(
            Some(group_id),
            MEMBER_ADDED,
            json!({ "group_id": group_id, "user_id": user_id }),
            Some(added_by.id.as_str()),
        )
        .await?;
        Ok(group)
    }

    // EXPENSES

    pub async fn add_expense(
        &self,
        group_id: &str,
        new_expense: NewExpense,
        paid_by: &User,
    ) -> Result<Expense, LedgerError> {
        let group = self.validate_group_membership(group_id, &paid_by.id).await?;
        self.validate_string_input("title", &new_expense.title, MAX_TITLE_LENGTH)?;
        let amount = self.validate_amount_input("amount", new_expense.amount)?;
        let currency = self.validate_currency_input(new_expense.currency, &group.currency)?;

        let splits = match new_expense.split_type {
            SplitType::Equal => equal_splits(amount, &group.member_ids())?,
            SplitType::Unequal => {
                let mut shares = Vec::with_capacity(new_expense.splits.len());
                for split in new_expense.splits {
                    if !group.is_member(&split.user_id) {
                        return Err(LedgerError::InvalidSplitUser(split.user_id));
                    }
                    shares.push(Split {
                        amount: self.validate_share_input("splits", split.amount)?,
                        user_id: split.user_id,
                    });
                }
                unequal_splits(amount, shares)?
            }
        };

        let now = Utc::now();
        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            title: new_expense.title,
            description: new_expense.description,
            paid_by_id: paid_by.id.clone(),
            amount,
            currency,
            category: new_expense.category,
            split_type: new_expense.split_type,
            splits,
            date: new_expense.date.unwrap_or(now),
            created_at: now,
        };
        self.storage.save_expense(expense.clone()).await?;
        info!(
            "Expense {} of {} {} added to group {}",
            expense.id, expense.amount, expense.currency, group_id
        );

        self.log_and_audit(
            Some(group_id),
            EXPENSE_ADDED,
            json!({
                "expense_id": expense.id,
                "title": expense.title,
                "amount": expense.amount,
                "currency": expense.currency,
                "paid_by_id": expense.paid_by_id
            }),
            Some(paid_by.id.as_str()),
        )
        .await?;
        Ok(expense)
    }

    pub async fn list_expenses(&self, group_id: &str, queried_by: &User) -> Result<Vec<Expense>, LedgerError> {
        self.validate_group_membership(group_id, &queried_by.id).await?;
        let mut expenses = self.storage.get_expenses(group_id).await?;
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        self.log_and_audit(
            Some(group_id),
            EXPENSES_QUERIED,
            json!({ "group_id": group_id, "count": expenses.len() }),
            Some(queried_by.id.as_str()),
        )
        .await?;
        Ok(expenses)
    }

    // SETTLEMENTS

    pub async fn create_settlement(
        &self,
        group_id: &str,
        payer: &User,
        receiver_id: &str,
        amount: f64,
        currency: Option<Currency>,
    ) -> Result<Settlement, LedgerError> {
        let group = self.validate_group_membership(group_id, &payer.id).await?;
        if payer.id == receiver_id {
            return Err(LedgerError::SelfSettlement);
        }
        if !group.is_member(receiver_id) {
            return Err(LedgerError::NotGroupMember(receiver_id.to_string()));
        }
        let amount = self.validate_amount_input("amount", amount)?;
        let currency = self.validate_currency_input(currency, &group.currency)?;

        let settlement = Settlement {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            payer_id: payer.id.clone(),
            receiver_id: receiver_id.to_string(),
            amount,
            currency,
            status: SettlementStatus::Pending,
            created_at: Utc::now(),
            confirmed_at: None,
        };
        self.storage.save_settlement(settlement.clone()).await?;
        info!("Pending settlement {} from {} to {}", settlement.id, payer.id, receiver_id);

        self.log_and_audit(
            Some(group_id),
            SETTLEMENT_CREATED,
            json!({
                "settlement_id": settlement.id,
                "payer_id": settlement.payer_id,
                "receiver_id": settlement.receiver_id,
                "amount": settlement.amount
            }),
            Some(payer.id.as_str()),
        )
        .await?;
        Ok(settlement)
    }

    /// Only the receiver can confirm, and only once.
    pub async fn confirm_settlement(&self, settlement_id: &str, confirmed_by: &User) -> Result<Settlement, LedgerError> {
        let mut settlement = self
            .storage
            .get_settlement(settlement_id)
            .await?
            .ok_or_else(|| LedgerError::SettlementNotFound(settlement_id.to_string()))?;

        if settlement.receiver_id != confirmed_by.id {
            warn!(
                "User {} tried to confirm settlement {} addressed to {}",
                confirmed_by.id, settlement_id, settlement.receiver_id
            );
            return Err(LedgerError::UnauthorizedSettlementConfirmation(confirmed_by.id.clone()));
        }
        if settlement.is_confirmed() {
            return Err(LedgerError::SettlementAlreadyConfirmed(settlement_id.to_string()));
        }

        settlement.status = SettlementStatus::Confirmed;
        settlement.confirmed_at = Some(Utc::now());
        self.storage.save_settlement(settlement.clone()).await?;
        info!("Settlement {} confirmed by {}", settlement_id, confirmed_by.id);

        self.log_and_audit(
            Some(&settlement.group_id),
            SETTLEMENT_CONFIRMED,
            json!({ "settlement_id": settlement.id, "group_id": settlement.group_id }),
            Some(confirmed_by.id.as_str()),
        )
        .await?;
        Ok(settlement)
    }

    pub async fn list_settlements(&self, group_id: &str, queried_by: &User) -> Result<Vec<Settlement>, LedgerError> {
        self.validate_group_membership(group_id, &queried_by.id).await?;
        let mut settlements = self.storage.get_settlements(group_id).await?;
        settlements.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.log_and_audit(
            Some(group_id),
            SETTLEMENTS_QUERIED,
            json!({ "group_id": group_id, "count": settlements.len() }),
            Some(queried_by.id.as_str()),
        )
        .await?;
        Ok(settlements)
    }

    // BALANCES

    pub async fn get_group_balances(&self, group_id: &str, queried_by: &User) -> Result<GroupBalances, LedgerError> {
        let group = self.validate_group_membership(group_id, &queried_by.id).await?;
        let expenses = self.storage.get_expenses(group_id).await?;
        let settlements = self.storage.get_settlements(group_id).await?;
        let roster = group.roster();

        let mut by_currency = compute_balances_by_currency(&expenses, &settlements);
        by_currency.entry(group.currency.clone()).or_default();

        let currencies: Vec<CurrencyBalances> = by_currency
            .into_iter()
            .map(|(currency, balances)| CurrencyBalances {
                member_balances: member_balances(&balances, &roster),
                optimized_debts: optimize_transactions(&balances, &roster),
                currency,
            })
            .collect();

        self.log_and_audit(
            Some(group_id),
            BALANCE_QUERIED,
            json!({ "group_id": group_id, "currencies": currencies.len() }),
            Some(queried_by.id.as_str()),
        )
        .await?;

        Ok(GroupBalances {
            group_id: group_id.to_string(),
            currencies,
        })
    }

    /// Totals count each group's own currency only.
    pub async fn get_dashboard(&self, user: &User) -> Result<Dashboard, LedgerError> {
        let groups = self.storage.get_user_groups(&user.id).await?;

        let mut group_balances = Vec::with_capacity(groups.len());
        let mut recent: Vec<(Expense, String)> = Vec::new();
        for group in &groups {
            let all_expenses = self.storage.get_expenses(&group.id).await?;
            let expenses: Vec<Expense> = all_expenses
                .iter()
                .filter(|e| e.currency == group.currency)
                .cloned()
                .collect();
            let settlements: Vec<Settlement> = self
                .storage
                .get_settlements(&group.id)
                .await?
                .into_iter()
                .filter(|s| s.currency == group.currency)
                .collect();
            group_balances.push(compute_balances(&expenses, &settlements));

            recent.extend(all_expenses.into_iter().map(|e| (e, group.name.clone())));
        }

        recent.sort_by(|a, b| b.0.created_at.cmp(&a.0.created_at));
        let recent_expenses = recent
            .into_iter()
            .take(RECENT_EXPENSES_LIMIT)
            .map(|(e, group_name)| RecentExpense {
                id: e.id,
                title: e.title,
                amount: e.amount,
                currency: e.currency,
                group_name,
                date: e.date,
            })
            .collect();

        let dashboard = Dashboard {
            totals: BalanceTotals::for_member(&user.id, &group_balances),
            groups: groups
                .iter()
                .map(|g| GroupSummary {
                    id: g.id.clone(),
                    name: g.name.clone(),
                    member_count: g.members.len(),
                })
                .collect(),
            recent_expenses,
        };

        self.log_and_audit(
            None,
            DASHBOARD_QUERIED,
            json!({ "user_id": user.id, "group_count": dashboard.groups.len() }),
            Some(user.id.as_str()),
        )
        .await?;
        Ok(dashboard)
    }

    // AUDIT

    pub async fn get_group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, LedgerError> {
        self.load_group(group_id).await?;
        self.storage.get_group_audits(group_id).await
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, LedgerError> {
        self.logging.get_logs().await
    }
}
