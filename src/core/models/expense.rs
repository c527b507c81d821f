use super::user::MemberId;
use crate::core::money::{Currency, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A member's owed share of one expense.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    pub user_id: MemberId,
    #[schema(value_type = f64)]
    pub amount: Money,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SplitType {
    Equal,
    Unequal,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Food,
    Transport,
    Utilities,
    Entertainment,
    Shopping,
    #[default]
    Other,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub group_id: String,
    pub title: String,
    pub description: Option<String>,
    pub paid_by_id: MemberId,
    #[schema(value_type = f64)]
    pub amount: Money,
    #[schema(value_type = String)]
    pub currency: Currency,
    pub category: Category,
    pub split_type: SplitType,
    pub splits: Vec<Split>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub date: DateTime<Utc>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
}
