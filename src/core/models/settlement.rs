use super::user::MemberId;
use crate::core::money::{Currency, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Only `Confirmed` settlements move balances.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SettlementStatus {
    Pending,
    Confirmed,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub id: String,
    pub group_id: String,
    pub payer_id: MemberId,
    pub receiver_id: MemberId,
    #[schema(value_type = f64)]
    pub amount: Money,
    #[schema(value_type = String)]
    pub currency: Currency,
    pub status: SettlementStatus,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = Option<String>)]
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl Settlement {
    pub fn is_confirmed(&self) -> bool {
        self.status == SettlementStatus::Confirmed
    }
}
