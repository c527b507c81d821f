use super::user::Member;
use crate::core::money::Money;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Suggested payment: `from` owes `to` the given amount.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SuggestedTransaction {
    #[serde(rename = "odUser")]
    pub from: Member,
    #[serde(rename = "kaUser")]
    pub to: Member,
    #[serde(rename = "iznos")]
    #[schema(value_type = f64)]
    pub amount: Money,
}
