use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::{
    errors::LedgerError,
    models::GroupKind,
    services::NewExpense,
};

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub kind: GroupKind,
    pub currency: Option<String>,
    #[serde(default)]
    pub member_ids: Vec<String>,
    pub created_by_id: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub user_id: String,
    pub added_by_id: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddExpenseRequest {
    pub paid_by_id: String,
    #[serde(flatten)]
    pub expense: NewExpense,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSettlementRequest {
    pub payer_id: String,
    pub receiver_id: String,
    pub amount: f64,
    pub currency: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmSettlementRequest {
    pub confirmed_by_id: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupQueryRequest {
    pub queried_by_id: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRequest {
    pub user_id: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for LedgerError to implement IntoResponse
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            LedgerError::MissingEmail
            | LedgerError::InvalidEmail(_)
            | LedgerError::InvalidSplit
            | LedgerError::InvalidSplitUser(_)
            | LedgerError::SelfSettlement
            | LedgerError::InvalidInput(..) => StatusCode::BAD_REQUEST,
            LedgerError::NotGroupMember(_) | LedgerError::UnauthorizedSettlementConfirmation(_) => {
                StatusCode::FORBIDDEN
            }
            LedgerError::UserNotFound(_) | LedgerError::GroupNotFound(_) | LedgerError::SettlementNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            LedgerError::EmailAlreadyRegistered(_)
            | LedgerError::UserAlreadyExists(_)
            | LedgerError::AlreadyGroupMember(_)
            | LedgerError::SettlementAlreadyConfirmed(_) => StatusCode::CONFLICT,
            LedgerError::StorageError(_) | LedgerError::LoggingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        (status, Json(ErrorResponse { error: self.0.to_string() })).into_response()
    }
}
