use crate::{
    api::models::*,
    config::CONFIG,
    core::{
        errors::LedgerError,
        models::{AppLog, Expense, Group, GroupAudit, Settlement, User},
        money::Currency,
        services::{Dashboard, GroupBalances, LedgerService},
    },
    infrastructure::{logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage},
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;
use uuid::Uuid;

pub type SharedService = Arc<LedgerService<InMemoryLogging, InMemoryStorage>>;

async fn require_user(service: &SharedService, user_id: String) -> Result<User, ApiError> {
    Ok(service
        .get_user(&user_id)
        .await?
        .ok_or(LedgerError::UserNotFound(user_id))?)
}

// Define API routes
pub fn api_routes(service: SharedService) -> Router {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/{user_id}", get(get_user))
        .route("/groups", post(create_group))
        .route("/groups/{group_id}/members", post(add_member))
        .route("/groups/{group_id}/expenses", post(add_expense))
        .route("/groups/{group_id}/expenses/list", post(list_expenses))
        .route("/groups/{group_id}/settlements", post(create_settlement))
        .route("/groups/{group_id}/settlements/list", post(list_settlements))
        .route("/settlements/{settlement_id}/confirm", post(confirm_settlement))
        .route("/groups/{group_id}/balances", post(get_group_balances))
        .route("/groups/{group_id}/audits", get(get_group_audits))
        .route("/dashboard", post(get_dashboard))
        .route("/logs", get(get_app_logs))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 409, description = "User id or email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(service): State<SharedService>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = User {
        id: req.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        name: req.name,
        email: req.email,
    };
    let created = service.add_user(user).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "ID of the user to retrieve")
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(service): State<SharedService>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(require_user(&service, user_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created successfully", body = Group),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_group(
    State(service): State<SharedService>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    let created_by = require_user(&service, req.created_by_id).await?;
    let members = req
        .member_ids
        .into_iter()
        .map(|id| {
            let service = service.clone();
            async move {
                service
                    .get_user(&id)
                    .await?
                    .ok_or(LedgerError::UserNotFound(id))
            }
        })
        .collect::<Vec<_>>();
    let members = futures::future::try_join_all(members).await?;
    let currency = Currency::new(req.currency.unwrap_or_else(|| CONFIG.default_currency.clone()));
    let group = service
        .create_group(req.name, req.description, req.kind, currency, members, &created_by)
        .await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/members",
    request_body = AddMemberRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Member added successfully", body = Group),
        (status = 403, description = "Not a group member", body = ErrorResponse),
        (status = 404, description = "User or group not found", body = ErrorResponse),
        (status = 409, description = "User already a member", body = ErrorResponse)
    )
)]
pub async fn add_member(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Json(req): Json<AddMemberRequest>,
) -> Result<Json<Group>, ApiError> {
    let added_by = require_user(&service, req.added_by_id).await?;
    let group = service.add_member(&group_id, &req.user_id, &added_by).await?;
    Ok(Json(group))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/expenses",
    request_body = AddExpenseRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 201, description = "Expense added successfully", body = Expense),
        (status = 400, description = "Invalid amount or splits", body = ErrorResponse),
        (status = 403, description = "Payer is not a group member", body = ErrorResponse),
        (status = 404, description = "User or group not found", body = ErrorResponse)
    )
)]
pub async fn add_expense(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Json(req): Json<AddExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let paid_by = require_user(&service, req.paid_by_id).await?;
    let expense = service.add_expense(&group_id, req.expense, &paid_by).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/expenses/list",
    request_body = GroupQueryRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Expenses, newest first", body = Vec<Expense>),
        (status = 403, description = "Not a group member", body = ErrorResponse),
        (status = 404, description = "User or group not found", body = ErrorResponse)
    )
)]
pub async fn list_expenses(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Json(req): Json<GroupQueryRequest>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    let queried_by = require_user(&service, req.queried_by_id).await?;
    Ok(Json(service.list_expenses(&group_id, &queried_by).await?))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/settlements",
    request_body = CreateSettlementRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 201, description = "Pending settlement recorded", body = Settlement),
        (status = 400, description = "Invalid amount or self settlement", body = ErrorResponse),
        (status = 403, description = "Not a group member", body = ErrorResponse),
        (status = 404, description = "User or group not found", body = ErrorResponse)
    )
)]
pub async fn create_settlement(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Json(req): Json<CreateSettlementRequest>,
) -> Result<(StatusCode, Json<Settlement>), ApiError> {
    let payer = require_user(&service, req.payer_id).await?;
    let settlement = service
        .create_settlement(
            &group_id,
            &payer,
            &req.receiver_id,
            req.amount,
            req.currency.map(Currency::new),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(settlement)))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/settlements/list",
    request_body = GroupQueryRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Settlements, newest first", body = Vec<Settlement>),
        (status = 403, description = "Not a group member", body = ErrorResponse),
        (status = 404, description = "User or group not found", body = ErrorResponse)
    )
)]
pub async fn list_settlements(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Json(req): Json<GroupQueryRequest>,
) -> Result<Json<Vec<Settlement>>, ApiError> {
    let queried_by = require_user(&service, req.queried_by_id).await?;
    Ok(Json(service.list_settlements(&group_id, &queried_by).await?))
}

#[utoipa::path(
    post,
    path = "/api/settlements/{settlement_id}/confirm",
    request_body = ConfirmSettlementRequest,
    params(
        ("settlement_id" = String, Path, description = "ID of the settlement")
    ),
    responses(
        (status = 200, description = "Settlement confirmed", body = Settlement),
        (status = 403, description = "Only the receiver can confirm", body = ErrorResponse),
        (status = 404, description = "Settlement or user not found", body = ErrorResponse),
        (status = 409, description = "Settlement already confirmed", body = ErrorResponse)
    )
)]
pub async fn confirm_settlement(
    State(service): State<SharedService>,
    Path(settlement_id): Path<String>,
    Json(req): Json<ConfirmSettlementRequest>,
) -> Result<Json<Settlement>, ApiError> {
    let confirmed_by = require_user(&service, req.confirmed_by_id).await?;
    Ok(Json(service.confirm_settlement(&settlement_id, &confirmed_by).await?))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/balances",
    request_body = GroupQueryRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Member balances and suggested transactions per currency", body = GroupBalances),
        (status = 403, description = "Not a group member", body = ErrorResponse),
        (status = 404, description = "User or group not found", body = ErrorResponse)
    )
)]
pub async fn get_group_balances(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Json(req): Json<GroupQueryRequest>,
) -> Result<Json<GroupBalances>, ApiError> {
    let queried_by = require_user(&service, req.queried_by_id).await?;
    Ok(Json(service.get_group_balances(&group_id, &queried_by).await?))
}

#[utoipa::path(
    post,
    path = "/api/dashboard",
    request_body = DashboardRequest,
    responses(
        (status = 200, description = "Totals across the user's groups", body = Dashboard),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_dashboard(
    State(service): State<SharedService>,
    Json(req): Json<DashboardRequest>,
) -> Result<Json<Dashboard>, ApiError> {
    let user = require_user(&service, req.user_id).await?;
    Ok(Json(service.get_dashboard(&user).await?))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/audits",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Group audits retrieved successfully", body = Vec<GroupAudit>),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_group_audits(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<GroupAudit>>, ApiError> {
    Ok(Json(service.get_group_audits(&group_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Application logs retrieved successfully", body = Vec<AppLog>)
    )
)]
pub async fn get_app_logs(State(service): State<SharedService>) -> Result<Json<Vec<AppLog>>, ApiError> {
    Ok(Json(service.get_app_logs().await?))
}
