use utoipa::OpenApi;

use crate::{
    api::models::{
        AddExpenseRequest, AddMemberRequest, ConfirmSettlementRequest, CreateGroupRequest, CreateSettlementRequest,
        CreateUserRequest, DashboardRequest, ErrorResponse, GroupQueryRequest,
    },
    core::{
        balance::{BalanceTotals, MemberBalance},
        models::{
            AppLog, Category, Expense, Group, GroupAudit, GroupKind, GroupMember, Member, Role, Settlement,
            SettlementStatus, Split, SplitType, SuggestedTransaction, User,
        },
        services::{CurrencyBalances, Dashboard, GroupBalances, GroupSummary, NewExpense, NewSplit, RecentExpense},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_user,
        super::handlers::get_user,
        super::handlers::create_group,
        super::handlers::add_member,
        super::handlers::add_expense,
        super::handlers::list_expenses,
        super::handlers::create_settlement,
        super::handlers::list_settlements,
        super::handlers::confirm_settlement,
        super::handlers::get_group_balances,
        super::handlers::get_dashboard,
        super::handlers::get_group_audits,
        super::handlers::get_app_logs
    ),
    components(schemas(
        CreateUserRequest,
        CreateGroupRequest,
        AddMemberRequest,
        AddExpenseRequest,
        NewExpense,
        NewSplit,
        CreateSettlementRequest,
        ConfirmSettlementRequest,
        GroupQueryRequest,
        DashboardRequest,
        ErrorResponse,
        User,
        Member,
        Group,
        GroupKind,
        GroupMember,
        Role,
        Expense,
        Split,
        SplitType,
        Category,
        Settlement,
        SettlementStatus,
        SuggestedTransaction,
        MemberBalance,
        CurrencyBalances,
        GroupBalances,
        BalanceTotals,
        GroupSummary,
        RecentExpense,
        Dashboard,
        AppLog,
        GroupAudit
    )),
    info(
        title = "Splitledger API",
        description = "API for tracking shared group expenses and settling balances with the fewest transfers",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
