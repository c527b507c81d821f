use crate::core::money::Money;

/// Balances and transfer amounts at or below this magnitude count as settled.
pub const DEAD_ZONE: Money = Money::CENT;

/// Tolerated gap between an expense total and the sum of its unequal splits.
pub const SPLIT_TOLERANCE: Money = Money::CENT;

pub const DEFAULT_CURRENCY: &str = "RSD";

pub const MAX_AMOUNT: f64 = 1_000_000.0;
pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_CURRENCY_LENGTH: usize = 8;
pub const RECENT_EXPENSES_LIMIT: usize = 5;

// Activity log actions
pub const USER_ADDED: &str = "USER_ADDED";
pub const GROUP_CREATED: &str = "GROUP_CREATED";
pub const MEMBER_ADDED: &str = "MEMBER_ADDED";
pub const EXPENSE_ADDED: &str = "EXPENSE_ADDED";
pub const EXPENSES_QUERIED: &str = "EXPENSES_QUERIED";
pub const SETTLEMENT_CREATED: &str = "SETTLEMENT_CREATED";
pub const SETTLEMENT_CONFIRMED: &str = "SETTLEMENT_CONFIRMED";
pub const SETTLEMENTS_QUERIED: &str = "SETTLEMENTS_QUERIED";
pub const BALANCE_QUERIED: &str = "BALANCE_QUERIED";
pub const DASHBOARD_QUERIED: &str = "DASHBOARD_QUERIED";
