pub mod audit;
pub mod expense;
pub mod group;
pub mod settlement;
pub mod transaction;
pub mod user;

pub use audit::{AppLog, GroupAudit};
pub use expense::{Category, Expense, Split, SplitType};
pub use group::{Group, GroupKind, GroupMember, Role};
pub use settlement::{Settlement, SettlementStatus};
pub use transaction::SuggestedTransaction;
pub use user::{Member, MemberId, User};
