use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize)]
pub enum LedgerError {
    #[error("Email is required")]
    MissingEmail,
    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),
    #[error("User {0} already exists")]
    UserAlreadyExists(String),
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),
    #[error("User {0} not found")]
    UserNotFound(String),
    #[error("Group {0} not found")]
    GroupNotFound(String),
    #[error("User {0} is already a group member")]
    AlreadyGroupMember(String),
    #[error("User {0} is not a group member")]
    NotGroupMember(String),
    #[error("Invalid split user: {0}")]
    InvalidSplitUser(String),
    #[error("Invalid split amounts")]
    InvalidSplit,
    #[error("Cannot create settlement to self")]
    SelfSettlement,
    #[error("Settlement {0} not found")]
    SettlementNotFound(String),
    #[error("Settlement {0} already confirmed")]
    SettlementAlreadyConfirmed(String),
    #[error("User {0} not authorized to confirm settlement")]
    UnauthorizedSettlementConfirmation(String),
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl LedgerError {
    pub fn invalid_input(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        LedgerError::InvalidInput(
            field.to_string(),
            FieldError {
                field: field.to_string(),
                title: title.into(),
                description: description.into(),
            },
        )
    }
}
