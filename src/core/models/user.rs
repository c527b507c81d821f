use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub type MemberId = String;

/// Roster entry handed to the debt optimizer: identity plus optional display name.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub name: Option<String>,
}

impl Member {
    /// Stand-in for an id missing from the roster.
    pub fn placeholder(id: &str) -> Self {
        Member {
            id: id.to_string(),
            name: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: MemberId,
    pub name: Option<String>,
    pub email: String,
}

impl User {
    pub fn as_member(&self) -> Member {
        Member {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}
