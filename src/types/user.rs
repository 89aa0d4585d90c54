use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::query::Query;
use crate::display::TerminalDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Pending,
    Active,
    Suspended,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Pending => "PENDING",
            UserStatus::Active => "ACTIVE",
            UserStatus::Suspended => "SUSPENDED",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Client,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Client => "client",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: UserStatus,
    pub role: UserRole,
    pub registration_date: String,
}

impl TerminalDisplay for User {
    fn table_titles() -> Vec<&'static str> {
        vec!["ID", "Name", "Email", "Phone", "Role", "Status", "Registered"]
    }

    fn table_row(self) -> Vec<String> {
        vec![
            self.user_id.to_string(),
            self.name,
            self.email,
            self.phone,
            self.role.to_string(),
            self.status.to_string(),
            self.registration_date,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveUserRequest {
    pub status: UserStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectUserRequest {
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspendUserRequest {
    pub reason: String,
}

/// Page of users as returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedUsers {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<UserStatus>,
    pub role: Option<UserRole>,
    pub search: Option<String>,
}

impl UserQuery {
    pub fn to_query(&self) -> Query {
        Query::new()
            .maybe_integer("page", self.page)
            .maybe_integer("limit", self.limit)
            .maybe_text("status", self.status)
            .maybe_text("role", self.role)
            .maybe_text("search", self.search.clone())
    }
}
