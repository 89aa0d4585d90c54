use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::query::Query;
use crate::display::TerminalDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Savings,
    Current,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "SAVINGS",
            AccountType::Current => "CURRENT",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Pending,
    Suspended,
    Closed,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Pending => "PENDING",
            AccountStatus::Suspended => "SUSPENDED",
            AccountStatus::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: u64,
    pub user_id: u64,
    pub balance: f64,
    pub account_type: AccountType,
    pub status: AccountStatus,
    pub created_at: String,
    pub last_transaction_date: Option<String>,
}

impl TerminalDisplay for Account {
    fn table_titles() -> Vec<&'static str> {
        vec!["ID", "User", "Type", "Balance", "Status", "Created"]
    }

    fn table_row(self) -> Vec<String> {
        vec![
            self.account_id.to_string(),
            self.user_id.to_string(),
            self.account_type.to_string(),
            format!("{:.2}", self.balance),
            self.status.to_string(),
            self.created_at,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub user_id: u64,
    pub account_type: AccountType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub status: AccountStatus,
}

#[derive(Debug, Clone, Default)]
pub struct AccountQuery {
    pub status: Option<AccountStatus>,
}

impl AccountQuery {
    pub fn to_query(&self) -> Query {
        Query::new().maybe_text("status", self.status)
    }
}
