use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::query::Query;
use crate::display::TerminalDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
    Repayment,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdrawal => "WITHDRAWAL",
            TransactionType::Transfer => "TRANSFER",
            TransactionType::Repayment => "REPAYMENT",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Reversed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Reversed => "REVERSED",
            TransactionStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: u64,
    pub account_id: u64,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub amount: f64,
    pub timestamp: String,
    pub description: String,
    pub status: TransactionStatus,
    pub reference_number: Option<String>,
}

impl TerminalDisplay for Transaction {
    fn table_titles() -> Vec<&'static str> {
        vec!["ID", "Account", "Type", "Amount", "Status", "Time", "Description"]
    }

    fn table_row(self) -> Vec<String> {
        vec![
            self.transaction_id.to_string(),
            self.account_id.to_string(),
            self.kind.to_string(),
            format!("{:.2}", self.amount),
            self.status.to_string(),
            self.timestamp,
            self.description,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub account_id: u64,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub amount: f64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionRequest {
    pub status: TransactionStatus,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    pub kind: Option<TransactionType>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl TransactionQuery {
    pub fn to_query(&self) -> Query {
        Query::new()
            .maybe_text("type", self.kind)
            .maybe_text("startDate", self.start_date.clone())
            .maybe_text("endDate", self.end_date.clone())
            .maybe_integer("page", self.page)
            .maybe_integer("limit", self.limit)
    }
}
