use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::query::Query;
use crate::display::TerminalDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepaymentMethod {
    BankTransfer,
    MobileMoney,
    Cash,
    Card,
}

impl RepaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepaymentMethod::BankTransfer => "BANK_TRANSFER",
            RepaymentMethod::MobileMoney => "MOBILE_MONEY",
            RepaymentMethod::Cash => "CASH",
            RepaymentMethod::Card => "CARD",
        }
    }
}

impl fmt::Display for RepaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepaymentStatus {
    Completed,
    Pending,
    Verified,
    Failed,
}

impl RepaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepaymentStatus::Completed => "COMPLETED",
            RepaymentStatus::Pending => "PENDING",
            RepaymentStatus::Verified => "VERIFIED",
            RepaymentStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for RepaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repayment {
    pub repayment_id: u64,
    pub loan_id: u64,
    pub amount: f64,
    pub timestamp: String,
    pub method: RepaymentMethod,
    pub reference: String,
    pub status: RepaymentStatus,
    pub remaining_balance: Option<f64>,
    pub receipt_number: Option<String>,
}

impl TerminalDisplay for Repayment {
    fn table_titles() -> Vec<&'static str> {
        vec!["ID", "Loan", "Amount", "Method", "Status", "Time", "Reference"]
    }

    fn table_row(self) -> Vec<String> {
        vec![
            self.repayment_id.to_string(),
            self.loan_id.to_string(),
            format!("{:.2}", self.amount),
            self.method.to_string(),
            self.status.to_string(),
            self.timestamp,
            self.reference,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepaymentRequest {
    pub loan_id: u64,
    pub amount: f64,
    pub method: RepaymentMethod,
    pub reference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRepaymentRequest {
    pub status: RepaymentStatus,
}

#[derive(Debug, Clone, Default)]
pub struct RepaymentQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl RepaymentQuery {
    pub fn to_query(&self) -> Query {
        Query::new()
            .maybe_integer("page", self.page)
            .maybe_integer("limit", self.limit)
    }
}
