use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::query::Query;
use crate::display::TerminalDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
    Disbursed,
    Repaying,
    Completed,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "PENDING",
            LoanStatus::Approved => "APPROVED",
            LoanStatus::Rejected => "REJECTED",
            LoanStatus::Disbursed => "DISBURSED",
            LoanStatus::Repaying => "REPAYING",
            LoanStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub loan_id: u64,
    pub user_id: u64,
    pub amount: f64,

    /// Annual rate as a fraction, e.g. 0.12 for 12%.
    pub interest_rate: f64,

    pub repayment_period_months: u32,
    pub status: LoanStatus,
    pub request_date: String,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub principal_balance: Option<f64>,
    pub total_repaid: Option<f64>,
}

impl TerminalDisplay for Loan {
    fn table_titles() -> Vec<&'static str> {
        vec!["ID", "User", "Amount", "Rate", "Months", "Status", "Requested"]
    }

    fn table_row(self) -> Vec<String> {
        vec![
            self.loan_id.to_string(),
            self.user_id.to_string(),
            format!("{:.2}", self.amount),
            format!("{:.2}%", self.interest_rate * 100.0),
            self.repayment_period_months.to_string(),
            self.status.to_string(),
            self.request_date,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoanRequest {
    pub user_id: u64,
    pub amount: f64,
    pub interest_rate: f64,
    pub repayment_period_months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveLoanRequest {
    pub approved_amount: f64,
    pub approval_notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectLoanRequest {
    pub rejection_reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisburseLoanRequest {
    pub account_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLoanRequest {
    pub status: LoanStatus,
}

#[derive(Debug, Clone, Default)]
pub struct LoanQuery {
    pub status: Option<LoanStatus>,
}

impl LoanQuery {
    pub fn to_query(&self) -> Query {
        Query::new().maybe_text("status", self.status)
    }
}
