use serde::{Deserialize, Serialize};

use crate::client::query::Query;
use crate::display::TerminalDisplay;

use super::account::{AccountStatus, AccountType};
use super::loan::LoanStatus;
use super::repayment::RepaymentMethod;
use super::transaction::Transaction;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatement {
    pub account_id: u64,
    pub account_type: AccountType,
    pub statement_period: String,
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub total_deposits: f64,
    pub total_withdrawals: f64,
    pub transactions: Vec<StatementTransaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementTransaction {
    pub date: String,
    pub description: String,
    pub debit: Option<f64>,
    pub credit: Option<f64>,
    pub balance: f64,
}

impl TerminalDisplay for StatementTransaction {
    fn table_titles() -> Vec<&'static str> {
        vec!["Date", "Description", "Debit", "Credit", "Balance"]
    }

    fn table_row(self) -> Vec<String> {
        let money = |v: Option<f64>| v.map(|v| format!("{v:.2}")).unwrap_or_default();
        vec![
            self.date,
            self.description,
            money(self.debit),
            money(self.credit),
            format!("{:.2}", self.balance),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanStatement {
    pub loan_id: u64,
    pub user_id: u64,
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub disburse_date: String,
    pub due_date: String,
    pub principal_repaid: f64,
    pub principal_balance: f64,
    pub interest_accrued: f64,
    pub total_repaid: f64,
    pub status: LoanStatus,
    pub repayments: Vec<LoanStatementRepayment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanStatementRepayment {
    pub date: String,
    pub amount: f64,
    pub method: RepaymentMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDashboard {
    pub user_id: u64,
    pub total_account_balance: f64,
    pub account_count: u64,
    pub active_loans: u64,
    pub total_loan_balance: f64,
    pub recent_transactions: Vec<Transaction>,
    pub pending_approvals: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub total_users: u64,
    pub active_users: u64,
    pub pending_approvals: u64,
    pub total_loans: u64,
    pub active_loans: u64,
    pub total_disbursed: f64,
    pub total_repaid: f64,
    pub recent_activity: Vec<ActivityItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub id: u64,

    #[serde(rename = "type")]
    pub kind: String,

    pub description: String,
    pub timestamp: String,
    pub user_id: u64,
}

impl TerminalDisplay for ActivityItem {
    fn table_titles() -> Vec<&'static str> {
        vec!["ID", "Type", "User", "Time", "Description"]
    }

    fn table_row(self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.kind,
            self.user_id.to_string(),
            self.timestamp,
            self.description,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatistics {
    pub total_users: u64,
    pub active_users: u64,
    pub total_accounts: u64,
    pub total_balance: f64,
    pub total_loans: u64,
    pub total_disbursed: f64,
    pub total_repaid: f64,
    pub total_outstanding: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountsSummary {
    pub total_balance: f64,
    pub account_count: u64,
    pub accounts: Vec<AccountSummaryItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummaryItem {
    pub account_id: u64,
    pub account_type: AccountType,
    pub balance: f64,
    pub status: AccountStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoansSummary {
    pub total_loans: u64,
    pub active_loans: u64,
    pub total_borrowed: f64,
    pub total_repaid: f64,
    pub total_outstanding: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub total_deposits: f64,
    pub total_withdrawals: f64,
    pub total_transfers: f64,
    pub net_flow: f64,
    pub transaction_count: u64,
}

#[derive(Debug, Clone, Default)]
pub struct StatementQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl StatementQuery {
    pub fn to_query(&self) -> Query {
        Query::new()
            .maybe_text("startDate", self.start_date.clone())
            .maybe_text("endDate", self.end_date.clone())
    }
}
