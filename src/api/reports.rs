use chrono::NaiveDate;

use crate::client::query::Query;
use crate::client::{ApiError, Client};
use crate::types::report::{
    AccountStatement, AccountsSummary, ActivityItem, AdminDashboard, AdminStatistics,
    LoanStatement, LoansSummary, StatementQuery, TransactionSummary, UserDashboard,
};

#[derive(Clone)]
pub struct ReportApi {
    client: Client,
}

impl ReportApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn account_statement(
        &self,
        account_id: u64,
        params: Option<&StatementQuery>,
    ) -> Result<AccountStatement, ApiError> {
        let query = params.map(StatementQuery::to_query);
        self.client
            .get(
                &format!("/reports/statement/account/{account_id}"),
                query.as_ref(),
            )
            .await
    }

    pub async fn account_statement_range(
        &self,
        account_id: u64,
        start_date: &str,
        end_date: &str,
    ) -> Result<AccountStatement, ApiError> {
        let params = StatementQuery {
            start_date: Some(start_date.to_string()),
            end_date: Some(end_date.to_string()),
        };
        self.account_statement(account_id, Some(&params)).await
    }

    pub async fn monthly_account_statement(
        &self,
        account_id: u64,
        year: i32,
        month: u32,
    ) -> Result<AccountStatement, ApiError> {
        let (start, end) = match month_bounds(year, month) {
            Some(bounds) => bounds,
            None => {
                return Err(ApiError {
                    message: format!("invalid statement month {year}-{month}"),
                    status_code: 0,
                    errors: None,
                })
            }
        };
        self.account_statement_range(account_id, &start.to_string(), &end.to_string())
            .await
    }

    pub async fn yearly_account_statement(
        &self,
        account_id: u64,
        year: i32,
    ) -> Result<AccountStatement, ApiError> {
        self.account_statement_range(account_id, &format!("{year}-01-01"), &format!("{year}-12-31"))
            .await
    }

    pub async fn loan_statement(
        &self,
        loan_id: u64,
        params: Option<&StatementQuery>,
    ) -> Result<LoanStatement, ApiError> {
        let query = params.map(StatementQuery::to_query);
        self.client
            .get(&format!("/reports/statement/loan/{loan_id}"), query.as_ref())
            .await
    }

    pub async fn user_dashboard(&self, user_id: u64) -> Result<UserDashboard, ApiError> {
        self.client
            .get(&format!("/reports/dashboard/{user_id}"), None)
            .await
    }

    pub async fn admin_dashboard(&self) -> Result<AdminDashboard, ApiError> {
        self.client.get("/reports/admin/dashboard", None).await
    }

    pub async fn admin_statistics(&self) -> Result<AdminStatistics, ApiError> {
        self.client.get("/reports/admin/statistics", None).await
    }

    pub async fn accounts_summary(&self, user_id: u64) -> Result<AccountsSummary, ApiError> {
        self.client
            .get(&format!("/reports/accounts/user/{user_id}"), None)
            .await
    }

    pub async fn loans_summary(&self, user_id: u64) -> Result<LoansSummary, ApiError> {
        self.client
            .get(&format!("/reports/loans/user/{user_id}"), None)
            .await
    }

    pub async fn transaction_summary(
        &self,
        account_id: u64,
        params: Option<&StatementQuery>,
    ) -> Result<TransactionSummary, ApiError> {
        let query = params.map(StatementQuery::to_query);
        self.client
            .get(
                &format!("/reports/transactions/account/{account_id}"),
                query.as_ref(),
            )
            .await
    }

    pub async fn recent_activity(&self, limit: u64) -> Result<Vec<ActivityItem>, ApiError> {
        let query = Query::new().integer("limit", limit);
        self.client.get("/reports/admin/activity", Some(&query)).await
    }
}

/// First and last day of a calendar month. `None` for an invalid month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let end = next.pred_opt()?;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds() {
        let (start, end) = month_bounds(2024, 1).unwrap();
        assert_eq!(start.to_string(), "2024-01-01");
        assert_eq!(end.to_string(), "2024-01-31");

        // Leap year February
        let (start, end) = month_bounds(2024, 2).unwrap();
        assert_eq!(start.to_string(), "2024-02-01");
        assert_eq!(end.to_string(), "2024-02-29");

        let (start, end) = month_bounds(2023, 12).unwrap();
        assert_eq!(start.to_string(), "2023-12-01");
        assert_eq!(end.to_string(), "2023-12-31");
    }

    #[test]
    fn test_month_bounds_invalid() {
        assert!(month_bounds(2024, 0).is_none());
        assert!(month_bounds(2024, 13).is_none());
    }
}
