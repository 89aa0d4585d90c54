use crate::client::{ApiError, Client};
use crate::types::loan::{
    ApproveLoanRequest, CreateLoanRequest, DisburseLoanRequest, Loan, LoanQuery, LoanStatus,
    RejectLoanRequest, UpdateLoanRequest,
};
use crate::types::response::SuccessResponse;

#[derive(Clone)]
pub struct LoanApi {
    client: Client,
}

impl LoanApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn request(&self, data: &CreateLoanRequest) -> Result<Loan, ApiError> {
        self.client.post("/loans", Some(data)).await
    }

    pub async fn user_loans(
        &self,
        user_id: u64,
        params: Option<&LoanQuery>,
    ) -> Result<Vec<Loan>, ApiError> {
        let query = params.map(LoanQuery::to_query);
        self.client
            .get(&format!("/loans/user/{user_id}"), query.as_ref())
            .await
    }

    pub async fn get(&self, loan_id: u64) -> Result<Loan, ApiError> {
        self.client.get(&format!("/loans/{loan_id}"), None).await
    }

    pub async fn approve(
        &self,
        loan_id: u64,
        data: &ApproveLoanRequest,
    ) -> Result<SuccessResponse, ApiError> {
        self.client
            .put(&format!("/loans/{loan_id}/approve"), Some(data))
            .await
    }

    pub async fn reject(&self, loan_id: u64, reason: &str) -> Result<SuccessResponse, ApiError> {
        let req = RejectLoanRequest {
            rejection_reason: reason.to_string(),
        };
        self.client
            .put(&format!("/loans/{loan_id}/reject"), Some(&req))
            .await
    }

    /// Pays an approved loan out to an account. Admin only.
    pub async fn disburse(
        &self,
        loan_id: u64,
        account_id: u64,
    ) -> Result<SuccessResponse, ApiError> {
        let req = DisburseLoanRequest { account_id };
        self.client
            .post(&format!("/loans/{loan_id}/disburse"), Some(&req))
            .await
    }

    pub async fn update(
        &self,
        loan_id: u64,
        data: &UpdateLoanRequest,
    ) -> Result<SuccessResponse, ApiError> {
        self.client
            .put(&format!("/loans/{loan_id}"), Some(data))
            .await
    }

    /// Closes a loan. The backend requires the balance to be fully repaid.
    pub async fn close(&self, loan_id: u64) -> Result<SuccessResponse, ApiError> {
        self.client.delete(&format!("/loans/{loan_id}"), None).await
    }

    pub async fn all(&self, params: Option<&LoanQuery>) -> Result<Vec<Loan>, ApiError> {
        let query = params.map(LoanQuery::to_query);
        self.client.get("/loans", query.as_ref()).await
    }

    pub async fn pending(&self) -> Result<Vec<Loan>, ApiError> {
        let params = LoanQuery {
            status: Some(LoanStatus::Pending),
        };
        self.all(Some(&params)).await
    }

    pub async fn approved(&self) -> Result<Vec<Loan>, ApiError> {
        let params = LoanQuery {
            status: Some(LoanStatus::Approved),
        };
        self.all(Some(&params)).await
    }

    pub async fn active(&self, user_id: u64) -> Result<Vec<Loan>, ApiError> {
        let params = LoanQuery {
            status: Some(LoanStatus::Repaying),
        };
        self.user_loans(user_id, Some(&params)).await
    }

    pub async fn completed(&self, user_id: u64) -> Result<Vec<Loan>, ApiError> {
        let params = LoanQuery {
            status: Some(LoanStatus::Completed),
        };
        self.user_loans(user_id, Some(&params)).await
    }
}

/// Simple interest for a flat-rate loan: `principal * rate * years`.
///
/// The backend owns the authoritative schedule; these figures are estimates
/// shown before a loan is approved.
pub fn calculate_interest(principal: f64, annual_rate: f64, months: u32) -> f64 {
    principal * annual_rate * (f64::from(months) / 12.0)
}

/// Principal plus flat simple interest over the repayment period.
pub fn calculate_total_repayment(principal: f64, annual_rate: f64, months: u32) -> f64 {
    principal + calculate_interest(principal, annual_rate, months)
}

/// Flat amortization: the total repayment divided evenly across the months.
/// Not a reducing-balance schedule.
pub fn calculate_monthly_payment(principal: f64, annual_rate: f64, months: u32) -> f64 {
    calculate_total_repayment(principal, annual_rate, months) / f64::from(months)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_interest() {
        assert_eq!(calculate_interest(100000.0, 0.12, 12), 12000.0);
        assert_eq!(calculate_interest(100000.0, 0.12, 6), 6000.0);
        assert_eq!(calculate_interest(50000.0, 0.10, 24), 10000.0);
        assert_eq!(calculate_interest(0.0, 0.12, 12), 0.0);
    }

    #[test]
    fn test_calculate_total_repayment() {
        assert_eq!(calculate_total_repayment(100000.0, 0.12, 12), 112000.0);
        assert_eq!(calculate_total_repayment(50000.0, 0.10, 24), 60000.0);
    }

    #[test]
    fn test_calculate_monthly_payment() {
        let monthly = calculate_monthly_payment(100000.0, 0.12, 12);
        assert!((monthly - 9333.333333).abs() < 1e-6);

        // A one-month loan repays everything at once.
        assert_eq!(
            calculate_monthly_payment(100000.0, 0.12, 1),
            calculate_total_repayment(100000.0, 0.12, 1)
        );
    }
}
