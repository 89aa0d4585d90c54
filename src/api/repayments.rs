use crate::client::query::Query;
use crate::client::{ApiError, Client};
use crate::types::repayment::{
    CreateRepaymentRequest, Repayment, RepaymentMethod, RepaymentQuery, RepaymentStatus,
    UpdateRepaymentRequest,
};
use crate::types::response::SuccessResponse;

#[derive(Clone)]
pub struct RepaymentApi {
    client: Client,
}

impl RepaymentApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn make(&self, data: &CreateRepaymentRequest) -> Result<Repayment, ApiError> {
        self.client.post("/repayments", Some(data)).await
    }

    pub async fn loan_repayments(
        &self,
        loan_id: u64,
        params: Option<&RepaymentQuery>,
    ) -> Result<Vec<Repayment>, ApiError> {
        let query = params.map(RepaymentQuery::to_query);
        self.client
            .get(&format!("/repayments/loan/{loan_id}"), query.as_ref())
            .await
    }

    pub async fn get(&self, repayment_id: u64) -> Result<Repayment, ApiError> {
        self.client
            .get(&format!("/repayments/{repayment_id}"), None)
            .await
    }

    pub async fn update(
        &self,
        repayment_id: u64,
        data: &UpdateRepaymentRequest,
    ) -> Result<SuccessResponse, ApiError> {
        self.client
            .put(&format!("/repayments/{repayment_id}"), Some(data))
            .await
    }

    /// Reverses or cancels a repayment. Admin only.
    pub async fn reverse(&self, repayment_id: u64) -> Result<SuccessResponse, ApiError> {
        self.client
            .delete(&format!("/repayments/{repayment_id}"), None)
            .await
    }

    pub async fn verify(&self, repayment_id: u64) -> Result<SuccessResponse, ApiError> {
        let req = UpdateRepaymentRequest {
            status: RepaymentStatus::Verified,
        };
        self.update(repayment_id, &req).await
    }

    pub async fn recent(&self, loan_id: u64, limit: u64) -> Result<Vec<Repayment>, ApiError> {
        let params = RepaymentQuery {
            limit: Some(limit),
            ..Default::default()
        };
        self.loan_repayments(loan_id, Some(&params)).await
    }

    pub async fn history(
        &self,
        loan_id: u64,
        page: u64,
        limit: u64,
    ) -> Result<Vec<Repayment>, ApiError> {
        let params = RepaymentQuery {
            page: Some(page),
            limit: Some(limit),
        };
        self.loan_repayments(loan_id, Some(&params)).await
    }

    /// Sums the completed repayments of a loan. There is no dedicated
    /// endpoint; this fetches the full list and folds it client-side.
    pub async fn total_repaid(&self, loan_id: u64) -> Result<f64, ApiError> {
        let repayments = self.loan_repayments(loan_id, None).await?;
        Ok(repayments
            .iter()
            .filter(|r| r.status == RepaymentStatus::Completed)
            .map(|r| r.amount)
            .sum())
    }

    /// Repayments awaiting admin verification.
    pub async fn pending(&self) -> Result<Vec<Repayment>, ApiError> {
        let query = Query::new().text("status", RepaymentStatus::Pending);
        self.client.get("/repayments", Some(&query)).await
    }

    pub async fn bank_transfer(
        &self,
        loan_id: u64,
        amount: f64,
        reference: &str,
    ) -> Result<Repayment, ApiError> {
        self.with_method(loan_id, amount, RepaymentMethod::BankTransfer, reference)
            .await
    }

    pub async fn mobile_money(
        &self,
        loan_id: u64,
        amount: f64,
        reference: &str,
    ) -> Result<Repayment, ApiError> {
        self.with_method(loan_id, amount, RepaymentMethod::MobileMoney, reference)
            .await
    }

    pub async fn cash(
        &self,
        loan_id: u64,
        amount: f64,
        reference: &str,
    ) -> Result<Repayment, ApiError> {
        self.with_method(loan_id, amount, RepaymentMethod::Cash, reference)
            .await
    }

    async fn with_method(
        &self,
        loan_id: u64,
        amount: f64,
        method: RepaymentMethod,
        reference: &str,
    ) -> Result<Repayment, ApiError> {
        let req = CreateRepaymentRequest {
            loan_id,
            amount,
            method,
            reference: reference.to_string(),
        };
        self.make(&req).await
    }
}
