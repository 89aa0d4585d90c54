use crate::client::{ApiError, Client};
use crate::types::response::SuccessResponse;
use crate::types::transaction::{
    CreateTransactionRequest, Transaction, TransactionQuery, TransactionType,
    UpdateTransactionRequest,
};

#[derive(Clone)]
pub struct TransactionApi {
    client: Client,
}

impl TransactionApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn account_transactions(
        &self,
        account_id: u64,
        params: Option<&TransactionQuery>,
    ) -> Result<Vec<Transaction>, ApiError> {
        let query = params.map(TransactionQuery::to_query);
        self.client
            .get(&format!("/transactions/account/{account_id}"), query.as_ref())
            .await
    }

    pub async fn get(&self, transaction_id: u64) -> Result<Transaction, ApiError> {
        self.client
            .get(&format!("/transactions/{transaction_id}"), None)
            .await
    }

    pub async fn create(&self, data: &CreateTransactionRequest) -> Result<Transaction, ApiError> {
        self.client.post("/transactions", Some(data)).await
    }

    pub async fn update(
        &self,
        transaction_id: u64,
        data: &UpdateTransactionRequest,
    ) -> Result<SuccessResponse, ApiError> {
        self.client
            .put(&format!("/transactions/{transaction_id}"), Some(data))
            .await
    }

    /// Cancels or reverses a transaction. Admin only.
    pub async fn reverse(&self, transaction_id: u64) -> Result<SuccessResponse, ApiError> {
        self.client
            .delete(&format!("/transactions/{transaction_id}"), None)
            .await
    }

    pub async fn deposit(
        &self,
        account_id: u64,
        amount: f64,
        description: &str,
    ) -> Result<Transaction, ApiError> {
        let req = CreateTransactionRequest {
            account_id,
            kind: TransactionType::Deposit,
            amount,
            description: description.to_string(),
        };
        self.create(&req).await
    }

    pub async fn withdraw(
        &self,
        account_id: u64,
        amount: f64,
        description: &str,
    ) -> Result<Transaction, ApiError> {
        let req = CreateTransactionRequest {
            account_id,
            kind: TransactionType::Withdrawal,
            amount,
            description: description.to_string(),
        };
        self.create(&req).await
    }

    /// A transfer is posted against the source account; the destination is
    /// recorded in the description.
    pub async fn transfer(
        &self,
        from_account_id: u64,
        to_account_id: u64,
        amount: f64,
        description: &str,
    ) -> Result<Transaction, ApiError> {
        let req = CreateTransactionRequest {
            account_id: from_account_id,
            kind: TransactionType::Transfer,
            amount,
            description: format!("Transfer to account {to_account_id}: {description}"),
        };
        self.create(&req).await
    }

    pub async fn by_type(
        &self,
        account_id: u64,
        kind: TransactionType,
    ) -> Result<Vec<Transaction>, ApiError> {
        let params = TransactionQuery {
            kind: Some(kind),
            ..Default::default()
        };
        self.account_transactions(account_id, Some(&params)).await
    }

    pub async fn by_date_range(
        &self,
        account_id: u64,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Transaction>, ApiError> {
        let params = TransactionQuery {
            start_date: Some(start_date.to_string()),
            end_date: Some(end_date.to_string()),
            ..Default::default()
        };
        self.account_transactions(account_id, Some(&params)).await
    }

    pub async fn recent(&self, account_id: u64, limit: u64) -> Result<Vec<Transaction>, ApiError> {
        let params = TransactionQuery {
            limit: Some(limit),
            ..Default::default()
        };
        self.account_transactions(account_id, Some(&params)).await
    }

    pub async fn history(
        &self,
        account_id: u64,
        page: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, ApiError> {
        let params = TransactionQuery {
            page: Some(page),
            limit: Some(limit),
            ..Default::default()
        };
        self.account_transactions(account_id, Some(&params)).await
    }
}
