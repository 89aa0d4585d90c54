use crate::client::{ApiError, Client};
use crate::types::account::{
    Account, AccountQuery, AccountStatus, CreateAccountRequest, UpdateAccountRequest,
};
use crate::types::response::SuccessResponse;

#[derive(Clone)]
pub struct AccountApi {
    client: Client,
}

impl AccountApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn user_accounts(
        &self,
        user_id: u64,
        params: Option<&AccountQuery>,
    ) -> Result<Vec<Account>, ApiError> {
        let query = params.map(AccountQuery::to_query);
        self.client
            .get(&format!("/accounts/user/{user_id}"), query.as_ref())
            .await
    }

    pub async fn get(&self, account_id: u64) -> Result<Account, ApiError> {
        self.client
            .get(&format!("/accounts/{account_id}"), None)
            .await
    }

    pub async fn create(&self, data: &CreateAccountRequest) -> Result<Account, ApiError> {
        self.client.post("/accounts", Some(data)).await
    }

    pub async fn update(
        &self,
        account_id: u64,
        data: &UpdateAccountRequest,
    ) -> Result<SuccessResponse, ApiError> {
        self.client
            .put(&format!("/accounts/{account_id}"), Some(data))
            .await
    }

    /// Closes an account. The backend requires a zero balance first.
    pub async fn close(&self, account_id: u64) -> Result<SuccessResponse, ApiError> {
        self.client
            .delete(&format!("/accounts/{account_id}"), None)
            .await
    }

    /// There is no dedicated balance endpoint; this reads the account and
    /// projects the balance field.
    pub async fn balance(&self, account_id: u64) -> Result<f64, ApiError> {
        let account = self.get(account_id).await?;
        Ok(account.balance)
    }

    pub async fn active(&self, user_id: u64) -> Result<Vec<Account>, ApiError> {
        let params = AccountQuery {
            status: Some(AccountStatus::Active),
        };
        self.user_accounts(user_id, Some(&params)).await
    }

    pub async fn pending(&self, user_id: u64) -> Result<Vec<Account>, ApiError> {
        let params = AccountQuery {
            status: Some(AccountStatus::Pending),
        };
        self.user_accounts(user_id, Some(&params)).await
    }

    pub async fn suspend(&self, account_id: u64) -> Result<SuccessResponse, ApiError> {
        let req = UpdateAccountRequest {
            status: AccountStatus::Suspended,
        };
        self.update(account_id, &req).await
    }

    pub async fn activate(&self, account_id: u64) -> Result<SuccessResponse, ApiError> {
        let req = UpdateAccountRequest {
            status: AccountStatus::Active,
        };
        self.update(account_id, &req).await
    }
}
