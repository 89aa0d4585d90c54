use crate::client::{ApiError, Client};
use crate::types::response::SuccessResponse;
use crate::types::user::{
    ApproveUserRequest, PaginatedUsers, RejectUserRequest, SuspendUserRequest, UpdateUserRequest,
    User, UserQuery, UserStatus,
};

#[derive(Clone)]
pub struct UserApi {
    client: Client,
}

impl UserApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn get_profile(&self, user_id: u64) -> Result<User, ApiError> {
        self.client.get(&format!("/users/{user_id}"), None).await
    }

    /// Lists users with pagination and filtering. Admin only.
    pub async fn list(&self, params: &UserQuery) -> Result<PaginatedUsers, ApiError> {
        self.client.get("/users", Some(&params.to_query())).await
    }

    pub async fn update_profile(
        &self,
        user_id: u64,
        data: &UpdateUserRequest,
    ) -> Result<SuccessResponse, ApiError> {
        self.client
            .put(&format!("/users/{user_id}"), Some(data))
            .await
    }

    pub async fn approve(&self, user_id: u64) -> Result<SuccessResponse, ApiError> {
        let req = ApproveUserRequest {
            status: UserStatus::Active,
        };
        self.client
            .put(&format!("/users/{user_id}/approve"), Some(&req))
            .await
    }

    pub async fn reject(&self, user_id: u64, reason: &str) -> Result<SuccessResponse, ApiError> {
        let req = RejectUserRequest {
            reason: reason.to_string(),
        };
        self.client
            .put(&format!("/users/{user_id}/reject"), Some(&req))
            .await
    }

    pub async fn suspend(&self, user_id: u64, reason: &str) -> Result<SuccessResponse, ApiError> {
        let req = SuspendUserRequest {
            reason: reason.to_string(),
        };
        self.client
            .put(&format!("/users/{user_id}/suspend"), Some(&req))
            .await
    }

    pub async fn unsuspend(&self, user_id: u64) -> Result<SuccessResponse, ApiError> {
        self.client
            .put::<SuccessResponse, ()>(&format!("/users/{user_id}/unsuspend"), None)
            .await
    }

    /// Soft delete. Admin only.
    pub async fn delete(&self, user_id: u64) -> Result<SuccessResponse, ApiError> {
        self.client.delete(&format!("/users/{user_id}"), None).await
    }

    pub async fn pending_approvals(&self) -> Result<PaginatedUsers, ApiError> {
        let params = UserQuery {
            status: Some(UserStatus::Pending),
            ..Default::default()
        };
        self.list(&params).await
    }

    /// Searches users by name or email. Admin only.
    pub async fn search(&self, query: &str) -> Result<PaginatedUsers, ApiError> {
        let params = UserQuery {
            search: Some(query.to_string()),
            ..Default::default()
        };
        self.list(&params).await
    }
}
