use futures_util::future::try_join_all;

use crate::client::{ApiError, Client};
use crate::types::notification::{
    CreateNotificationRequest, Notification, NotificationQuery, NotificationStatus,
    NotificationType, UpdateNotificationRequest,
};
use crate::types::response::SuccessResponse;

#[derive(Clone)]
pub struct NotificationApi {
    client: Client,
}

impl NotificationApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn user_notifications(
        &self,
        user_id: u64,
        params: Option<&NotificationQuery>,
    ) -> Result<Vec<Notification>, ApiError> {
        let query = params.map(NotificationQuery::to_query);
        self.client
            .get(&format!("/notifications/user/{user_id}"), query.as_ref())
            .await
    }

    pub async fn get(&self, notification_id: u64) -> Result<Notification, ApiError> {
        self.client
            .get(&format!("/notifications/{notification_id}"), None)
            .await
    }

    /// Sends a notification. Admin only.
    pub async fn create(&self, data: &CreateNotificationRequest) -> Result<Notification, ApiError> {
        self.client.post("/notifications", Some(data)).await
    }

    pub async fn mark_read(&self, notification_id: u64) -> Result<SuccessResponse, ApiError> {
        self.set_status(notification_id, NotificationStatus::Read)
            .await
    }

    pub async fn mark_unread(&self, notification_id: u64) -> Result<SuccessResponse, ApiError> {
        self.set_status(notification_id, NotificationStatus::Unread)
            .await
    }

    pub async fn archive(&self, notification_id: u64) -> Result<SuccessResponse, ApiError> {
        self.set_status(notification_id, NotificationStatus::Archived)
            .await
    }

    async fn set_status(
        &self,
        notification_id: u64,
        status: NotificationStatus,
    ) -> Result<SuccessResponse, ApiError> {
        let req = UpdateNotificationRequest { status };
        self.client
            .put(&format!("/notifications/{notification_id}"), Some(&req))
            .await
    }

    pub async fn delete(&self, notification_id: u64) -> Result<SuccessResponse, ApiError> {
        self.client
            .delete(&format!("/notifications/{notification_id}"), None)
            .await
    }

    pub async fn unread(&self, user_id: u64) -> Result<Vec<Notification>, ApiError> {
        self.by_status(user_id, NotificationStatus::Unread).await
    }

    pub async fn read(&self, user_id: u64) -> Result<Vec<Notification>, ApiError> {
        self.by_status(user_id, NotificationStatus::Read).await
    }

    async fn by_status(
        &self,
        user_id: u64,
        status: NotificationStatus,
    ) -> Result<Vec<Notification>, ApiError> {
        let params = NotificationQuery {
            status: Some(status),
            ..Default::default()
        };
        self.user_notifications(user_id, Some(&params)).await
    }

    pub async fn by_type(
        &self,
        user_id: u64,
        kind: NotificationType,
    ) -> Result<Vec<Notification>, ApiError> {
        let params = NotificationQuery {
            kind: Some(kind),
            ..Default::default()
        };
        self.user_notifications(user_id, Some(&params)).await
    }

    /// Marks every unread notification read, one update call per item, all
    /// started concurrently. There is no transactional guarantee across the
    /// fan-out: if one update fails the whole call fails, but updates that
    /// already landed stay applied. Retrying is safe, read items stay read.
    pub async fn mark_all_read(&self, user_id: u64) -> Result<(), ApiError> {
        let unread = self.unread(user_id).await?;
        let updates = unread.iter().map(|n| self.mark_read(n.notification_id));
        try_join_all(updates).await?;
        Ok(())
    }

    /// Length of the unread list; the backend has no count endpoint.
    pub async fn unread_count(&self, user_id: u64) -> Result<usize, ApiError> {
        let unread = self.unread(user_id).await?;
        Ok(unread.len())
    }

    /// Deletes every read notification. Same fan-out contract as
    /// [`mark_all_read`](Self::mark_all_read).
    pub async fn delete_all_read(&self, user_id: u64) -> Result<(), ApiError> {
        let read = self.read(user_id).await?;
        let deletes = read.iter().map(|n| self.delete(n.notification_id));
        try_join_all(deletes).await?;
        Ok(())
    }

    /// Sends a free-form notification to a user. Admin only.
    pub async fn send_custom(&self, user_id: u64, message: &str) -> Result<Notification, ApiError> {
        let req = CreateNotificationRequest {
            user_id,
            kind: NotificationType::Custom,
            message: message.to_string(),
            related_id: None,
        };
        self.create(&req).await
    }
}
