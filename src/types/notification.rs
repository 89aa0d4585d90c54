use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::query::Query;
use crate::display::TerminalDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    AccountApproved,
    LoanApproved,
    LoanRejected,
    PaymentReceived,
    Custom,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::AccountApproved => "ACCOUNT_APPROVED",
            NotificationType::LoanApproved => "LOAN_APPROVED",
            NotificationType::LoanRejected => "LOAN_REJECTED",
            NotificationType::PaymentReceived => "PAYMENT_RECEIVED",
            NotificationType::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationStatus {
    Unread,
    Read,
    Archived,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Unread => "UNREAD",
            NotificationStatus::Read => "READ",
            NotificationStatus::Archived => "ARCHIVED",
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub notification_id: u64,
    pub user_id: u64,

    #[serde(rename = "type")]
    pub kind: NotificationType,

    pub message: String,
    pub sent_at: String,
    pub status: NotificationStatus,
    pub related_id: Option<u64>,
}

impl TerminalDisplay for Notification {
    fn table_titles() -> Vec<&'static str> {
        vec!["ID", "Type", "Status", "Sent", "Message"]
    }

    fn table_row(self) -> Vec<String> {
        vec![
            self.notification_id.to_string(),
            self.kind.to_string(),
            self.status.to_string(),
            self.sent_at,
            self.message,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    pub user_id: u64,

    #[serde(rename = "type")]
    pub kind: NotificationType,

    pub message: String,
    pub related_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotificationRequest {
    pub status: NotificationStatus,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationQuery {
    pub status: Option<NotificationStatus>,
    pub kind: Option<NotificationType>,
}

impl NotificationQuery {
    pub fn to_query(&self) -> Query {
        Query::new()
            .maybe_text("status", self.status)
            .maybe_text("type", self.kind)
    }
}
