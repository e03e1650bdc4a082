use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Delivery channel of an outbound notification.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    Sms,
    Email,
    Whatsapp,
}

impl Channel {
    /// All channels an event fans out over, in dispatch order.
    pub const ALL: [Channel; 3] = [Channel::Sms, Channel::Email, Channel::Whatsapp];
}

impl From<Channel> for &'static str {
    fn from(value: Channel) -> Self {
        match value {
            Channel::Sms => "SMS",
            Channel::Email => "EMAIL",
            Channel::Whatsapp => "WHATSAPP",
        }
    }
}

impl From<&str> for Channel {
    fn from(value: &str) -> Self {
        match value {
            "EMAIL" => Self::Email,
            "WHATSAPP" => Self::Whatsapp,
            _ => Self::Sms,
        }
    }
}

/// Outcome of a dispatch attempt.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationStatus {
    Pending,
    Sent,
    Failed,
}

impl From<NotificationStatus> for &'static str {
    fn from(value: NotificationStatus) -> Self {
        match value {
            NotificationStatus::Pending => "PENDING",
            NotificationStatus::Sent => "SENT",
            NotificationStatus::Failed => "FAILED",
        }
    }
}

impl From<&str> for NotificationStatus {
    fn from(value: &str) -> Self {
        match value {
            "SENT" => Self::Sent,
            "FAILED" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

/// Bill state changes that fan out notifications.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillEvent {
    /// The bill became paid, either at creation or through an update.
    PaymentConfirmation,
    /// The bill became READY or COMPLETED and can be collected.
    CollectionReminder,
}

/// One row of the append-only notification audit log. A row is written per
/// completed dispatch attempt; repeated attempts produce repeated rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    /// Unique identifier of the attempt.
    pub id: String,
    /// Bill the notification belongs to.
    pub bill_id: String,
    pub channel: Channel,
    pub status: NotificationStatus,
    /// Phone number or email address the message went to.
    pub recipient: String,
    /// Full rendered body as handed to the provider.
    pub message: String,
    /// Delivery timestamp, set only on success.
    pub sent_at: Option<NaiveDateTime>,
    /// Generic failure description; provider errors are never stored.
    pub error: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Payload appended after a dispatch attempt completes.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub bill_id: String,
    pub channel: Channel,
    pub status: NotificationStatus,
    pub recipient: String,
    pub message: String,
    pub sent_at: Option<NaiveDateTime>,
    pub error: Option<String>,
}

impl NewNotification {
    /// Record a successful delivery.
    pub fn sent(
        bill_id: impl Into<String>,
        channel: Channel,
        recipient: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            bill_id: bill_id.into(),
            channel,
            status: NotificationStatus::Sent,
            recipient: recipient.into(),
            message: message.into(),
            sent_at: Some(chrono::Local::now().naive_local()),
            error: None,
        }
    }

    /// Record a failed delivery with a generic error string.
    pub fn failed(
        bill_id: impl Into<String>,
        channel: Channel,
        recipient: impl Into<String>,
        message: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            bill_id: bill_id.into(),
            channel,
            status: NotificationStatus::Failed,
            recipient: recipient.into(),
            message: message.into(),
            sent_at: None,
            error: Some(error.into()),
        }
    }
}

/// Query definition used to list the notification audit log.
#[derive(Debug, Clone)]
pub struct NotificationListQuery {
    /// Restrict to one bill; `None` returns the store-wide history.
    pub bill_id: Option<String>,
    pub pagination: Option<Pagination>,
}

impl NotificationListQuery {
    pub fn new() -> Self {
        Self {
            bill_id: None,
            pagination: None,
        }
    }

    pub fn bill_id(mut self, bill_id: impl Into<String>) -> Self {
        self.bill_id = Some(bill_id.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

impl Default for NotificationListQuery {
    fn default() -> Self {
        Self::new()
    }
}
