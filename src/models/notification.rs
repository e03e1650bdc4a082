use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::notification::{
    NewNotification as DomainNewNotification, Notification as DomainNotification,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::notifications)]
pub struct Notification {
    pub id: String,
    pub bill_id: String,
    pub channel: String,
    pub status: String,
    pub recipient: String,
    pub message: String,
    pub sent_at: Option<NaiveDateTime>,
    pub error: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::notifications)]
pub struct NewNotification<'a> {
    pub id: &'a str,
    pub bill_id: &'a str,
    pub channel: &'a str,
    pub status: &'a str,
    pub recipient: &'a str,
    pub message: &'a str,
    pub sent_at: Option<NaiveDateTime>,
    pub error: Option<&'a str>,
}

impl From<Notification> for DomainNotification {
    fn from(value: Notification) -> Self {
        Self {
            id: value.id,
            bill_id: value.bill_id,
            channel: value.channel.as_str().into(),
            status: value.status.as_str().into(),
            recipient: value.recipient,
            message: value.message,
            sent_at: value.sent_at,
            error: value.error,
            created_at: value.created_at,
        }
    }
}

impl<'a> NewNotification<'a> {
    pub fn from_domain(id: &'a str, value: &'a DomainNewNotification) -> Self {
        Self {
            id,
            bill_id: value.bill_id.as_str(),
            channel: value.channel.into(),
            status: value.status.into(),
            recipient: value.recipient.as_str(),
            message: value.message.as_str(),
            sent_at: value.sent_at,
            error: value.error.as_deref(),
        }
    }
}
