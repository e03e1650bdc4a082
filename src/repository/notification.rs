use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::notification::{
    NewNotification as DomainNewNotification, Notification as DomainNotification,
    NotificationListQuery,
};
use crate::models::notification::{
    NewNotification as DbNewNotification, Notification as DbNotification,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, NotificationReader, NotificationWriter};

impl NotificationReader for DieselRepository {
    fn list_notifications(
        &self,
        query: NotificationListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainNotification>)> {
        use crate::schema::notifications;

        let mut conn = self.conn()?;

        let mut count_query = notifications::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(ref bill_id) = query.bill_id {
            count_query = count_query.filter(notifications::bill_id.eq(bill_id.as_str()));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = notifications::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(ref bill_id) = query.bill_id {
            items = items.filter(notifications::bill_id.eq(bill_id.as_str()));
        }

        items = items.order(notifications::created_at.desc());

        if let Some(pagination) = query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let rows = items.load::<DbNotification>(&mut conn)?;

        Ok((total, rows.into_iter().map(Into::into).collect()))
    }
}

impl NotificationWriter for DieselRepository {
    fn append_notification(
        &self,
        new_notification: &DomainNewNotification,
    ) -> RepositoryResult<DomainNotification> {
        use crate::schema::notifications;

        let mut conn = self.conn()?;

        let id = Uuid::new_v4().to_string();
        let row = DbNewNotification::from_domain(&id, new_notification);

        let created = diesel::insert_into(notifications::table)
            .values(&row)
            .get_result::<DbNotification>(&mut conn)?;

        Ok(created.into())
    }
}
