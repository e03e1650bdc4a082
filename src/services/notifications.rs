use std::sync::Arc;
use std::thread;

use crate::domain::notification::{
    BillEvent, Channel, NewNotification, Notification, NotificationListQuery,
};
use crate::domain::settings::StoreSettings;
use crate::repository::{BillReader, NotificationReader, NotificationWriter, SettingsReader, StoreReader};
use crate::senders::{MessageSender, OutboundMessage};
use crate::services::{ServiceError, ServiceResult, render};

/// Number of rows returned by the history view.
const HISTORY_PAGE_SIZE: usize = 50;

/// Generic failure string stored in the audit log. Provider error details are
/// logged but never persisted.
const SEND_FAILURE: &str = "failed to send notification";

/// Fire-and-forget seam between bill mutations and the dispatcher. Bill
/// creation and updates must never wait on, or fail because of, messaging.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationTrigger: Send + Sync {
    fn notify(&self, bill_id: &str, event: BillEvent);
}

/// Production trigger: runs the dispatch fan-out on a spawned thread with a
/// supervised error boundary. Errors are logged and go no further.
pub struct SpawnedNotifier<R, S> {
    repo: Arc<R>,
    sender: Arc<S>,
}

impl<R, S> SpawnedNotifier<R, S> {
    pub fn new(repo: Arc<R>, sender: Arc<S>) -> Self {
        Self { repo, sender }
    }
}

impl<R, S> NotificationTrigger for SpawnedNotifier<R, S>
where
    R: BillReader + StoreReader + SettingsReader + NotificationWriter + Send + Sync + 'static,
    S: MessageSender + 'static,
{
    fn notify(&self, bill_id: &str, event: BillEvent) {
        let repo = Arc::clone(&self.repo);
        let sender = Arc::clone(&self.sender);
        let bill_id = bill_id.to_string();

        thread::spawn(move || {
            if let Err(err) = dispatch_bill_event(repo.as_ref(), sender.as_ref(), &bill_id, event) {
                log::error!("notification dispatch for bill {bill_id} failed: {err}");
            }
        });
    }
}

/// Renders and delivers one message for one channel, then appends the audit
/// row. Returns `None` when the channel is disabled for the store or the
/// customer has no address for it; nothing is recorded in that case. Calling
/// twice delivers twice and records two rows.
pub fn send_bill_notification<R, S>(
    repo: &R,
    sender: &S,
    bill_id: &str,
    channel: Channel,
    event: BillEvent,
) -> ServiceResult<Option<Notification>>
where
    R: BillReader + StoreReader + SettingsReader + NotificationWriter + ?Sized,
    S: MessageSender + ?Sized,
{
    let bill = repo
        .get_bill_by_id(bill_id)?
        .ok_or(ServiceError::NotFound)?;
    let store = repo
        .get_store_by_id(&bill.store_id)?
        .ok_or(ServiceError::NotFound)?;
    let settings = StoreSettings::from_map(&repo.get_settings(&bill.store_id)?);

    if !settings.channel_enabled(channel) {
        log::debug!(
            "{} disabled for store {}, skipping bill {}",
            <&str>::from(channel),
            bill.store_id,
            bill.id
        );
        return Ok(None);
    }

    let recipient = match channel {
        Channel::Email => match bill.customer.email.clone() {
            Some(email) => email,
            None => {
                log::debug!("customer {} has no email, skipping bill {}", bill.customer.id, bill.id);
                return Ok(None);
            }
        },
        Channel::Sms | Channel::Whatsapp => bill.customer.phone.clone(),
    };

    let message = OutboundMessage {
        channel,
        recipient: recipient.clone(),
        subject: render::subject(event, &bill),
        body: render::body(&bill, &store, &settings, event, channel),
    };

    let outcome = match sender.send(&settings, &message) {
        Ok(true) => NewNotification::sent(&bill.id, channel, &recipient, message.body),
        Ok(false) => {
            log::warn!(
                "{} provider not configured, recording failure for bill {}",
                <&str>::from(channel),
                bill.id
            );
            NewNotification::failed(&bill.id, channel, &recipient, message.body, SEND_FAILURE)
        }
        Err(err) => {
            log::error!(
                "{} delivery for bill {} failed: {err}",
                <&str>::from(channel),
                bill.id
            );
            NewNotification::failed(&bill.id, channel, &recipient, message.body, SEND_FAILURE)
        }
    };

    Ok(Some(repo.append_notification(&outcome)?))
}

/// Fans one bill event out over every channel. Channels are independent: a
/// failure on one is logged and the rest still run.
pub fn dispatch_bill_event<R, S>(
    repo: &R,
    sender: &S,
    bill_id: &str,
    event: BillEvent,
) -> ServiceResult<()>
where
    R: BillReader + StoreReader + SettingsReader + NotificationWriter + ?Sized,
    S: MessageSender + ?Sized,
{
    for channel in Channel::ALL {
        if let Err(err) = send_bill_notification(repo, sender, bill_id, channel, event) {
            log::error!(
                "{} dispatch for bill {bill_id} failed: {err}",
                <&str>::from(channel)
            );
        }
    }

    Ok(())
}

/// Latest dispatch attempts, newest first, optionally narrowed to one bill.
pub fn notification_history<R>(
    repo: &R,
    bill_id: Option<&str>,
) -> ServiceResult<Vec<Notification>>
where
    R: NotificationReader + ?Sized,
{
    let mut query = NotificationListQuery::new().paginate(1, HISTORY_PAGE_SIZE);
    if let Some(bill_id) = bill_id {
        query = query.bill_id(bill_id);
    }

    let (_, notifications) = repo.list_notifications(query)?;
    Ok(notifications)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;

    use super::*;
    use crate::domain::bill::{
        Bill, BillItem, BillListQuery, BillStatus, DashboardStats, PaymentMethod, PaymentStatus,
    };
    use crate::domain::customer::Customer;
    use crate::domain::store::Store;
    use crate::repository::errors::RepositoryResult;
    use crate::repository::mock::{
        MockBillReader, MockNotificationWriter, MockSettingsReader, MockStoreReader,
    };
    use crate::senders::MockMessageSender;
    use crate::senders::SendError;

    struct MockDispatchRepo {
        bills: MockBillReader,
        stores: MockStoreReader,
        settings: MockSettingsReader,
        notifications: MockNotificationWriter,
    }

    impl MockDispatchRepo {
        fn new() -> Self {
            Self {
                bills: MockBillReader::new(),
                stores: MockStoreReader::new(),
                settings: MockSettingsReader::new(),
                notifications: MockNotificationWriter::new(),
            }
        }
    }

    impl BillReader for MockDispatchRepo {
        fn get_bill_by_id(&self, id: &str) -> RepositoryResult<Option<Bill>> {
            self.bills.get_bill_by_id(id)
        }

        fn list_bills(&self, query: BillListQuery) -> RepositoryResult<(usize, Vec<Bill>)> {
            self.bills.list_bills(query)
        }

        fn dashboard_stats(&self, store_id: Option<&str>) -> RepositoryResult<DashboardStats> {
            self.bills.dashboard_stats(store_id)
        }
    }

    impl StoreReader for MockDispatchRepo {
        fn get_store_by_id(&self, id: &str) -> RepositoryResult<Option<Store>> {
            self.stores.get_store_by_id(id)
        }
    }

    impl SettingsReader for MockDispatchRepo {
        fn get_settings(&self, store_id: &str) -> RepositoryResult<HashMap<String, String>> {
            self.settings.get_settings(store_id)
        }
    }

    impl NotificationWriter for MockDispatchRepo {
        fn append_notification(
            &self,
            new_notification: &NewNotification,
        ) -> RepositoryResult<Notification> {
            self.notifications.append_notification(new_notification)
        }
    }

    fn fixed_datetime() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 30)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn sample_bill(email: Option<&str>) -> Bill {
        Bill {
            id: "bill-1".to_string(),
            store_id: "store-1".to_string(),
            bill_number: "BILL-20260830-001".to_string(),
            customer: Customer {
                id: "cust-1".to_string(),
                store_id: "store-1".to_string(),
                name: "Asha".to_string(),
                phone: "9876543210".to_string(),
                email: email.map(str::to_string),
                address: None,
                created_at: fixed_datetime(),
                updated_at: fixed_datetime(),
            },
            status: BillStatus::Ready,
            payment_status: PaymentStatus::Pending,
            payment_method: Some(PaymentMethod::Cash),
            notes: None,
            total_cents: 4500,
            completed_at: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
            items: vec![BillItem {
                id: "item-1".to_string(),
                category_id: "cat-1".to_string(),
                category_name: "Shirt".to_string(),
                quantity: 3,
                price_cents: 1500,
                subtotal_cents: 4500,
            }],
        }
    }

    fn sample_store() -> Store {
        Store {
            id: "store-1".to_string(),
            name: "Iron Press".to_string(),
            phone: None,
            address: None,
            is_active: true,
            deactivation_reason: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn echo_notification(value: &NewNotification) -> Notification {
        Notification {
            id: "note-1".to_string(),
            bill_id: value.bill_id.clone(),
            channel: value.channel,
            status: value.status,
            recipient: value.recipient.clone(),
            message: value.message.clone(),
            sent_at: value.sent_at,
            error: value.error.clone(),
            created_at: fixed_datetime(),
        }
    }

    fn repo_returning(bill: Bill, settings: Vec<(&str, &str)>) -> MockDispatchRepo {
        let mut repo = MockDispatchRepo::new();
        repo.bills
            .expect_get_bill_by_id()
            .returning(move |_| Ok(Some(bill.clone())));
        repo.stores
            .expect_get_store_by_id()
            .returning(|_| Ok(Some(sample_store())));
        let map: HashMap<String, String> = settings
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        repo.settings
            .expect_get_settings()
            .returning(move |_| Ok(map.clone()));
        repo
    }

    #[test]
    fn disabled_channel_skips_without_a_row() {
        let repo = repo_returning(
            sample_bill(None),
            vec![("notifications_sms_enabled", "false")],
        );
        let sender = MockMessageSender::new();

        let result = send_bill_notification(
            &repo,
            &sender,
            "bill-1",
            Channel::Sms,
            BillEvent::CollectionReminder,
        )
        .expect("service call succeeds");

        assert!(result.is_none());
    }

    #[test]
    fn missing_email_skips_without_a_row() {
        let repo = repo_returning(sample_bill(None), vec![]);
        let sender = MockMessageSender::new();

        let result = send_bill_notification(
            &repo,
            &sender,
            "bill-1",
            Channel::Email,
            BillEvent::CollectionReminder,
        )
        .expect("service call succeeds");

        assert!(result.is_none());
    }

    #[test]
    fn successful_send_records_a_sent_row() {
        let mut repo = repo_returning(sample_bill(Some("asha@example.com")), vec![]);
        repo.notifications
            .expect_append_notification()
            .withf(|new| {
                new.status == crate::domain::notification::NotificationStatus::Sent
                    && new.recipient == "asha@example.com"
                    && new.sent_at.is_some()
                    && new.error.is_none()
            })
            .returning(|new| Ok(echo_notification(new)));

        let mut sender = MockMessageSender::new();
        sender.expect_send().returning(|_, _| Ok(true));

        let result = send_bill_notification(
            &repo,
            &sender,
            "bill-1",
            Channel::Email,
            BillEvent::CollectionReminder,
        )
        .expect("service call succeeds")
        .expect("a row is recorded");

        assert_eq!(result.recipient, "asha@example.com");
    }

    #[test]
    fn provider_failure_records_a_failed_row_with_generic_error() {
        let mut repo = repo_returning(sample_bill(None), vec![]);
        repo.notifications
            .expect_append_notification()
            .withf(|new| {
                new.status == crate::domain::notification::NotificationStatus::Failed
                    && new.error.as_deref() == Some("failed to send notification")
                    && new.sent_at.is_none()
            })
            .returning(|new| Ok(echo_notification(new)));

        let mut sender = MockMessageSender::new();
        sender
            .expect_send()
            .returning(|_, _| Err(SendError::GatewayStatus(502)));

        let result = send_bill_notification(
            &repo,
            &sender,
            "bill-1",
            Channel::Sms,
            BillEvent::PaymentConfirmation,
        )
        .expect("provider failures never propagate")
        .expect("a failed row is recorded");

        assert_eq!(result.recipient, "9876543210");
    }

    #[test]
    fn unknown_bill_is_not_found() {
        let mut repo = MockDispatchRepo::new();
        repo.bills.expect_get_bill_by_id().returning(|_| Ok(None));
        let sender = MockMessageSender::new();

        let result = send_bill_notification(
            &repo,
            &sender,
            "nope",
            Channel::Sms,
            BillEvent::CollectionReminder,
        );

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
