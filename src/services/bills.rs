use crate::domain::bill::{
    Bill, BillListQuery, BillStatus, DashboardStats, NewBill, NewBillItem, PaymentStatus,
};
use crate::domain::notification::BillEvent;
use crate::forms::bills::{CreateBillForm, UpdateBillForm};
use crate::repository::{BillReader, BillWriter, CategoryReader};
use crate::services::notifications::NotificationTrigger;
use crate::services::{ServiceError, ServiceResult};

/// Creates a bill with priced lines for a store.
///
/// Lines with a non-positive quantity are dropped; the remaining ones are
/// priced from their category at the current rate, which the bill then keeps
/// as a snapshot. Nothing is persisted (not even the customer) unless at
/// least one line survives.
pub fn create_bill<R, T>(
    repo: &R,
    trigger: &T,
    store_id: &str,
    form: CreateBillForm,
) -> ServiceResult<Bill>
where
    R: CategoryReader + BillWriter + ?Sized,
    T: NotificationTrigger + ?Sized,
{
    let request = form
        .into_bill_request()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let mut items = Vec::new();
    for line in request.lines.iter().filter(|line| line.quantity > 0) {
        // Missing or inactive reads as NotFound before the tenant check, so
        // a foreign inactive category stays indistinguishable from a missing
        // one.
        let category = repo
            .get_category_by_id(&line.category_id)?
            .filter(|category| category.is_active)
            .ok_or(ServiceError::NotFound)?;
        if category.store_id != store_id {
            return Err(ServiceError::CrossTenant);
        }

        items.push(NewBillItem::new(
            category.id,
            line.quantity,
            category.price_cents,
        ));
    }

    if items.is_empty() {
        return Err(ServiceError::NoValidItems);
    }

    let mut new_bill = NewBill::new(store_id, request.customer, items)
        .with_status(request.status)
        .with_payment_status(request.payment_status);
    if let Some(method) = request.payment_method {
        new_bill = new_bill.with_payment_method(method);
    }
    if let Some(notes) = request.notes {
        new_bill = new_bill.with_notes(notes);
    }

    let created = repo.create_bill(&new_bill)?;

    if created.payment_status == PaymentStatus::Paid {
        trigger.notify(&created.id, BillEvent::PaymentConfirmation);
    }

    Ok(created)
}

/// Applies a partial update to a bill and fires the notification triggers
/// that the transition warrants. Both triggers compare against the previous
/// value, so re-saving an unchanged state never re-sends.
pub fn modify_bill<R, T>(
    repo: &R,
    trigger: &T,
    store_id: &str,
    bill_id: &str,
    form: UpdateBillForm,
) -> ServiceResult<Bill>
where
    R: BillReader + BillWriter + ?Sized,
    T: NotificationTrigger + ?Sized,
{
    let existing = repo
        .get_bill_by_id(bill_id)?
        .ok_or(ServiceError::NotFound)?;
    if existing.store_id != store_id {
        return Err(ServiceError::CrossTenant);
    }

    let mut update = form
        .into_update_bill()
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    if update.status.is_none()
        && update.payment_status.is_none()
        && update.payment_method.is_none()
        && update.notes.is_none()
    {
        return Err(ServiceError::Form("no bill fields to update".to_string()));
    }

    let becomes_collectable = update.status.is_some_and(|status| {
        status != existing.status && matches!(status, BillStatus::Ready | BillStatus::Completed)
    });
    let becomes_paid = update.payment_status.is_some_and(|payment_status| {
        payment_status == PaymentStatus::Paid && existing.payment_status != PaymentStatus::Paid
    });

    if update.status == Some(BillStatus::Completed) && existing.status != BillStatus::Completed {
        update = update.completed_at(Some(chrono::Local::now().naive_local()));
    }

    let updated = repo.update_bill(bill_id, &update)?;

    if becomes_paid {
        trigger.notify(&updated.id, BillEvent::PaymentConfirmation);
    }
    if becomes_collectable {
        trigger.notify(&updated.id, BillEvent::CollectionReminder);
    }

    Ok(updated)
}

/// Hard-deletes a bill and its lines.
pub fn remove_bill<R>(repo: &R, store_id: &str, bill_id: &str) -> ServiceResult<()>
where
    R: BillReader + BillWriter + ?Sized,
{
    let existing = repo
        .get_bill_by_id(bill_id)?
        .ok_or(ServiceError::NotFound)?;
    if existing.store_id != store_id {
        return Err(ServiceError::CrossTenant);
    }

    repo.delete_bill(bill_id).map_err(ServiceError::from)
}

/// Loads one bill with its customer and lines.
pub fn get_bill<R>(repo: &R, store_id: &str, bill_id: &str) -> ServiceResult<Bill>
where
    R: BillReader + ?Sized,
{
    let bill = repo
        .get_bill_by_id(bill_id)?
        .ok_or(ServiceError::NotFound)?;
    if bill.store_id != store_id {
        return Err(ServiceError::CrossTenant);
    }

    Ok(bill)
}

/// Lists bills matching the query, newest first.
pub fn list_bills<R>(repo: &R, query: BillListQuery) -> ServiceResult<(usize, Vec<Bill>)>
where
    R: BillReader + ?Sized,
{
    repo.list_bills(query).map_err(ServiceError::from)
}

/// Rollups for the dashboard; `None` aggregates across all stores.
pub fn dashboard_overview<R>(repo: &R, store_id: Option<&str>) -> ServiceResult<DashboardStats>
where
    R: BillReader + ?Sized,
{
    repo.dashboard_stats(store_id).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::bill::{BillItem, PaymentMethod, UpdateBill};
    use crate::domain::category::{Category, CategoryListQuery};
    use crate::domain::customer::Customer;
    use crate::forms::bills::{BillCustomerForm, BillLineForm};
    use crate::repository::errors::RepositoryResult;
    use crate::repository::mock::{MockBillReader, MockBillWriter, MockCategoryReader};
    use crate::services::notifications::MockNotificationTrigger;

    struct MockBillRepo {
        categories: MockCategoryReader,
        reader: MockBillReader,
        writer: MockBillWriter,
    }

    impl MockBillRepo {
        fn new() -> Self {
            Self {
                categories: MockCategoryReader::new(),
                reader: MockBillReader::new(),
                writer: MockBillWriter::new(),
            }
        }
    }

    impl CategoryReader for MockBillRepo {
        fn get_category_by_id(&self, id: &str) -> RepositoryResult<Option<Category>> {
            self.categories.get_category_by_id(id)
        }

        fn list_categories(
            &self,
            query: CategoryListQuery,
        ) -> RepositoryResult<(usize, Vec<Category>)> {
            self.categories.list_categories(query)
        }
    }

    impl BillReader for MockBillRepo {
        fn get_bill_by_id(&self, id: &str) -> RepositoryResult<Option<Bill>> {
            self.reader.get_bill_by_id(id)
        }

        fn list_bills(&self, query: BillListQuery) -> RepositoryResult<(usize, Vec<Bill>)> {
            self.reader.list_bills(query)
        }

        fn dashboard_stats(&self, store_id: Option<&str>) -> RepositoryResult<DashboardStats> {
            self.reader.dashboard_stats(store_id)
        }
    }

    impl BillWriter for MockBillRepo {
        fn create_bill(&self, new_bill: &NewBill) -> RepositoryResult<Bill> {
            self.writer.create_bill(new_bill)
        }

        fn update_bill(&self, bill_id: &str, updates: &UpdateBill) -> RepositoryResult<Bill> {
            self.writer.update_bill(bill_id, updates)
        }

        fn delete_bill(&self, bill_id: &str) -> RepositoryResult<()> {
            self.writer.delete_bill(bill_id)
        }
    }

    fn fixed_datetime() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 30)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn shirt_category(store_id: &str) -> Category {
        Category {
            id: "cat-1".to_string(),
            store_id: store_id.to_string(),
            name: "Shirt".to_string(),
            price_cents: 1500,
            icon: None,
            is_active: true,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn form_with_lines(lines: Vec<BillLineForm>) -> CreateBillForm {
        CreateBillForm {
            customer: BillCustomerForm {
                name: "Asha".to_string(),
                phone: "9876543210".to_string(),
                email: None,
                address: None,
            },
            items: lines,
            status: None,
            payment_status: None,
            payment_method: None,
            notes: None,
        }
    }

    fn stored_bill(status: BillStatus, payment_status: PaymentStatus) -> Bill {
        Bill {
            id: "bill-1".to_string(),
            store_id: "store-1".to_string(),
            bill_number: "BILL-20260830-001".to_string(),
            customer: Customer {
                id: "cust-1".to_string(),
                store_id: "store-1".to_string(),
                name: "Asha".to_string(),
                phone: "9876543210".to_string(),
                email: None,
                address: None,
                created_at: fixed_datetime(),
                updated_at: fixed_datetime(),
            },
            status,
            payment_status,
            payment_method: Some(PaymentMethod::Cash),
            notes: None,
            total_cents: 3000,
            completed_at: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
            items: vec![BillItem {
                id: "item-1".to_string(),
                category_id: "cat-1".to_string(),
                category_name: "Shirt".to_string(),
                quantity: 2,
                price_cents: 1500,
                subtotal_cents: 3000,
            }],
        }
    }

    #[test]
    fn create_bill_rejects_cross_tenant_categories() {
        let mut repo = MockBillRepo::new();
        repo.categories
            .expect_get_category_by_id()
            .returning(|_| Ok(Some(shirt_category("other-store"))));
        let trigger = MockNotificationTrigger::new();

        let result = create_bill(
            &repo,
            &trigger,
            "store-1",
            form_with_lines(vec![BillLineForm {
                category_id: "cat-1".to_string(),
                quantity: 2,
            }]),
        );

        assert!(matches!(result, Err(ServiceError::CrossTenant)));
    }

    #[test]
    fn create_bill_rejects_inactive_categories() {
        let mut repo = MockBillRepo::new();
        repo.categories.expect_get_category_by_id().returning(|_| {
            let mut category = shirt_category("store-1");
            category.is_active = false;
            Ok(Some(category))
        });
        let trigger = MockNotificationTrigger::new();

        let result = create_bill(
            &repo,
            &trigger,
            "store-1",
            form_with_lines(vec![BillLineForm {
                category_id: "cat-1".to_string(),
                quantity: 2,
            }]),
        );

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn inactive_foreign_categories_read_as_missing() {
        let mut repo = MockBillRepo::new();
        repo.categories.expect_get_category_by_id().returning(|_| {
            let mut category = shirt_category("other-store");
            category.is_active = false;
            Ok(Some(category))
        });
        let trigger = MockNotificationTrigger::new();

        let result = create_bill(
            &repo,
            &trigger,
            "store-1",
            form_with_lines(vec![BillLineForm {
                category_id: "cat-1".to_string(),
                quantity: 2,
            }]),
        );

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn create_bill_skips_non_positive_quantities() {
        let mut repo = MockBillRepo::new();
        repo.categories
            .expect_get_category_by_id()
            .times(1)
            .returning(|_| Ok(Some(shirt_category("store-1"))));
        repo.writer
            .expect_create_bill()
            .withf(|new_bill| {
                new_bill.items.len() == 1
                    && new_bill.items[0].quantity == 2
                    && new_bill.total_cents == 3000
            })
            .returning(|_| Ok(stored_bill(BillStatus::Pending, PaymentStatus::Pending)));
        let trigger = MockNotificationTrigger::new();

        let created = create_bill(
            &repo,
            &trigger,
            "store-1",
            form_with_lines(vec![
                BillLineForm {
                    category_id: "cat-1".to_string(),
                    quantity: 2,
                },
                BillLineForm {
                    category_id: "cat-1".to_string(),
                    quantity: 0,
                },
            ]),
        )
        .expect("bill is created from the surviving line");

        assert_eq!(created.total_cents, 3000);
    }

    #[test]
    fn create_bill_with_no_surviving_lines_is_rejected() {
        let repo = MockBillRepo::new();
        let trigger = MockNotificationTrigger::new();

        let result = create_bill(
            &repo,
            &trigger,
            "store-1",
            form_with_lines(vec![BillLineForm {
                category_id: "cat-1".to_string(),
                quantity: -1,
            }]),
        );

        assert!(matches!(result, Err(ServiceError::NoValidItems)));
    }

    #[test]
    fn paid_on_create_triggers_a_payment_confirmation() {
        let mut repo = MockBillRepo::new();
        repo.categories
            .expect_get_category_by_id()
            .returning(|_| Ok(Some(shirt_category("store-1"))));
        repo.writer
            .expect_create_bill()
            .returning(|_| Ok(stored_bill(BillStatus::Pending, PaymentStatus::Paid)));

        let mut trigger = MockNotificationTrigger::new();
        trigger
            .expect_notify()
            .withf(|bill_id, event| bill_id == "bill-1" && *event == BillEvent::PaymentConfirmation)
            .times(1)
            .return_const(());

        let mut form = form_with_lines(vec![BillLineForm {
            category_id: "cat-1".to_string(),
            quantity: 2,
        }]);
        form.payment_status = Some(PaymentStatus::Paid);

        create_bill(&repo, &trigger, "store-1", form).expect("bill is created");
    }

    #[test]
    fn marking_paid_triggers_once_but_resaving_paid_does_not() {
        let mut repo = MockBillRepo::new();
        repo.reader
            .expect_get_bill_by_id()
            .returning(|_| Ok(Some(stored_bill(BillStatus::Pending, PaymentStatus::Pending))));
        repo.writer
            .expect_update_bill()
            .returning(|_, _| Ok(stored_bill(BillStatus::Pending, PaymentStatus::Paid)));

        let mut trigger = MockNotificationTrigger::new();
        trigger
            .expect_notify()
            .withf(|_, event| *event == BillEvent::PaymentConfirmation)
            .times(1)
            .return_const(());

        let form = UpdateBillForm {
            status: None,
            payment_status: Some(PaymentStatus::Paid),
            payment_method: None,
            notes: None,
        };
        modify_bill(&repo, &trigger, "store-1", "bill-1", form).expect("update succeeds");

        // Re-saving an already paid bill fires nothing.
        let mut repo = MockBillRepo::new();
        repo.reader
            .expect_get_bill_by_id()
            .returning(|_| Ok(Some(stored_bill(BillStatus::Pending, PaymentStatus::Paid))));
        repo.writer
            .expect_update_bill()
            .returning(|_, _| Ok(stored_bill(BillStatus::Pending, PaymentStatus::Paid)));
        let trigger = MockNotificationTrigger::new();

        let form = UpdateBillForm {
            status: None,
            payment_status: Some(PaymentStatus::Paid),
            payment_method: None,
            notes: None,
        };
        modify_bill(&repo, &trigger, "store-1", "bill-1", form).expect("update succeeds");
    }

    #[test]
    fn completing_sets_completed_at_and_sends_a_reminder() {
        let mut repo = MockBillRepo::new();
        repo.reader
            .expect_get_bill_by_id()
            .returning(|_| Ok(Some(stored_bill(BillStatus::Ready, PaymentStatus::Paid))));
        repo.writer
            .expect_update_bill()
            .withf(|_, update| matches!(update.completed_at, Some(Some(_))))
            .returning(|_, _| Ok(stored_bill(BillStatus::Completed, PaymentStatus::Paid)));

        let mut trigger = MockNotificationTrigger::new();
        trigger
            .expect_notify()
            .withf(|_, event| *event == BillEvent::CollectionReminder)
            .times(1)
            .return_const(());

        let form = UpdateBillForm {
            status: Some(BillStatus::Completed),
            payment_status: None,
            payment_method: None,
            notes: None,
        };
        modify_bill(&repo, &trigger, "store-1", "bill-1", form).expect("update succeeds");
    }

    #[test]
    fn modify_bill_rejects_an_empty_patch() {
        let mut repo = MockBillRepo::new();
        repo.reader
            .expect_get_bill_by_id()
            .returning(|_| Ok(Some(stored_bill(BillStatus::Pending, PaymentStatus::Pending))));
        let trigger = MockNotificationTrigger::new();

        let form = UpdateBillForm {
            status: None,
            payment_status: None,
            payment_method: None,
            notes: None,
        };
        let result = modify_bill(&repo, &trigger, "store-1", "bill-1", form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn bills_of_other_stores_are_invisible() {
        let mut repo = MockBillRepo::new();
        repo.reader
            .expect_get_bill_by_id()
            .returning(|_| Ok(Some(stored_bill(BillStatus::Pending, PaymentStatus::Pending))));

        let result = get_bill(&repo, "another-store", "bill-1");

        assert!(matches!(result, Err(ServiceError::CrossTenant)));
    }
}
