use std::collections::HashMap;

use crate::db::{DbConnection, DbPool};
use crate::domain::bill::{Bill, BillListQuery, DashboardStats, NewBill, UpdateBill};
use crate::domain::category::{Category, CategoryListQuery, NewCategory, UpdateCategory};
use crate::domain::customer::{Customer, CustomerListQuery, NewCustomer};
use crate::domain::notification::{NewNotification, Notification, NotificationListQuery};
use crate::domain::store::{NewStore, Store, UpdateStoreStatus};
use crate::repository::errors::RepositoryResult;

pub mod errors;

pub mod bill;
pub mod category;
pub mod customer;
pub mod notification;
pub mod settings;
pub mod store;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over store records.
pub trait StoreReader {
    fn get_store_by_id(&self, id: &str) -> RepositoryResult<Option<Store>>;
}

/// Write operations over store records.
pub trait StoreWriter {
    fn create_store(&self, new_store: &NewStore) -> RepositoryResult<Store>;
    fn set_store_status(
        &self,
        store_id: &str,
        update: &UpdateStoreStatus,
    ) -> RepositoryResult<Store>;
}

/// Read-only operations over customer records.
pub trait CustomerReader {
    fn get_customer_by_id(&self, id: &str, store_id: &str) -> RepositoryResult<Option<Customer>>;
    fn get_customer_by_phone(
        &self,
        store_id: &str,
        phone: &str,
    ) -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self, query: CustomerListQuery)
    -> RepositoryResult<(usize, Vec<Customer>)>;
}

/// Write operations over customer records.
pub trait CustomerWriter {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
}

/// Read-only operations over category records.
pub trait CategoryReader {
    /// Lookup by id alone; tenant ownership is checked by the caller so that
    /// cross-store access can be reported distinctly from absence.
    fn get_category_by_id(&self, id: &str) -> RepositoryResult<Option<Category>>;
    fn list_categories(&self, query: CategoryListQuery)
    -> RepositoryResult<(usize, Vec<Category>)>;
}

/// Write operations over category records.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: &str,
        store_id: &str,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    /// Hard delete. Fails with `Conflict` while any bill item references the
    /// category; such categories can only be deactivated.
    fn delete_category(&self, category_id: &str, store_id: &str) -> RepositoryResult<()>;
}

/// Read-only operations over bill aggregates.
pub trait BillReader {
    fn get_bill_by_id(&self, id: &str) -> RepositoryResult<Option<Bill>>;
    fn list_bills(&self, query: BillListQuery) -> RepositoryResult<(usize, Vec<Bill>)>;
    fn dashboard_stats(&self, store_id: Option<&str>) -> RepositoryResult<DashboardStats>;
}

/// Write operations over bill aggregates.
pub trait BillWriter {
    /// Create the bill, its lines and (when unknown) its customer in one
    /// transaction, assigning the next per-store bill number for today.
    fn create_bill(&self, new_bill: &NewBill) -> RepositoryResult<Bill>;
    fn update_bill(&self, bill_id: &str, updates: &UpdateBill) -> RepositoryResult<Bill>;
    fn delete_bill(&self, bill_id: &str) -> RepositoryResult<()>;
}

/// Read-only operations over the notification audit log.
pub trait NotificationReader {
    fn list_notifications(
        &self,
        query: NotificationListQuery,
    ) -> RepositoryResult<(usize, Vec<Notification>)>;
}

/// Append operations over the notification audit log.
pub trait NotificationWriter {
    fn append_notification(
        &self,
        new_notification: &NewNotification,
    ) -> RepositoryResult<Notification>;
}

/// Read-only operations over the per-store settings bag.
pub trait SettingsReader {
    fn get_settings(&self, store_id: &str) -> RepositoryResult<HashMap<String, String>>;
}

/// Write operations over the per-store settings bag.
pub trait SettingsWriter {
    /// Upsert several keys atomically.
    fn upsert_settings(&self, store_id: &str, pairs: &[(String, String)]) -> RepositoryResult<()>;
}
