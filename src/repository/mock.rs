use std::collections::HashMap;

use mockall::mock;

use super::{
    BillReader, BillWriter, CategoryReader, CategoryWriter, CustomerReader, CustomerWriter,
    NotificationReader, NotificationWriter, SettingsReader, SettingsWriter, StoreReader,
    StoreWriter,
};
use crate::domain::{
    bill::{Bill, BillListQuery, DashboardStats, NewBill, UpdateBill},
    category::{Category, CategoryListQuery, NewCategory, UpdateCategory},
    customer::{Customer, CustomerListQuery, NewCustomer},
    notification::{NewNotification, Notification, NotificationListQuery},
    store::{NewStore, Store, UpdateStoreStatus},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub StoreReader {}

    impl StoreReader for StoreReader {
        fn get_store_by_id(&self, id: &str) -> RepositoryResult<Option<Store>>;
    }
}

mock! {
    pub StoreWriter {}

    impl StoreWriter for StoreWriter {
        fn create_store(&self, new_store: &NewStore) -> RepositoryResult<Store>;
        fn set_store_status(&self, store_id: &str, update: &UpdateStoreStatus) -> RepositoryResult<Store>;
    }
}

mock! {
    pub CustomerReader {}

    impl CustomerReader for CustomerReader {
        fn get_customer_by_id(&self, id: &str, store_id: &str) -> RepositoryResult<Option<Customer>>;
        fn get_customer_by_phone(&self, store_id: &str, phone: &str) -> RepositoryResult<Option<Customer>>;
        fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
    }
}

mock! {
    pub CustomerWriter {}

    impl CustomerWriter for CustomerWriter {
        fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    }
}

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn get_category_by_id(&self, id: &str) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<(usize, Vec<Category>)>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: &str, store_id: &str, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: &str, store_id: &str) -> RepositoryResult<()>;
    }
}

mock! {
    pub BillReader {}

    impl BillReader for BillReader {
        fn get_bill_by_id(&self, id: &str) -> RepositoryResult<Option<Bill>>;
        fn list_bills(&self, query: BillListQuery) -> RepositoryResult<(usize, Vec<Bill>)>;
        fn dashboard_stats<'a>(&self, store_id: Option<&'a str>) -> RepositoryResult<DashboardStats>;
    }
}

mock! {
    pub BillWriter {}

    impl BillWriter for BillWriter {
        fn create_bill(&self, new_bill: &NewBill) -> RepositoryResult<Bill>;
        fn update_bill(&self, bill_id: &str, updates: &UpdateBill) -> RepositoryResult<Bill>;
        fn delete_bill(&self, bill_id: &str) -> RepositoryResult<()>;
    }
}

mock! {
    pub NotificationReader {}

    impl NotificationReader for NotificationReader {
        fn list_notifications(&self, query: NotificationListQuery) -> RepositoryResult<(usize, Vec<Notification>)>;
    }
}

mock! {
    pub NotificationWriter {}

    impl NotificationWriter for NotificationWriter {
        fn append_notification(&self, new_notification: &NewNotification) -> RepositoryResult<Notification>;
    }
}

mock! {
    pub SettingsReader {}

    impl SettingsReader for SettingsReader {
        fn get_settings(&self, store_id: &str) -> RepositoryResult<HashMap<String, String>>;
    }
}

mock! {
    pub SettingsWriter {}

    impl SettingsWriter for SettingsWriter {
        fn upsert_settings(&self, store_id: &str, pairs: &[(String, String)]) -> RepositoryResult<()>;
    }
}
