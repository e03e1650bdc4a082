use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Domain representation of a customer that belongs to a store.
///
/// Customers are created lazily the first time a bill is issued for an
/// unknown `(store_id, phone)` pair and are never deleted automatically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    /// Unique identifier of the customer.
    pub id: String,
    /// Store identifier that owns the customer.
    pub store_id: String,
    /// Human-friendly display name.
    pub name: String,
    /// Primary phone number, unique within the store.
    pub phone: String,
    /// Optional email address used for email notifications.
    pub email: Option<String>,
    /// Optional postal address.
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new customer for a store.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub store_id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl NewCustomer {
    pub fn new(
        store_id: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            store_id: store_id.into(),
            name: name.into(),
            phone: phone.into(),
            email: None,
            address: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into().to_lowercase());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// Query definition used to list customers for a store.
#[derive(Debug, Clone)]
pub struct CustomerListQuery {
    pub store_id: String,
    /// Matches the customer name or phone.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl CustomerListQuery {
    pub fn new(store_id: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            search: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
