use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a tenant: an isolated laundry shop account.
/// Every other entity is partitioned by the store id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Store {
    /// Unique identifier of the store.
    pub id: String,
    /// Display name of the shop.
    pub name: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Deactivated stores keep their data but stop operating.
    pub is_active: bool,
    /// Operator-supplied reason recorded on deactivation.
    pub deactivation_reason: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to register a new store.
#[derive(Debug, Clone)]
pub struct NewStore {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl NewStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: None,
            address: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// Patch data toggling a store's active flag.
#[derive(Debug, Clone)]
pub struct UpdateStoreStatus {
    pub is_active: bool,
    /// Required when deactivating, cleared on reactivation.
    pub deactivation_reason: Option<String>,
}
