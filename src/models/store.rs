use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::store::{NewStore as DomainNewStore, Store as DomainStore};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::stores)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub deactivation_reason: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::stores)]
pub struct NewStore<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
}

impl From<Store> for DomainStore {
    fn from(value: Store) -> Self {
        Self {
            id: value.id,
            name: value.name,
            phone: value.phone,
            address: value.address,
            is_active: value.is_active,
            deactivation_reason: value.deactivation_reason,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> NewStore<'a> {
    pub fn from_domain(id: &'a str, value: &'a DomainNewStore) -> Self {
        Self {
            id,
            name: value.name.as_str(),
            phone: value.phone.as_deref(),
            address: value.address.as_deref(),
        }
    }
}
