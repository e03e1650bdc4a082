use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::{Customer as DomainCustomer, NewCustomer as DomainNewCustomer};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customers)]
pub struct Customer {
    pub id: String,
    pub store_id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
pub struct NewCustomer<'a> {
    pub id: &'a str,
    pub store_id: &'a str,
    pub name: &'a str,
    pub phone: &'a str,
    pub email: Option<&'a str>,
    pub address: Option<&'a str>,
}

impl From<Customer> for DomainCustomer {
    fn from(value: Customer) -> Self {
        Self {
            id: value.id,
            store_id: value.store_id,
            name: value.name,
            phone: value.phone,
            email: value.email,
            address: value.address,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> NewCustomer<'a> {
    pub fn from_domain(id: &'a str, value: &'a DomainNewCustomer) -> Self {
        Self {
            id,
            store_id: value.store_id.as_str(),
            name: value.name.as_str(),
            phone: value.phone.as_str(),
            email: value.email.as_deref(),
            address: value.address.as_deref(),
        }
    }
}
