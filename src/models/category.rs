use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{
    Category as DomainCategory, NewCategory as DomainNewCategory,
    UpdateCategory as DomainUpdateCategory,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: String,
    pub store_id: String,
    pub name: String,
    pub price_cents: i64,
    pub icon: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory<'a> {
    pub id: &'a str,
    pub store_id: &'a str,
    pub name: &'a str,
    pub price_cents: i64,
    pub icon: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
pub struct UpdateCategory<'a> {
    pub name: Option<&'a str>,
    pub price_cents: Option<i64>,
    pub icon: Option<Option<&'a str>>,
    pub is_active: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl From<Category> for DomainCategory {
    fn from(value: Category) -> Self {
        Self {
            id: value.id,
            store_id: value.store_id,
            name: value.name,
            price_cents: value.price_cents,
            icon: value.icon,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> NewCategory<'a> {
    pub fn from_domain(id: &'a str, value: &'a DomainNewCategory) -> Self {
        Self {
            id,
            store_id: value.store_id.as_str(),
            name: value.name.as_str(),
            price_cents: value.price_cents,
            icon: value.icon.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateCategory> for UpdateCategory<'a> {
    fn from(value: &'a DomainUpdateCategory) -> Self {
        Self {
            name: value.name.as_deref(),
            price_cents: value.price_cents,
            icon: value.icon.as_ref().map(|icon| icon.as_deref()),
            is_active: value.is_active,
            updated_at: chrono::Local::now().naive_local(),
        }
    }
}
