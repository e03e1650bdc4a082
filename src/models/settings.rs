use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::settings::StoreSetting as DomainStoreSetting;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::store_settings)]
pub struct StoreSetting {
    pub id: String,
    pub store_id: String,
    pub key: String,
    pub value: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::store_settings)]
pub struct NewStoreSetting<'a> {
    pub id: &'a str,
    pub store_id: &'a str,
    pub key: &'a str,
    pub value: &'a str,
}

impl From<StoreSetting> for DomainStoreSetting {
    fn from(value: StoreSetting) -> Self {
        Self {
            id: value.id,
            store_id: value.store_id,
            key: value.key,
            value: value.value,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
