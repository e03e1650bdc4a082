use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::store::{NewStore as DomainNewStore, Store as DomainStore, UpdateStoreStatus};
use crate::models::store::{NewStore as DbNewStore, Store as DbStore};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, StoreReader, StoreWriter};

impl StoreReader for DieselRepository {
    fn get_store_by_id(&self, id: &str) -> RepositoryResult<Option<DomainStore>> {
        use crate::schema::stores;

        let mut conn = self.conn()?;
        let store = stores::table
            .filter(stores::id.eq(id))
            .first::<DbStore>(&mut conn)
            .optional()?;

        Ok(store.map(Into::into))
    }
}

impl StoreWriter for DieselRepository {
    fn create_store(&self, new_store: &DomainNewStore) -> RepositoryResult<DomainStore> {
        use crate::schema::stores;

        let mut conn = self.conn()?;

        let id = Uuid::new_v4().to_string();
        let row = DbNewStore::from_domain(&id, new_store);

        let created = diesel::insert_into(stores::table)
            .values(&row)
            .get_result::<DbStore>(&mut conn)?;

        Ok(created.into())
    }

    fn set_store_status(
        &self,
        store_id: &str,
        update: &UpdateStoreStatus,
    ) -> RepositoryResult<DomainStore> {
        use crate::schema::stores;

        let mut conn = self.conn()?;

        let updated = diesel::update(stores::table.filter(stores::id.eq(store_id)))
            .set((
                stores::is_active.eq(update.is_active),
                stores::deactivation_reason.eq(update.deactivation_reason.as_deref()),
                stores::updated_at.eq(chrono::Local::now().naive_local()),
            ))
            .get_result::<DbStore>(&mut conn)?;

        Ok(updated.into())
    }
}
