use std::collections::HashMap;

use diesel::prelude::*;
use uuid::Uuid;

use crate::models::settings::NewStoreSetting as DbNewStoreSetting;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, SettingsReader, SettingsWriter};

impl SettingsReader for DieselRepository {
    fn get_settings(&self, store_id: &str) -> RepositoryResult<HashMap<String, String>> {
        use crate::schema::store_settings;

        let mut conn = self.conn()?;

        let rows = store_settings::table
            .filter(store_settings::store_id.eq(store_id))
            .select((store_settings::key, store_settings::value))
            .load::<(String, String)>(&mut conn)?;

        Ok(rows.into_iter().collect())
    }
}

impl SettingsWriter for DieselRepository {
    fn upsert_settings(&self, store_id: &str, pairs: &[(String, String)]) -> RepositoryResult<()> {
        use crate::schema::store_settings;

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let now = chrono::Local::now().naive_local();

            for (key, value) in pairs {
                let id = Uuid::new_v4().to_string();
                let row = DbNewStoreSetting {
                    id: &id,
                    store_id,
                    key,
                    value,
                };

                diesel::insert_into(store_settings::table)
                    .values(&row)
                    .on_conflict((store_settings::store_id, store_settings::key))
                    .do_update()
                    .set((
                        store_settings::value.eq(value),
                        store_settings::updated_at.eq(now),
                    ))
                    .execute(conn)?;
            }

            Ok(())
        })
    }
}
