use diesel::dsl::{exists, select};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::category::{
    Category as DomainCategory, CategoryListQuery, NewCategory as DomainNewCategory,
    UpdateCategory as DomainUpdateCategory,
};
use crate::models::category::{
    Category as DbCategory, NewCategory as DbNewCategory, UpdateCategory as DbUpdateCategory,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository};

impl CategoryReader for DieselRepository {
    fn get_category_by_id(&self, id: &str) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let category = categories::table
            .filter(categories::id.eq(id))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(Into::into))
    }

    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainCategory>)> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let mut count_query = categories::table
            .filter(categories::store_id.eq(query.store_id.as_str()))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if !query.include_inactive {
            count_query = count_query.filter(categories::is_active.eq(true));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = categories::table
            .filter(categories::store_id.eq(query.store_id.as_str()))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if !query.include_inactive {
            items = items.filter(categories::is_active.eq(true));
        }

        items = items.order(categories::name.asc());

        if let Some(pagination) = query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_categories = items.load::<DbCategory>(&mut conn)?;

        Ok((total, db_categories.into_iter().map(Into::into).collect()))
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(
        &self,
        new_category: &DomainNewCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let id = Uuid::new_v4().to_string();
        let row = DbNewCategory::from_domain(&id, new_category);

        let created = diesel::insert_into(categories::table)
            .values(&row)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.into())
    }

    fn update_category(
        &self,
        category_id: &str,
        store_id: &str,
        updates: &DomainUpdateCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let db_updates = DbUpdateCategory::from(updates);

        let target = categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::store_id.eq(store_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_category(&self, category_id: &str, store_id: &str) -> RepositoryResult<()> {
        use crate::schema::{bill_items, categories};

        let mut conn = self.conn()?;

        // Referenced categories keep billing history intact; they can only
        // be deactivated.
        let referenced: bool = select(exists(
            bill_items::table.filter(bill_items::category_id.eq(category_id)),
        ))
        .get_result(&mut conn)?;

        if referenced {
            return Err(RepositoryError::Conflict);
        }

        let target = categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::store_id.eq(store_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
