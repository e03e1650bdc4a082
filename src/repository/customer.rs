use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::customer::{
    Customer as DomainCustomer, CustomerListQuery, NewCustomer as DomainNewCustomer,
};
use crate::models::customer::{Customer as DbCustomer, NewCustomer as DbNewCustomer};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CustomerReader, CustomerWriter, DieselRepository};

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(
        &self,
        id: &str,
        store_id: &str,
    ) -> RepositoryResult<Option<DomainCustomer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let customer = customers::table
            .filter(customers::id.eq(id))
            .filter(customers::store_id.eq(store_id))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        Ok(customer.map(Into::into))
    }

    fn get_customer_by_phone(
        &self,
        store_id: &str,
        phone: &str,
    ) -> RepositoryResult<Option<DomainCustomer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let customer = customers::table
            .filter(customers::store_id.eq(store_id))
            .filter(customers::phone.eq(phone))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        Ok(customer.map(Into::into))
    }

    fn list_customers(
        &self,
        query: CustomerListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainCustomer>)> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let mut count_query = customers::table
            .filter(customers::store_id.eq(query.store_id.as_str()))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{term}%");
            count_query = count_query.filter(
                customers::name
                    .like(pattern.clone())
                    .or(customers::phone.like(pattern)),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = customers::table
            .filter(customers::store_id.eq(query.store_id.as_str()))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{term}%");
            items = items.filter(
                customers::name
                    .like(pattern.clone())
                    .or(customers::phone.like(pattern)),
            );
        }

        items = items.order(customers::created_at.desc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_customers = items.load::<DbCustomer>(&mut conn)?;

        Ok((total, db_customers.into_iter().map(Into::into).collect()))
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(
        &self,
        new_customer: &DomainNewCustomer,
    ) -> RepositoryResult<DomainCustomer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let id = Uuid::new_v4().to_string();
        let row = DbNewCustomer::from_domain(&id, new_customer);

        let created = diesel::insert_into(customers::table)
            .values(&row)
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(created.into())
    }
}
