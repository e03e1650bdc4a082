use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime, NaiveTime};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::bill::{
    Bill as DomainBill, BillListQuery, BillStatus, DashboardStats,
    NewBill as DomainNewBill, UpdateBill as DomainUpdateBill, bill_number_prefix,
    bill_number_suffix, format_bill_number,
};
use crate::domain::customer::Customer as DomainCustomer;
use crate::models::bill::{
    Bill as DbBill, BillItem as DbBillItem, NewBill as DbNewBill, NewBillItem as DbNewBillItem,
    UpdateBill as DbUpdateBill,
};
use crate::models::customer::{Customer as DbCustomer, NewCustomer as DbNewCustomer};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{BillReader, BillWriter, DieselRepository};

/// Upper bound on bill-number collision retries. Two racing creations for the
/// same store and day both compute the same suffix; the unique
/// `(store_id, bill_number)` index fails the loser, which then re-reads the
/// sequence and tries again.
const NUMBERING_ATTEMPTS: usize = 5;

impl BillReader for DieselRepository {
    fn get_bill_by_id(&self, id: &str) -> RepositoryResult<Option<DomainBill>> {
        use crate::schema::bills;

        let mut conn = self.conn()?;
        let bill = bills::table
            .filter(bills::id.eq(id))
            .first::<DbBill>(&mut conn)
            .optional()?;

        let Some(bill) = bill else {
            return Ok(None);
        };

        let customer = load_customer(&mut conn, &bill.customer_id)?;
        let items = load_items(&mut conn, &bill.id)?;

        Ok(Some(bill.into_domain(customer, items)))
    }

    fn list_bills(&self, query: BillListQuery) -> RepositoryResult<(usize, Vec<DomainBill>)> {
        use crate::schema::{bill_items, bills, categories, customers};

        let mut conn = self.conn()?;

        let search_pattern = query.search.as_ref().map(|term| format!("%{term}%"));

        let mut count_query = bills::table
            .inner_join(customers::table)
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(ref store_id) = query.store_id {
            count_query = count_query.filter(bills::store_id.eq(store_id.as_str()));
        }
        if let Some(status) = query.status {
            count_query = count_query.filter(bills::status.eq(<&str>::from(status)));
        }
        if let Some(payment_status) = query.payment_status {
            count_query =
                count_query.filter(bills::payment_status.eq(<&str>::from(payment_status)));
        }
        if let Some(ref customer_id) = query.customer_id {
            count_query = count_query.filter(bills::customer_id.eq(customer_id.as_str()));
        }
        if let Some(ref pattern) = search_pattern {
            count_query = count_query.filter(
                bills::bill_number
                    .like(pattern.clone())
                    .or(customers::name.like(pattern.clone()))
                    .or(customers::phone.like(pattern.clone())),
            );
        }
        if let Some(after) = query.created_after {
            count_query = count_query.filter(bills::created_at.ge(after));
        }
        if let Some(before) = query.created_before {
            count_query = count_query.filter(bills::created_at.le(before));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items_query = bills::table
            .inner_join(customers::table)
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(ref store_id) = query.store_id {
            items_query = items_query.filter(bills::store_id.eq(store_id.as_str()));
        }
        if let Some(status) = query.status {
            items_query = items_query.filter(bills::status.eq(<&str>::from(status)));
        }
        if let Some(payment_status) = query.payment_status {
            items_query =
                items_query.filter(bills::payment_status.eq(<&str>::from(payment_status)));
        }
        if let Some(ref customer_id) = query.customer_id {
            items_query = items_query.filter(bills::customer_id.eq(customer_id.as_str()));
        }
        if let Some(ref pattern) = search_pattern {
            items_query = items_query.filter(
                bills::bill_number
                    .like(pattern.clone())
                    .or(customers::name.like(pattern.clone()))
                    .or(customers::phone.like(pattern.clone())),
            );
        }
        if let Some(after) = query.created_after {
            items_query = items_query.filter(bills::created_at.ge(after));
        }
        if let Some(before) = query.created_before {
            items_query = items_query.filter(bills::created_at.le(before));
        }

        items_query = items_query.order(bills::created_at.desc());

        if let Some(pagination) = query.pagination {
            items_query = items_query
                .offset(pagination.offset())
                .limit(pagination.limit());
        }

        let rows = items_query
            .select((DbBill::as_select(), DbCustomer::as_select()))
            .load::<(DbBill, DbCustomer)>(&mut conn)?;

        if rows.is_empty() {
            return Ok((total, Vec::new()));
        }

        let bill_ids: Vec<&str> = rows.iter().map(|(bill, _)| bill.id.as_str()).collect();

        let item_rows = bill_items::table
            .inner_join(categories::table)
            .filter(bill_items::bill_id.eq_any(&bill_ids))
            .order(bill_items::created_at.asc())
            .select((DbBillItem::as_select(), categories::name))
            .load::<(DbBillItem, String)>(&mut conn)?;

        let mut items_by_bill: HashMap<String, Vec<(DbBillItem, String)>> = HashMap::new();
        for (item, category_name) in item_rows {
            items_by_bill
                .entry(item.bill_id.clone())
                .or_default()
                .push((item, category_name));
        }

        let bills = rows
            .into_iter()
            .map(|(bill, customer)| {
                let items = items_by_bill.remove(&bill.id).unwrap_or_default();
                bill.into_domain(customer.into(), items)
            })
            .collect();

        Ok((total, bills))
    }

    fn dashboard_stats(&self, store_id: Option<&str>) -> RepositoryResult<DashboardStats> {
        use crate::schema::bills;

        let mut conn = self.conn()?;

        let now = chrono::Local::now().naive_local();
        let today_start = NaiveDateTime::new(now.date(), NaiveTime::MIN);
        let week_start = today_start - Duration::days(7);
        let month_start = today_start - Duration::days(30);

        let scoped = |store: Option<&str>| {
            let mut q = bills::table.into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(store) = store {
                q = q.filter(bills::store_id.eq(store.to_string()));
            }
            q
        };

        let total_bills = scoped(store_id).count().get_result::<i64>(&mut conn)?;
        let pending_bills = scoped(store_id)
            .filter(bills::status.eq(<&str>::from(BillStatus::Pending)))
            .count()
            .get_result::<i64>(&mut conn)?;
        let completed_bills = scoped(store_id)
            .filter(bills::status.eq(<&str>::from(BillStatus::Completed)))
            .count()
            .get_result::<i64>(&mut conn)?;

        let revenue_since = |conn: &mut crate::db::DbConnection,
                             start: NaiveDateTime|
         -> RepositoryResult<i64> {
            let mut q = bills::table
                .filter(bills::status.eq(<&str>::from(BillStatus::Completed)))
                .filter(bills::created_at.ge(start))
                .into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(store) = store_id {
                q = q.filter(bills::store_id.eq(store.to_string()));
            }
            let sum = q
                .select(diesel::dsl::sql::<diesel::sql_types::Nullable<
                    diesel::sql_types::BigInt,
                >>("SUM(`bills`.`total_cents`)"))
                .get_result::<Option<i64>>(conn)?;
            Ok(sum.unwrap_or(0))
        };

        let today_revenue_cents = revenue_since(&mut conn, today_start)?;
        let weekly_revenue_cents = revenue_since(&mut conn, week_start)?;
        let monthly_revenue_cents = revenue_since(&mut conn, month_start)?;

        drop(conn);

        let mut recent_query = match store_id {
            Some(store) => BillListQuery::new(store),
            None => BillListQuery::all_stores(),
        };
        recent_query = recent_query.paginate(1, 5);
        let (_, recent_bills) = self.list_bills(recent_query)?;

        Ok(DashboardStats {
            total_bills,
            pending_bills,
            completed_bills,
            today_revenue_cents,
            weekly_revenue_cents,
            monthly_revenue_cents,
            recent_bills,
        })
    }
}

impl BillWriter for DieselRepository {
    fn create_bill(&self, new_bill: &DomainNewBill) -> RepositoryResult<DomainBill> {
        use crate::schema::{bill_items, bills};

        let mut conn = self.conn()?;

        for attempt in 1.. {
            // Immediate transaction: the write lock is taken before the
            // sequence is read, so concurrent creators queue up behind the
            // busy timeout instead of racing the number.
            let result = conn.immediate_transaction::<DomainBill, RepositoryError, _>(|conn| {
                let customer = resolve_customer(conn, new_bill)?;
                let bill_number = next_bill_number(conn, &new_bill.store_id)?;

                let bill_id = Uuid::new_v4().to_string();
                let row = DbNewBill::from_domain(&bill_id, &bill_number, &customer.id, new_bill);

                let created = diesel::insert_into(bills::table)
                    .values(&row)
                    .get_result::<DbBill>(conn)?;

                let item_ids: Vec<String> = new_bill
                    .items
                    .iter()
                    .map(|_| Uuid::new_v4().to_string())
                    .collect();
                let payload: Vec<DbNewBillItem> = new_bill
                    .items
                    .iter()
                    .zip(&item_ids)
                    .map(|(item, id)| DbNewBillItem::from_domain(id, &bill_id, item))
                    .collect();

                diesel::insert_into(bill_items::table)
                    .values(&payload)
                    .execute(conn)?;

                let items = load_items(conn, &bill_id)?;

                Ok(created.into_domain(customer.into(), items))
            });

            match result {
                Err(RepositoryError::Conflict) if attempt < NUMBERING_ATTEMPTS => {
                    log::debug!(
                        "bill number collision for store {} (attempt {attempt}), retrying",
                        new_bill.store_id
                    );
                }
                other => return other,
            }
        }

        unreachable!("bill creation loop always returns")
    }

    fn update_bill(
        &self,
        bill_id: &str,
        updates: &DomainUpdateBill,
    ) -> RepositoryResult<DomainBill> {
        use crate::schema::bills;

        let mut conn = self.conn()?;

        conn.transaction::<DomainBill, RepositoryError, _>(|conn| {
            let db_updates = DbUpdateBill::from(updates);

            let updated = diesel::update(bills::table.filter(bills::id.eq(bill_id)))
                .set(&db_updates)
                .get_result::<DbBill>(conn)?;

            let customer = load_customer(conn, &updated.customer_id)?;
            let items = load_items(conn, &updated.id)?;

            Ok(updated.into_domain(customer, items))
        })
    }

    fn delete_bill(&self, bill_id: &str) -> RepositoryResult<()> {
        use crate::schema::bills;

        let mut conn = self.conn()?;

        let deleted =
            diesel::delete(bills::table.filter(bills::id.eq(bill_id))).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Next sequence number for today in the store's namespace: parse the
/// suffixes of existing numbers with today's prefix and increment the
/// maximum. Runs inside the bill-creation transaction.
fn next_bill_number(conn: &mut SqliteConnection, store_id: &str) -> RepositoryResult<String> {
    use crate::schema::bills;

    let prefix = bill_number_prefix(chrono::Local::now().date_naive());

    let existing = bills::table
        .filter(bills::store_id.eq(store_id))
        .filter(bills::bill_number.like(format!("{prefix}-%")))
        .select(bills::bill_number)
        .load::<String>(conn)?;

    let last = existing
        .iter()
        .filter_map(|number| bill_number_suffix(number))
        .max()
        .unwrap_or(0);

    Ok(format_bill_number(&prefix, last + 1))
}

/// Reuse the customer matching `(store_id, phone)` or insert a fresh one.
fn resolve_customer(
    conn: &mut SqliteConnection,
    new_bill: &DomainNewBill,
) -> RepositoryResult<DbCustomer> {
    use crate::schema::customers;

    let found = customers::table
        .filter(customers::store_id.eq(new_bill.store_id.as_str()))
        .filter(customers::phone.eq(new_bill.customer.phone.as_str()))
        .first::<DbCustomer>(conn)
        .optional()?;

    if let Some(customer) = found {
        return Ok(customer);
    }

    let id = Uuid::new_v4().to_string();
    let row = DbNewCustomer {
        id: &id,
        store_id: new_bill.store_id.as_str(),
        name: new_bill.customer.name.as_str(),
        phone: new_bill.customer.phone.as_str(),
        email: new_bill.customer.email.as_deref(),
        address: new_bill.customer.address.as_deref(),
    };

    let created = diesel::insert_into(customers::table)
        .values(&row)
        .get_result::<DbCustomer>(conn)?;

    Ok(created)
}

fn load_customer(conn: &mut SqliteConnection, customer_id: &str) -> RepositoryResult<DomainCustomer> {
    use crate::schema::customers;

    let customer = customers::table
        .filter(customers::id.eq(customer_id))
        .first::<DbCustomer>(conn)?;

    Ok(customer.into())
}

fn load_items(
    conn: &mut SqliteConnection,
    bill_id: &str,
) -> RepositoryResult<Vec<(DbBillItem, String)>> {
    use crate::schema::{bill_items, categories};

    let rows = bill_items::table
        .inner_join(categories::table)
        .filter(bill_items::bill_id.eq(bill_id))
        .order(bill_items::created_at.asc())
        .select((DbBillItem::as_select(), categories::name))
        .load::<(DbBillItem, String)>(conn)?;

    Ok(rows)
}
