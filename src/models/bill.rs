use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::bill::{
    Bill as DomainBill, BillItem as DomainBillItem, NewBill as DomainNewBill,
    NewBillItem as DomainNewBillItem, UpdateBill as DomainUpdateBill,
};
use crate::domain::customer::Customer as DomainCustomer;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::bills)]
pub struct Bill {
    pub id: String,
    pub store_id: String,
    pub bill_number: String,
    pub customer_id: String,
    pub status: String,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub total_cents: i64,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::bill_items)]
#[diesel(belongs_to(Bill, foreign_key = bill_id))]
pub struct BillItem {
    pub id: String,
    pub bill_id: String,
    pub category_id: String,
    pub quantity: i32,
    pub price_cents: i64,
    pub subtotal_cents: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::bills)]
pub struct NewBill<'a> {
    pub id: &'a str,
    pub store_id: &'a str,
    pub bill_number: &'a str,
    pub customer_id: &'a str,
    pub status: &'a str,
    pub payment_status: &'a str,
    pub payment_method: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub total_cents: i64,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::bill_items)]
pub struct NewBillItem<'a> {
    pub id: &'a str,
    pub bill_id: &'a str,
    pub category_id: &'a str,
    pub quantity: i32,
    pub price_cents: i64,
    pub subtotal_cents: i64,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::bills)]
pub struct UpdateBill<'a> {
    pub status: Option<&'a str>,
    pub payment_status: Option<&'a str>,
    pub payment_method: Option<Option<&'a str>>,
    pub notes: Option<Option<&'a str>>,
    pub completed_at: Option<Option<NaiveDateTime>>,
    pub updated_at: NaiveDateTime,
}

impl Bill {
    /// Assemble the domain aggregate from its loaded parts. Items arrive
    /// paired with the category name joined at query time.
    pub fn into_domain(
        self,
        customer: DomainCustomer,
        items: Vec<(BillItem, String)>,
    ) -> DomainBill {
        DomainBill {
            id: self.id,
            store_id: self.store_id,
            bill_number: self.bill_number,
            customer,
            status: self.status.as_str().into(),
            payment_status: self.payment_status.as_str().into(),
            payment_method: self
                .payment_method
                .as_deref()
                .map(|method| method.into()),
            notes: self.notes,
            total_cents: self.total_cents,
            completed_at: self.completed_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
            items: items
                .into_iter()
                .map(|(item, category_name)| item.into_domain(category_name))
                .collect(),
        }
    }
}

impl BillItem {
    pub fn into_domain(self, category_name: String) -> DomainBillItem {
        DomainBillItem {
            id: self.id,
            category_id: self.category_id,
            category_name,
            quantity: self.quantity,
            price_cents: self.price_cents,
            subtotal_cents: self.subtotal_cents,
        }
    }
}

impl<'a> NewBill<'a> {
    /// Build the insertable row; the id, bill number and resolved customer id
    /// are produced by the repository inside the creation transaction.
    pub fn from_domain(
        id: &'a str,
        bill_number: &'a str,
        customer_id: &'a str,
        value: &'a DomainNewBill,
    ) -> Self {
        Self {
            id,
            store_id: value.store_id.as_str(),
            bill_number,
            customer_id,
            status: value.status.into(),
            payment_status: value.payment_status.into(),
            payment_method: value.payment_method.map(Into::into),
            notes: value.notes.as_deref(),
            total_cents: value.total_cents,
            // A bill issued as collected is completed from the start.
            completed_at: (value.status == crate::domain::bill::BillStatus::Completed)
                .then_some(value.updated_at),
            created_at: value.updated_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> NewBillItem<'a> {
    pub fn from_domain(id: &'a str, bill_id: &'a str, value: &'a DomainNewBillItem) -> Self {
        Self {
            id,
            bill_id,
            category_id: value.category_id.as_str(),
            quantity: value.quantity,
            price_cents: value.price_cents,
            subtotal_cents: value.subtotal_cents,
        }
    }
}

impl<'a> From<&'a DomainUpdateBill> for UpdateBill<'a> {
    fn from(value: &'a DomainUpdateBill) -> Self {
        Self {
            status: value.status.map(Into::into),
            payment_status: value.payment_status.map(Into::into),
            payment_method: value
                .payment_method
                .map(|method| method.map(Into::into)),
            notes: value
                .notes
                .as_ref()
                .map(|notes| notes.as_ref().map(String::as_str)),
            completed_at: value.completed_at,
            updated_at: chrono::Local::now().naive_local(),
        }
    }
}
