use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::domain::bill::{BillListQuery, BillStatus, PaymentStatus};
use crate::forms::bills::{CreateBillForm, UpdateBillForm};
use crate::repository::DieselRepository;
use crate::routes::{DEFAULT_PER_PAGE, Paged, error_response};
use crate::services::bills::{create_bill, get_bill, list_bills, modify_bill, remove_bill};
use crate::services::notifications::NotificationTrigger;

#[derive(Debug, Deserialize)]
pub struct BillsQuery {
    pub status: Option<BillStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub customer_id: Option<String>,
    pub search: Option<String>,
    pub created_after: Option<NaiveDateTime>,
    pub created_before: Option<NaiveDateTime>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl BillsQuery {
    fn into_list_query(self, store_id: &str) -> BillListQuery {
        let mut query = BillListQuery::new(store_id).created_between(self.created_after, self.created_before);
        if let Some(status) = self.status {
            query = query.status(status);
        }
        if let Some(payment_status) = self.payment_status {
            query = query.payment_status(payment_status);
        }
        if let Some(customer_id) = self.customer_id {
            query = query.customer_id(customer_id);
        }
        if let Some(search) = self.search {
            query = query.search(search);
        }
        query.paginate(
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
    }
}

#[post("/stores/{store_id}/bills")]
pub async fn add_bill(
    repo: web::Data<DieselRepository>,
    trigger: web::Data<dyn NotificationTrigger>,
    path: web::Path<String>,
    form: web::Json<CreateBillForm>,
) -> impl Responder {
    let store_id = path.into_inner();
    match create_bill(
        repo.get_ref(),
        trigger.get_ref(),
        &store_id,
        form.into_inner(),
    ) {
        Ok(bill) => HttpResponse::Created().json(bill),
        Err(err) => error_response(err, "Failed to create bill"),
    }
}

#[get("/stores/{store_id}/bills")]
pub async fn show_bills(
    repo: web::Data<DieselRepository>,
    path: web::Path<String>,
    query: web::Query<BillsQuery>,
) -> impl Responder {
    let store_id = path.into_inner();
    match list_bills(repo.get_ref(), query.into_inner().into_list_query(&store_id)) {
        Ok((total, items)) => HttpResponse::Ok().json(Paged { total, items }),
        Err(err) => error_response(err, "Failed to list bills"),
    }
}

#[get("/stores/{store_id}/bills/{bill_id}")]
pub async fn show_bill(
    repo: web::Data<DieselRepository>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (store_id, bill_id) = path.into_inner();
    match get_bill(repo.get_ref(), &store_id, &bill_id) {
        Ok(bill) => HttpResponse::Ok().json(bill),
        Err(err) => error_response(err, "Failed to load bill"),
    }
}

#[patch("/stores/{store_id}/bills/{bill_id}")]
pub async fn edit_bill(
    repo: web::Data<DieselRepository>,
    trigger: web::Data<dyn NotificationTrigger>,
    path: web::Path<(String, String)>,
    form: web::Json<UpdateBillForm>,
) -> impl Responder {
    let (store_id, bill_id) = path.into_inner();
    match modify_bill(
        repo.get_ref(),
        trigger.get_ref(),
        &store_id,
        &bill_id,
        form.into_inner(),
    ) {
        Ok(bill) => HttpResponse::Ok().json(bill),
        Err(err) => error_response(err, "Failed to update bill"),
    }
}

#[delete("/stores/{store_id}/bills/{bill_id}")]
pub async fn delete_bill(
    repo: web::Data<DieselRepository>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (store_id, bill_id) = path.into_inner();
    match remove_bill(repo.get_ref(), &store_id, &bill_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "Failed to delete bill"),
    }
}
