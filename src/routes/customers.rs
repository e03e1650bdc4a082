use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Deserialize;

use crate::domain::customer::CustomerListQuery;
use crate::forms::customers::CreateCustomerForm;
use crate::repository::DieselRepository;
use crate::routes::{DEFAULT_PER_PAGE, Paged, error_response};
use crate::services::customers::{create_customer, get_customer, list_customers};

#[derive(Debug, Deserialize)]
pub struct CustomersQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[post("/stores/{store_id}/customers")]
pub async fn add_customer(
    repo: web::Data<DieselRepository>,
    path: web::Path<String>,
    form: web::Json<CreateCustomerForm>,
) -> impl Responder {
    let store_id = path.into_inner();
    match create_customer(repo.get_ref(), &store_id, form.into_inner()) {
        Ok(customer) => HttpResponse::Created().json(customer),
        Err(err) => error_response(err, "Failed to create customer"),
    }
}

#[get("/stores/{store_id}/customers")]
pub async fn show_customers(
    repo: web::Data<DieselRepository>,
    path: web::Path<String>,
    query: web::Query<CustomersQuery>,
) -> impl Responder {
    let store_id = path.into_inner();
    let query = query.into_inner();

    let mut list_query = CustomerListQuery::new(store_id).paginate(
        query.page.unwrap_or(1),
        query.per_page.unwrap_or(DEFAULT_PER_PAGE),
    );
    if let Some(search) = query.search {
        list_query = list_query.search(search);
    }

    match list_customers(repo.get_ref(), list_query) {
        Ok((total, items)) => HttpResponse::Ok().json(Paged { total, items }),
        Err(err) => error_response(err, "Failed to list customers"),
    }
}

#[get("/stores/{store_id}/customers/{customer_id}")]
pub async fn show_customer(
    repo: web::Data<DieselRepository>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (store_id, customer_id) = path.into_inner();
    match get_customer(repo.get_ref(), &store_id, &customer_id) {
        Ok(customer) => HttpResponse::Ok().json(customer),
        Err(err) => error_response(err, "Failed to load customer"),
    }
}
