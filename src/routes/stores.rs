use actix_web::{HttpResponse, Responder, get, post, put, web};

use crate::forms::stores::{RegisterStoreForm, StoreStatusForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::stores::{get_store, register_store, set_store_status};

#[post("/stores")]
pub async fn add_store(
    repo: web::Data<DieselRepository>,
    form: web::Json<RegisterStoreForm>,
) -> impl Responder {
    match register_store(repo.get_ref(), form.into_inner()) {
        Ok(store) => HttpResponse::Created().json(store),
        Err(err) => error_response(err, "Failed to register store"),
    }
}

#[get("/stores/{store_id}")]
pub async fn show_store(
    repo: web::Data<DieselRepository>,
    path: web::Path<String>,
) -> impl Responder {
    let store_id = path.into_inner();
    match get_store(repo.get_ref(), &store_id) {
        Ok(store) => HttpResponse::Ok().json(store),
        Err(err) => error_response(err, "Failed to load store"),
    }
}

#[put("/stores/{store_id}/status")]
pub async fn edit_store_status(
    repo: web::Data<DieselRepository>,
    path: web::Path<String>,
    form: web::Json<StoreStatusForm>,
) -> impl Responder {
    let store_id = path.into_inner();
    match set_store_status(repo.get_ref(), &store_id, form.into_inner()) {
        Ok(store) => HttpResponse::Ok().json(store),
        Err(err) => error_response(err, "Failed to update store status"),
    }
}
